use std::{
    fmt::{self, Debug, Formatter},
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    cleaner::{clean_lines, join_words, split_lines, DefaultCleaner, EntryCleaner},
    cleaner_config::CleanerConfig,
    CleanError,
};

/// A builder for the `DictionaryCleaner` struct
/// That allows for configuring the cleaner
/// before building it
pub struct DictionaryCleanerBuilder {
    config: Option<String>,
    cleaner: Option<Arc<dyn EntryCleaner>>,
}

impl DictionaryCleanerBuilder {
    pub fn new() -> Self {
        DictionaryCleanerBuilder {
            config: None,
            cleaner: None,
        }
    }

    /// A config file path or an inline JSON/TOML config.
    pub fn with_config(mut self, config: &str) -> Self {
        self.config = Some(config.to_string());
        self
    }

    /// Replaces the delimiter-based line cleaner.
    pub fn with_cleaner<T: EntryCleaner + 'static>(mut self, cleaner: T) -> Self {
        self.cleaner = Some(Arc::new(cleaner));
        self
    }

    pub fn build(self) -> Result<DictionaryCleaner, CleanError> {
        let config = match &self.config {
            Some(config_str) => CleanerConfig::from_config(config_str)?,
            None => CleanerConfig::default(),
        };
        let cleaner: Arc<dyn EntryCleaner> = match self.cleaner {
            Some(cleaner) => cleaner,
            None => Arc::new(DefaultCleaner::new(config.delimiter)),
        };
        tracing::debug!(%config, "dictionary cleaner configured");
        Ok(DictionaryCleaner { config, cleaner })
    }
}

impl Default for DictionaryCleanerBuilder {
    fn default() -> Self {
        DictionaryCleanerBuilder::new()
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub entries: usize,
}

/// Converts a `word[/metadata]` dictionary into a plain word list
///
/// # Example
///
/// ```no_run
/// use dic_cleaner::DictionaryCleaner;
///
/// let cleaner = DictionaryCleaner::default();
/// // reads sample.dic, writes sample_out.txt
/// let report = cleaner.clean_files("sample", "sample_out")?;
/// println!("{} entries", report.entries);
/// # Ok::<(), dic_cleaner::CleanError>(())
/// ```
#[derive(Clone)]
pub struct DictionaryCleaner {
    config: CleanerConfig,
    cleaner: Arc<dyn EntryCleaner>,
}

impl Debug for DictionaryCleaner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DictionaryCleaner({})", self.config)
    }
}

impl DictionaryCleaner {
    pub fn new() -> DictionaryCleanerBuilder {
        DictionaryCleanerBuilder::new()
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn input_path(&self, base: &str) -> PathBuf {
        with_extension(base, &self.config.input_extension)
    }

    pub fn output_path(&self, base: &str) -> PathBuf {
        with_extension(base, &self.config.output_extension)
    }

    /// Cleans a whole dictionary held in memory.
    pub fn clean_str(&self, text: &str) -> String {
        join_words(clean_lines(text, &*self.cleaner))
    }

    /// Reads `<input_base>.dic`, cleans it and writes `<output_base>.txt`.
    ///
    /// The input is read and decoded in full before the output is touched,
    /// and the output only appears once it is completely written.
    pub fn clean_files(&self, input_base: &str, output_base: &str) -> Result<CleanReport, CleanError> {
        let input = self.input_path(input_base);
        let output = self.output_path(output_base);
        tracing::debug!(input = %input.display(), output = %output.display(), "cleaning dictionary");

        let text = read_dictionary(&input)?;
        let entries = split_lines(&text).count();
        let cleaned = self.clean_str(&text);

        write_atomic(&output, cleaned.as_bytes()).map_err(|source| CleanError::OutputWrite {
            path: output.clone(),
            source,
        })?;

        tracing::info!(entries, output = %output.display(), "word list written");
        Ok(CleanReport { input, output, entries })
    }
}

impl Default for DictionaryCleaner {
    fn default() -> Self {
        let config = CleanerConfig::default();
        DictionaryCleaner {
            cleaner: Arc::new(DefaultCleaner::new(config.delimiter)),
            config,
        }
    }
}

// Appends rather than replaces, so "my.words" stays "my.words.dic"
fn with_extension(base: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", base, extension))
}

fn read_dictionary(path: &Path) -> Result<String, CleanError> {
    let bytes = fs::read(path).map_err(|source| CleanError::from_input_io(path.to_path_buf(), source))?;
    String::from_utf8(bytes).map_err(|err| CleanError::Decoding {
        path: path.to_path_buf(),
        offset: err.utf8_error().valid_up_to(),
    })
}

// Write to a sibling temp file, then rename it over the target
fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let unique_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(format!(".tmp.{}.{}", std::process::id(), unique_suffix));
    let tmp_path = PathBuf::from(tmp_name);

    let result = File::create(&tmp_path)
        .and_then(|mut tmp_file| {
            tmp_file.write_all(content)?;
            tmp_file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp_path, path));

    if result.is_err() && tmp_path.exists() {
        if let Err(cleanup_err) = fs::remove_file(&tmp_path) {
            tracing::warn!(tmp = %tmp_path.display(), "failed to remove temporary file: {}", cleanup_err);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    struct LowercaseCleaner;

    impl EntryCleaner for LowercaseCleaner {
        fn clean<'a>(&self, line: &'a str) -> Cow<'a, str> {
            Cow::Owned(line.trim().to_lowercase())
        }
    }

    fn base(dir: &Path, name: &str) -> String {
        dir.join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn paths_append_extensions() {
        let cleaner = DictionaryCleaner::default();
        assert_eq!(cleaner.input_path("en_US"), PathBuf::from("en_US.dic"));
        assert_eq!(cleaner.output_path("my.words"), PathBuf::from("my.words.txt"));
    }

    #[test]
    fn configured_extensions_and_delimiter() {
        let cleaner = DictionaryCleaner::new()
            .with_config(r#"{"delimiter": "|", "output_extension": "lst"}"#)
            .build()
            .unwrap();
        assert_eq!(cleaner.config().delimiter, '|');
        assert_eq!(cleaner.config().input_extension, "dic");
        assert_eq!(cleaner.output_path("out"), PathBuf::from("out.lst"));
        assert_eq!(cleaner.clean_str("word|auto\nand/or"), "word\nand/or");
    }

    #[test]
    fn custom_cleaner_overrides_delimiter() {
        let cleaner = DictionaryCleaner::new().with_cleaner(LowercaseCleaner).build().unwrap();
        assert_eq!(cleaner.clean_str("Hello/INT\n WORLD "), "hello/int\nworld");
    }

    #[test]
    fn bad_config_fails_build() {
        let err = DictionaryCleaner::new().with_config("not a config").build().unwrap_err();
        assert!(matches!(err, CleanError::Config(_)));
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let target = dir.path().join("out.txt");
        fs::write(&target, "old content that is longer").expect("seed output");

        write_atomic(&target, b"new").expect("atomic write");

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unwritable_output_leaves_nothing_behind() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("in.dic"), "a/X\nb").expect("write input");
        let output_base = base(&dir.path().join("missing_dir"), "out");

        let err = DictionaryCleaner::default()
            .clean_files(&base(dir.path(), "in"), &output_base)
            .unwrap_err();

        assert!(matches!(err, CleanError::OutputWrite { .. }));
        assert!(!dir.path().join("missing_dir").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn output_is_a_directory_keeps_directory_and_removes_temp() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("in.dic"), "a/X").expect("write input");
        fs::create_dir(dir.path().join("out.txt")).expect("create blocking dir");
        fs::write(dir.path().join("out.txt").join("keep"), "x").expect("fill blocking dir");

        let err = DictionaryCleaner::default()
            .clean_files(&base(dir.path(), "in"), &base(dir.path(), "out"))
            .unwrap_err();

        assert!(matches!(err, CleanError::OutputWrite { .. }));
        assert!(dir.path().join("out.txt").is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn invalid_utf8_reports_offset_and_writes_nothing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("bad.dic"), b"ok/X\n\xffbad").expect("write input");

        let err = DictionaryCleaner::default()
            .clean_files(&base(dir.path(), "bad"), &base(dir.path(), "bad_out"))
            .unwrap_err();

        assert!(matches!(err, CleanError::Decoding { offset: 5, .. }));
        assert!(!dir.path().join("bad_out.txt").exists());
    }
}
