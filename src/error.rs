use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[cfg(feature = "toml_config")]
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Unsupported config file format. Use .json or .toml")]
    UnsupportedFormat,
    #[error("TOML support is not enabled. Enable the 'toml_config' feature to use TOML configs.")]
    TomlNotEnabled,
    #[error("Invalid file extension {0:?}: must be non-empty and contain no path separator")]
    InvalidExtension(String),
}

/// Everything that can stop a cleaning run.
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("input file {} not found: {source}", path.display())]
    InputNotFound { path: PathBuf, source: io::Error },
    #[error("cannot read input file {}: {source}", path.display())]
    InputUnreadable { path: PathBuf, source: io::Error },
    #[error("input file {} is not valid UTF-8 (invalid byte at offset {offset})", path.display())]
    Decoding { path: PathBuf, offset: usize },
    #[error("cannot write output file {}: {source}", path.display())]
    OutputWrite { path: PathBuf, source: io::Error },
    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),
    #[error("no {what} entered before end of input")]
    PromptClosed { what: &'static str },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CleanError {
    pub(crate) fn from_input_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            CleanError::InputNotFound { path, source }
        } else {
            CleanError::InputUnreadable { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_maps_to_not_found() {
        let err = CleanError::from_input_io(
            PathBuf::from("words.dic"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, CleanError::InputNotFound { .. }));
        assert!(err.to_string().contains("words.dic"));
    }

    #[test]
    fn denied_input_maps_to_unreadable() {
        let err = CleanError::from_input_io(
            PathBuf::from("words.dic"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CleanError::InputUnreadable { .. }));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn decoding_message_names_offset() {
        let err = CleanError::Decoding {
            path: PathBuf::from("bad.dic"),
            offset: 7,
        };
        assert_eq!(
            err.to_string(),
            "input file bad.dic is not valid UTF-8 (invalid byte at offset 7)"
        );
    }
}
