use std::borrow::Cow;

/// Turns one raw dictionary line into the word it holds.
pub trait EntryCleaner: Send + Sync {
    fn clean<'a>(&self, line: &'a str) -> Cow<'a, str>;
}

// Default cleaner: keep what precedes the first delimiter, trimmed
#[derive(Debug, Clone, Copy)]
pub struct DefaultCleaner {
    delimiter: char,
}

impl DefaultCleaner {
    pub fn new(delimiter: char) -> Self {
        DefaultCleaner { delimiter }
    }
}

impl Default for DefaultCleaner {
    fn default() -> Self {
        DefaultCleaner::new('/')
    }
}

impl EntryCleaner for DefaultCleaner {
    fn clean<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let word = match line.split_once(self.delimiter) {
            Some((word, _metadata)) => word,
            None => line,
        };
        Cow::Borrowed(word.trim_matches(is_strippable))
    }
}

// Unicode whitespace plus the ASCII separators \x1c..=\x1f
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Splits `text` into lines ended by `\r\n`, `\r` or `\n`.
///
/// The terminator is not part of the line, and a terminator at the very
/// end does not start an extra empty line.
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let line = match self.rest.find(['\r', '\n']) {
            Some(end) => {
                let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
                let line = &self.rest[..end];
                self.rest = &self.rest[end + terminator..];
                line
            }
            None => std::mem::take(&mut self.rest),
        };
        Some(line)
    }
}

/// Lazily cleans every line of `text`, in order, one entry per line.
///
/// Empty lines yield empty entries. A trailing line terminator does not
/// produce an extra entry.
pub fn clean_lines<'a, C>(text: &'a str, cleaner: &'a C) -> impl Iterator<Item = Cow<'a, str>> + 'a
where
    C: EntryCleaner + ?Sized,
{
    split_lines(text).map(move |line| cleaner.clean(line))
}

/// Joins words with a single `\n`, without a trailing newline.
pub fn join_words<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, word) in words.into_iter().enumerate() {
        if i > 0 {
            joined.push('\n');
        }
        joined.push_str(word.as_ref());
    }
    joined
}
