mod cleaner;
mod cleaner_config;
mod dictionary_cleaner;
mod error;
mod prompt;

pub use cleaner::{clean_lines, join_words, split_lines, DefaultCleaner, EntryCleaner, Lines};
pub use cleaner_config::CleanerConfig;
pub use dictionary_cleaner::{CleanReport, DictionaryCleaner, DictionaryCleanerBuilder};
pub use error::{CleanError, ConfigError};
pub use prompt::{Prompter, INPUT_PROMPT, OUTPUT_PROMPT};
