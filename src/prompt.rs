use std::io::{BufRead, Write};

use crate::CleanError;

pub const INPUT_PROMPT: &str = "Input filename: ";
pub const OUTPUT_PROMPT: &str = "Output filename: ";

/// Asks for a base filename on an interactive pair of streams.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter { reader, writer }
    }

    pub fn input_base(&mut self) -> Result<String, CleanError> {
        self.ask(INPUT_PROMPT, "input filename")
    }

    pub fn output_base(&mut self) -> Result<String, CleanError> {
        self.ask(OUTPUT_PROMPT, "output filename")
    }

    /// Writes `prompt`, then reads one line and strips its terminator.
    /// Surrounding spaces are part of the answer.
    pub fn ask(&mut self, prompt: &str, what: &'static str) -> Result<String, CleanError> {
        self.writer
            .write_all(prompt.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(CleanError::Prompt)?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(CleanError::Prompt)?;
        if read == 0 {
            return Err(CleanError::PromptClosed { what });
        }
        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(answer.to_string())
    }
}
