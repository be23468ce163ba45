use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use dic_cleaner::{CleanError, CleanReport, DictionaryCleaner, Prompter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dic-to-txt",
    about = "Strip /metadata from a .dic dictionary and save the plain word list as .txt"
)]
struct Cli {
    /// Input base filename (".dic" is appended); prompted for when absent
    #[arg(long)]
    input: Option<String>,
    /// Output base filename (".txt" is appended); prompted for when absent
    #[arg(long)]
    output: Option<String>,
    /// Config file (.json/.toml) or inline config
    #[arg(long)]
    config: Option<String>,
    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let result = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run(&cli, stdin.lock(), stdout.lock())
    };
    ExitCode::from(finish(result, io::stdout(), io::stderr()))
}

fn run<R: BufRead, W: Write>(cli: &Cli, reader: R, writer: W) -> Result<CleanReport, CleanError> {
    let mut builder = DictionaryCleaner::new();
    if let Some(config) = &cli.config {
        builder = builder.with_config(config);
    }
    let cleaner = builder.build()?;
    tracing::debug!(config = %cleaner.config(), "using configuration");

    let mut prompter = Prompter::new(reader, writer);
    let input = match &cli.input {
        Some(input) => input.clone(),
        None => prompter.input_base()?,
    };
    let output = match &cli.output {
        Some(output) => output.clone(),
        None => prompter.output_base()?,
    };

    cleaner.clean_files(&input, &output)
}

// Reports the outcome and gives the process exit status
fn finish<O: Write, E: Write>(result: Result<CleanReport, CleanError>, mut out: O, mut err: E) -> u8 {
    match result {
        Ok(report) => {
            let _ = writeln!(
                out,
                "Cleaned {} entries and saved to {}",
                report.entries,
                report.output.display()
            );
            0
        }
        Err(error) => {
            tracing::debug!(error = ?error, "run failed");
            let _ = writeln!(err, "error: {}", error);
            1
        }
    }
}
