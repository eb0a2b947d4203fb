// awbrecon CLI - manifest reconciliation, headless or served

mod compare;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use awbrecon_io::ArtifactFormat;
use exit_codes::{EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "awbrecon")]
#[command(about = "Reconcile two AWB manifests by AWB number and weight")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two manifest files and write the result tables
    #[command(after_help = "\
Examples:
  awbrecon compare flights.xlsx warehouse.xlsx
  awbrecon compare a.csv b.csv --json
  awbrecon compare a.xlsx b.xlsx --output results --format csv")]
    Compare {
        /// First manifest (xlsx, xls, xlsb, ods, csv, tsv)
        file1: PathBuf,

        /// Second manifest
        file2: PathBuf,

        /// Print the full report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Directory for the two result tables
        #[arg(long, short = 'o', default_value = "processed")]
        output: PathBuf,

        /// Result table format
        #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
        format: OutputFormat,
    },

    /// Serve the upload/compare/download web UI
    #[command(after_help = "\
Examples:
  awbrecon serve
  awbrecon serve --port 9000
  RUST_LOG=debug awbrecon serve")]
    Serve {
        /// Port to listen on (localhost only)
        #[arg(long, env = "AWBRECON_PORT", default_value_t = awbrecon_server::DEFAULT_PORT)]
        port: u16,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Csv,
}

impl From<OutputFormat> for ArtifactFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => ArtifactFormat::Xlsx,
            OutputFormat::Csv => ArtifactFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: awbrecon <command> [options]");
            eprintln!("       awbrecon --help for more information");
            return ExitCode::from(EXIT_USAGE);
        }
        Some(Commands::Compare {
            file1,
            file2,
            json,
            output,
            format,
        }) => compare::cmd_compare(file1, file2, json, output, format.into()),
        Some(Commands::Serve { port }) => cmd_serve(port),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_serve(port: u16) -> Result<(), CliError> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io(format!("cannot start runtime: {e}")))?;
    runtime
        .block_on(awbrecon_server::serve(port))
        .map_err(|e| CliError::io(e.to_string()))
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self {
            code: exit_codes::EXIT_PARSE,
            message: msg.into(),
            hint: None,
        }
    }
}
