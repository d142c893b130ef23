mod commands;
mod helpers;

use clap::Parser;
use dwuck_core::domain::DwuckError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let codec_error = error.as_dwuck_error();
            eprintln!("{}", codec_error.diagnostic_line());
            if let Some(summary_line) = codec_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            codec_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("dwuck4-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "dwuck4-rs", about = "DWUCK4 card-deck encoder and report decoder")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Encode a per-state parameter table into a card deck
    Encode(commands::EncodeArgs),
    /// Generate and encode an excitation-energy scan deck
    Scan(commands::ScanArgs),
    /// Decode result series from an engine report
    Decode(commands::DecodeArgs),
    /// Compare a decoded series against a reference distribution
    Compare(commands::CompareArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Encode(args) => commands::run_encode_command(args),
        CliCommand::Scan(args) => commands::run_scan_command(args),
        CliCommand::Decode(args) => commands::run_decode_command(args),
        CliCommand::Compare(args) => commands::run_compare_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Codec(DwuckError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_dwuck_error(&self) -> DwuckError {
        match self {
            Self::Usage(message) => DwuckError::invalid_state("INPUT.CLI_USAGE", message.clone()),
            Self::Codec(error) => error.clone(),
            Self::Internal(error) => DwuckError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
