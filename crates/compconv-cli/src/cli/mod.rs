mod commands;
mod helpers;

use crate::logging;
use clap::{Args, Parser, Subcommand, ValueEnum};
use compconv_core::domain::{CompositionUnit, ConversionError};
use std::path::PathBuf;
use tracing::debug;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let conversion_error = error.as_conversion_error();
            debug!(code = conversion_error.code(), "command failed");
            eprintln!("{}", conversion_error.diagnostic_line());
            if let Some(summary_line) = conversion_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            conversion_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("compconv".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            logging::setup_logging(cli.verbose, cli.quiet)?;
            debug!(?args, "parsed command line");
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "compconv",
    version,
    about = "Convert element compositions between atomic and weight percent"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,

    /// Increase log verbosity (-v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Convert a composition such as "Fe:50, C:50" to the other unit system
    Convert(ConvertArgs),
    /// List atomic weights, or look up the given element symbols
    Elements(ElementsArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ConvertArgs {
    /// Unit of the input percentages
    #[arg(long, value_enum, value_name = "UNIT")]
    pub(crate) from: UnitArg,

    /// Composition text; read from --input or stdin when omitted
    #[arg(value_name = "COMPOSITION", conflicts_with = "input")]
    pub(crate) composition: Option<String>,

    /// File containing the composition text
    #[arg(short, long, value_name = "PATH")]
    pub(crate) input: Option<PathBuf>,

    /// Atomic weight table (JSON object of symbol to weight)
    #[arg(short, long, value_name = "PATH")]
    pub(crate) weights: Option<PathBuf>,

    /// Allowed deviation of the input sum from 100, in percentage points
    #[arg(short, long, value_name = "FLOAT")]
    pub(crate) tolerance: Option<f64>,

    /// Decimal places in the table output
    #[arg(short, long, value_name = "N")]
    pub(crate) precision: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ElementsArgs {
    /// Symbols to look up; all elements are listed when omitted
    #[arg(value_name = "SYMBOL")]
    pub(crate) symbols: Vec<String>,

    /// Atomic weight table (JSON object of symbol to weight)
    #[arg(short, long, value_name = "PATH")]
    pub(crate) weights: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum UnitArg {
    /// Atomic percent
    #[value(alias = "atomic")]
    At,
    /// Weight percent
    #[value(alias = "weight")]
    Wt,
}

impl From<UnitArg> for CompositionUnit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::At => CompositionUnit::Atomic,
            UnitArg::Wt => CompositionUnit::Weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Convert(args) => commands::run_convert_command(args),
        CliCommand::Elements(args) => commands::run_elements_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(#[from] ConversionError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_conversion_error(&self) -> ConversionError {
        match self {
            Self::Usage(message) => ConversionError::usage(message.trim_end()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => ConversionError::io(format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use compconv_core::domain::{ConversionError, ConversionErrorKind};

    #[test]
    fn help_and_version_exit_successfully() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
        assert_eq!(run(["--version"]).expect("version should succeed"), 0);
        assert_eq!(run(["convert", "--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn unknown_subcommand_is_usage_error() {
        let error = run(["transmute"]).expect_err("unknown command should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.as_conversion_error().exit_code(), 2);
    }

    #[test]
    fn missing_direction_is_usage_error() {
        let error = run(["convert", "Fe:50, C:50"]).expect_err("--from is required");
        assert_eq!(
            error.as_conversion_error().kind(),
            ConversionErrorKind::Usage
        );
    }

    #[test]
    fn internal_errors_map_to_io_category() {
        let error = CliError::Internal(anyhow::anyhow!("disk on fire"));
        let mapped = error.as_conversion_error();
        assert_eq!(mapped.kind(), ConversionErrorKind::Io);
        assert_eq!(mapped.exit_code(), 3);

        let compute = CliError::from(ConversionError::degenerate_input("all percentages are zero"));
        assert_eq!(compute.as_conversion_error().exit_code(), 4);
    }
}
