use crate::cli::CliError;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Overrides the `-v`/`-q` level with a full filter directive, e.g. `compconv_core=trace`.
pub const LOG_ENV_VAR: &str = "COMPCONV_LOG";

pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn build_filter(
    verbosity: u8,
    quiet: bool,
    directive: Option<&str>,
) -> Result<EnvFilter, CliError> {
    match directive.filter(|value| !value.trim().is_empty()) {
        Some(value) if !quiet => EnvFilter::try_new(value).map_err(|error| {
            CliError::Usage(format!("invalid {} directive '{}': {}", LOG_ENV_VAR, value, error))
        }),
        _ => Ok(EnvFilter::builder()
            .with_default_directive(level_for(verbosity, quiet).into())
            .parse_lossy("")),
    }
}

pub fn setup_logging(verbosity: u8, quiet: bool) -> Result<(), CliError> {
    let directive = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(verbosity, quiet, directive.as_deref())?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .compact();

    // A subscriber may already be installed when the CLI is driven in-process.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();

    Ok(())
}
