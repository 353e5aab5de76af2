//! Command settings resolved from flags, environment and defaults, in that order.

use compconv_core::common::{AtomicWeightTable, BUILTIN_TABLE_NAME};
use compconv_core::domain::{
    ConversionError, ConversionOptions, ConversionResult, DEFAULT_SUM_TOLERANCE,
};
use compconv_core::modules::{DEFAULT_PRECISION, MAX_PRECISION};
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use tracing::info;

pub const WEIGHTS_ENV_VAR: &str = "COMPCONV_ATOMIC_WEIGHTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Builtin,
    File(PathBuf),
}

impl TableSource {
    pub fn resolve(flag: Option<PathBuf>, env_value: Option<OsString>) -> Self {
        if let Some(path) = flag {
            return Self::File(path);
        }
        match env_value.filter(|value| !value.is_empty()) {
            Some(value) => Self::File(PathBuf::from(value)),
            None => Self::Builtin,
        }
    }

    pub fn from_env(flag: Option<PathBuf>) -> Self {
        Self::resolve(flag, std::env::var_os(WEIGHTS_ENV_VAR))
    }

    /// Loads the table. Failure here is fatal and precedes any conversion.
    pub fn load(&self) -> ConversionResult<AtomicWeightTable> {
        info!(source = %self, "loading atomic weight table");
        match self {
            Self::Builtin => AtomicWeightTable::builtin(),
            Self::File(path) => AtomicWeightTable::from_path(path),
        }
    }
}

impl Display for TableSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => f.write_str(BUILTIN_TABLE_NAME),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSettings {
    pub table: TableSource,
    pub options: ConversionOptions,
    pub precision: usize,
}

impl ConvertSettings {
    pub fn resolve(
        table: TableSource,
        tolerance: Option<f64>,
        precision: Option<usize>,
    ) -> ConversionResult<Self> {
        let options =
            ConversionOptions::with_tolerance(tolerance.unwrap_or(DEFAULT_SUM_TOLERANCE))?;
        let precision = precision.unwrap_or(DEFAULT_PRECISION);
        if precision > MAX_PRECISION {
            return Err(ConversionError::usage(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, precision
            )));
        }

        Ok(Self {
            table,
            options,
            precision,
        })
    }
}
