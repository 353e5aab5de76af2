pub mod errors;

pub use errors::{
    ConversionError, ConversionErrorKind, ConversionResult, ErrorCategory, ParserResult,
};

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Default tolerance, in absolute percentage points, for the sum-to-100 check.
pub const DEFAULT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompositionUnit {
    #[serde(rename = "at%")]
    Atomic,
    #[serde(rename = "wt%")]
    Weight,
}

impl CompositionUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atomic => "At%",
            Self::Weight => "Wt%",
        }
    }
}

impl Display for CompositionUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    AtomicToWeight,
    WeightToAtomic,
}

impl ConversionDirection {
    /// Direction whose input is expressed in `unit`.
    pub const fn from_source(unit: CompositionUnit) -> Self {
        match unit {
            CompositionUnit::Atomic => Self::AtomicToWeight,
            CompositionUnit::Weight => Self::WeightToAtomic,
        }
    }

    pub const fn source(self) -> CompositionUnit {
        match self {
            Self::AtomicToWeight => CompositionUnit::Atomic,
            Self::WeightToAtomic => CompositionUnit::Weight,
        }
    }

    pub const fn target(self) -> CompositionUnit {
        match self {
            Self::AtomicToWeight => CompositionUnit::Weight,
            Self::WeightToAtomic => CompositionUnit::Atomic,
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            Self::AtomicToWeight => Self::WeightToAtomic,
            Self::WeightToAtomic => Self::AtomicToWeight,
        }
    }
}

impl Display for ConversionDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source(), self.target())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRecord {
    pub symbol: String,
    pub atomic_weight: f64,
}

impl ElementRecord {
    pub fn new(symbol: impl Into<String>, atomic_weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            atomic_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionEntry {
    pub symbol: String,
    pub percent: f64,
}

impl CompositionEntry {
    pub fn new(symbol: impl Into<String>, percent: f64) -> Self {
        Self {
            symbol: symbol.into(),
            percent,
        }
    }
}

/// Ordered list of element percentages. Order is preserved through conversion.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Composition {
    pub entries: Vec<CompositionEntry>,
}

impl Composition {
    pub fn new(entries: Vec<CompositionEntry>) -> Self {
        Self { entries }
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(symbol, percent)| CompositionEntry::new(symbol, percent))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.percent).sum()
    }

    pub fn percent_of(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.symbol == symbol)
            .map(|entry| entry.percent)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompositionEntry> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionOptions {
    /// Allowed deviation of the input sum from 100, in percentage points.
    pub tolerance: f64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }
}

impl ConversionOptions {
    pub fn with_tolerance(tolerance: f64) -> ConversionResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConversionError::usage(format!(
                "tolerance must be a finite non-negative number, got {}",
                tolerance
            )));
        }
        Ok(Self { tolerance })
    }
}
