//! Standard atomic weight table keyed by element symbol.
//!
//! The builtin dataset is the versioned `data/atomic-weights.json` file compiled
//! into the crate; alternative tables can be loaded from disk in the same format,
//! a JSON object mapping symbol to weight in g/mol.

use crate::domain::{ConversionError, ConversionResult, ElementRecord};
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_TABLE_JSON: &str = include_str!("../../data/atomic-weights.json");
pub const BUILTIN_TABLE_NAME: &str = "builtin";
pub const MAX_SYMBOL_LENGTH: usize = 3;

#[derive(Debug, Clone)]
pub struct AtomicWeightTable {
    records: Vec<ElementRecord>,
    index: HashMap<String, usize>,
    source: String,
}

impl AtomicWeightTable {
    pub fn builtin() -> ConversionResult<Self> {
        Self::parse(BUILTIN_TABLE_JSON, BUILTIN_TABLE_NAME)
    }

    pub fn from_path(path: &Path) -> ConversionResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            ConversionError::table_load(format!(
                "failed to read atomic weight table '{}': {}",
                path.display(),
                source
            ))
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn from_json_str(content: &str) -> ConversionResult<Self> {
        Self::parse(content, "<inline>")
    }

    pub fn from_records(
        records: impl IntoIterator<Item = ElementRecord>,
        source: impl Into<String>,
    ) -> ConversionResult<Self> {
        let source = source.into();
        let mut table = Self {
            records: Vec::new(),
            index: HashMap::new(),
            source,
        };

        for record in records {
            table.insert(record)?;
        }

        if table.records.is_empty() {
            return Err(ConversionError::table_load(format!(
                "atomic weight table '{}' contains no elements",
                table.source
            )));
        }

        debug!(
            source = %table.source,
            elements = table.records.len(),
            "loaded atomic weight table"
        );
        Ok(table)
    }

    fn parse(content: &str, source: &str) -> ConversionResult<Self> {
        let raw: RawTable = serde_json::from_str(content).map_err(|error| {
            ConversionError::table_load(format!(
                "failed to parse atomic weight table '{}': {}",
                source, error
            ))
        })?;

        Self::from_records(
            raw.0
                .into_iter()
                .map(|(symbol, weight)| ElementRecord::new(symbol, weight)),
            source,
        )
    }

    fn insert(&mut self, record: ElementRecord) -> ConversionResult<()> {
        if !is_canonical_symbol(&record.symbol) {
            return Err(ConversionError::table_load(format!(
                "atomic weight table '{}' has malformed element symbol '{}'",
                self.source, record.symbol
            )));
        }
        if !record.atomic_weight.is_finite() || record.atomic_weight <= 0.0 {
            return Err(ConversionError::table_load(format!(
                "atomic weight table '{}' has non-positive weight {} for '{}'",
                self.source, record.atomic_weight, record.symbol
            )));
        }
        if self.index.contains_key(&record.symbol) {
            return Err(ConversionError::table_load(format!(
                "atomic weight table '{}' lists element '{}' more than once",
                self.source, record.symbol
            )));
        }

        self.index.insert(record.symbol.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn lookup(&self, symbol: &str) -> ConversionResult<f64> {
        self.record(symbol).map(|record| record.atomic_weight)
    }

    pub fn record(&self, symbol: &str) -> ConversionResult<&ElementRecord> {
        self.index
            .get(symbol)
            .map(|index| &self.records[*index])
            .ok_or_else(|| ConversionError::unknown_element(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Records in data-file order.
    pub fn records(&self) -> impl Iterator<Item = &ElementRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Normalizes user-typed symbols: `fe`, `FE` and ` Fe ` all become `Fe`.
pub fn canonical_symbol(symbol: &str) -> Option<String> {
    let trimmed = symbol.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_SYMBOL_LENGTH
        || !trimmed.chars().all(|c| c.is_ascii_alphabetic())
    {
        return None;
    }

    let mut chars = trimmed.chars();
    let first = chars.next()?.to_ascii_uppercase();
    Some(
        std::iter::once(first)
            .chain(chars.map(|c| c.to_ascii_lowercase()))
            .collect(),
    )
}

pub fn is_canonical_symbol(symbol: &str) -> bool {
    canonical_symbol(symbol).as_deref() == Some(symbol)
}

struct RawTable(Vec<(String, f64)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawTableVisitor;

        impl<'de> Visitor<'de> for RawTableVisitor {
            type Value = RawTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object mapping element symbols to atomic weights")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((symbol, weight)) = access.next_entry::<String, f64>()? {
                    entries.push((symbol, weight));
                }
                Ok(RawTable(entries))
            }
        }

        deserializer.deserialize_map(RawTableVisitor)
    }
}
