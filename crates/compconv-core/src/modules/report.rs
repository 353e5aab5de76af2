use super::serialization::{format_left_f64, normalize_text_artifact};
use crate::domain::{Composition, ConversionDirection, ConversionError, ConversionResult};
use serde::Serialize;

pub const DEFAULT_PRECISION: usize = 4;
pub const MAX_PRECISION: usize = 12;

const SYMBOL_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 15;
const RULE_WIDTH: usize = 45;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub symbol: String,
    pub input: f64,
    pub output: f64,
}

/// Input and converted percentages side by side, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub direction: ConversionDirection,
    pub from: &'static str,
    pub to: &'static str,
    pub rows: Vec<ReportRow>,
}

impl ConversionReport {
    pub fn new(
        direction: ConversionDirection,
        input: &Composition,
        output: &Composition,
    ) -> ConversionResult<Self> {
        if input.len() != output.len() {
            return Err(ConversionError::internal(format!(
                "converted composition has {} entries for {} inputs",
                output.len(),
                input.len()
            )));
        }

        let rows = input
            .iter()
            .zip(output.iter())
            .map(|(source, converted)| {
                if source.symbol != converted.symbol {
                    return Err(ConversionError::internal(format!(
                        "converted entry '{}' does not line up with input '{}'",
                        converted.symbol, source.symbol
                    )));
                }
                Ok(ReportRow {
                    symbol: source.symbol.clone(),
                    input: source.percent,
                    output: converted.percent,
                })
            })
            .collect::<ConversionResult<Vec<_>>>()?;

        Ok(Self {
            direction,
            from: direction.source().as_str(),
            to: direction.target().as_str(),
            rows,
        })
    }

    pub fn render_table(&self, precision: usize) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format!(
            "{:<sw$} | {:<vw$} | {:<vw$}",
            "Element",
            self.from,
            self.to,
            sw = SYMBOL_WIDTH,
            vw = VALUE_WIDTH
        ));
        lines.push("-".repeat(RULE_WIDTH));

        for row in &self.rows {
            lines.push(format!(
                "{:<sw$} | {} | {}",
                row.symbol,
                format_left_f64(row.input, VALUE_WIDTH, precision),
                format_left_f64(row.output, VALUE_WIDTH, precision),
                sw = SYMBOL_WIDTH
            ));
        }

        let trimmed: Vec<&str> = lines.iter().map(|line| line.trim_end()).collect();
        normalize_text_artifact(&trimmed.join("\n"))
    }

    pub fn to_json(&self) -> ConversionResult<String> {
        serde_json::to_string_pretty(self).map_err(|error| {
            ConversionError::internal(format!("failed to serialize conversion report: {}", error))
        })
    }
}
