use super::helpers::read_composition_text;
use super::{CliError, ConvertArgs, ElementsArgs, OutputFormat};
use crate::config::{ConvertSettings, TableSource};
use anyhow::Context;
use compconv_core::common::canonical_symbol;
use compconv_core::domain::{
    CompositionUnit, ConversionDirection, ConversionError, ElementRecord,
};
use compconv_core::modules::serialization::write_text_artifact;
use compconv_core::modules::{ConversionReport, convert};
use compconv_core::parser::parse_composition;
use tracing::{debug, info};

pub(super) fn run_convert_command(args: ConvertArgs) -> Result<i32, CliError> {
    let direction = ConversionDirection::from_source(CompositionUnit::from(args.from));
    let settings = ConvertSettings::resolve(
        TableSource::from_env(args.weights),
        args.tolerance,
        args.precision,
    )?;
    let table = settings.table.load()?;

    let text = read_composition_text(args.composition, args.input.as_deref())?;
    let composition = parse_composition(&text)?;
    debug!(elements = composition.len(), total = composition.total(), "parsed composition");

    info!(%direction, "converting composition");
    let converted = convert(&table, &composition, direction, &settings.options)?;
    let report = ConversionReport::new(direction, &composition, &converted)?;

    let rendered = match args.format {
        OutputFormat::Table => report.render_table(settings.precision),
        OutputFormat::Json => report.to_json()?,
    };

    match args.output {
        Some(path) => {
            write_text_artifact(&path, &rendered)
                .with_context(|| format!("failed to write report '{}'", path.display()))?;
            println!("Report: {}", path.display());
        }
        None => print!("{}", terminated(rendered)),
    }

    Ok(0)
}

pub(super) fn run_elements_command(args: ElementsArgs) -> Result<i32, CliError> {
    let table = TableSource::from_env(args.weights).load()?;

    let records: Vec<ElementRecord> = if args.symbols.is_empty() {
        table.records().cloned().collect()
    } else {
        args.symbols
            .iter()
            .map(|symbol| {
                let canonical = canonical_symbol(symbol)
                    .ok_or_else(|| ConversionError::unknown_element(symbol))?;
                table.record(&canonical).cloned()
            })
            .collect::<Result<_, _>>()?
    };

    let rendered = match args.format {
        OutputFormat::Table => records
            .iter()
            .map(|record| format!("{:<4}{}", record.symbol, record.atomic_weight))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&records)
            .context("failed to serialize element records")?,
    };

    print!("{}", terminated(rendered));
    Ok(0)
}

fn terminated(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
