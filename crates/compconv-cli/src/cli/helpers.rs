use super::CliError;
use anyhow::Context;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Composition text from the positional argument, an input file, or stdin.
pub(super) fn read_composition_text(
    inline: Option<String>,
    input: Option<&Path>,
) -> Result<String, CliError> {
    if let Some(text) = inline {
        return Ok(text);
    }

    if let Some(path) = input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read composition file '{}'", path.display()))?;
        return Ok(text);
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read composition from stdin")?;
    Ok(text)
}
