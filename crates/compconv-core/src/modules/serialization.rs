use std::fs;
use std::path::Path;

pub fn format_left_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:<width$.precision$}",
        width = width,
        precision = precision
    )
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, normalize_text_artifact(content))
}

#[cfg(test)]
mod tests {
    use super::{format_left_f64, normalize_text_artifact, write_text_artifact};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn left_aligned_float_formatting_pads_to_width() {
        assert_eq!(format_left_f64(1.23, 10, 2), "1.23      ");
        assert_eq!(format_left_f64(55.845, 3, 1), "55.8");
    }

    #[test]
    fn normalize_text_artifact_uses_canonical_line_endings() {
        let normalized = normalize_text_artifact("alpha\r\nbeta\rgamma");
        assert_eq!(normalized, "alpha\nbeta\ngamma\n");
        assert_eq!(normalize_text_artifact(""), "");
    }

    #[test]
    fn text_writes_create_parent_directories() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("nested/report.txt");

        write_text_artifact(&path, "Fe | 50\r\nC | 50").expect("write should succeed");
        let written = fs::read(&path).expect("artifact should be readable");

        assert_eq!(written, b"Fe | 50\nC | 50\n");
    }
}
