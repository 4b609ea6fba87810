//! JSON rendering of a conversion result.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Conversion;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a conversion result to JSON.
pub fn to_json(conversion: &Conversion, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(conversion),
        JsonFormat::Compact => serde_json::to_string(conversion),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize and write a conversion result to `path`.
///
/// Serialization happens before the file is touched, so a failed render
/// never leaves a partial file behind.
pub fn write_json(conversion: &Conversion, path: impl AsRef<Path>, format: JsonFormat) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(conversion, format)?;
    fs::write(path, json).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Body, Chapter, Metadata};

    fn sample() -> Conversion {
        let mut metadata = Metadata::new();
        metadata.insert("Title", "Test");
        let mut chapter = Chapter::new("Intro", 0, 0);
        chapter.pages.push("Hello".to_string());
        Conversion::new(metadata, Body::Chapters(vec![chapter]))
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"Title\""));
        assert!(json.contains("\"chapters\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&sample(), &path, JsonFormat::Pretty).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["Title"], "Test");
        assert_eq!(value["chapters"][0]["pages"][0], "Hello");
    }

    #[test]
    fn test_write_json_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = write_json(&sample(), &path, JsonFormat::Compact).unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
        assert!(!path.exists());
    }
}
