//! scorepmetadata2json: file I/O, logging and JSON output around the parser
use anyhow::{Context, Result};
use fairmeta_core::{Metadata, ParseConfig};
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over the
/// `debug` switch.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));

    // A subscriber may already be set when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Pretty-printed JSON Schema of the root record.
pub fn schema_json() -> Result<String> {
    let schema = schemars::schema_for!(Metadata);
    serde_json::to_string_pretty(&schema).context("Failed to serialize schema")
}

pub fn metadata_json(metadata: &Metadata) -> Result<String> {
    serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")
}

/// Reads and parses the metadata file at `path`.
pub fn parse_file(path: &Path, config: &ParseConfig) -> Result<Metadata> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata file {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), ?config, "parsing metadata file");

    let metadata = match fairmeta_parser::parse_metadata_with(&content, config) {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!(code = err.code(), path = %path.display(), "metadata rejected");
            return Err(err).with_context(|| format!("Failed to parse {}", path.display()));
        }
    };

    let instrumenter = metadata.instrumenter.as_ref();
    info!(
        runtime = metadata.runtime.is_some(),
        linked = ?instrumenter.and_then(|i| i.linked_artifact()).map(|(kind, _)| kind),
        objects = instrumenter.map_or(0, |i| i.objects.len()),
        "metadata parsed"
    );
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairmeta_core::Generation;
    use std::io::Write;

    #[test]
    fn test_schema_describes_root() {
        let schema: serde_json::Value = serde_json::from_str(&schema_json().unwrap()).unwrap();
        assert_eq!(schema["title"], "Metadata");
        assert!(schema["properties"]["runtime"].is_object());
        assert!(schema["properties"]["instrumenter"].is_object());
        assert!(schema["definitions"]["Object"]["required"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("source_language")));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "object a.o\nsource-file a.c\nsource-language c").unwrap();

        let meta = parse_file(file.path(), &ParseConfig::new(Generation::V1)).unwrap();
        let json = metadata_json(&meta).unwrap();
        assert!(json.contains("\"source_language\": \"c\""));
    }

    #[test]
    fn test_parse_error_keeps_its_kind() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "object a.o\ncompiler gcc").unwrap();

        let err = parse_file(file.path(), &ParseConfig::new(Generation::V1)).unwrap_err();
        let parse_err = err.downcast_ref::<fairmeta_core::ParseError>().unwrap();
        assert_eq!(parse_err.code(), "MISSING");
        assert!(format!("{err:#}").contains("MISSING/`source-language`"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file(Path::new("/nonexistent/scorep.fair"), &ParseConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read metadata file"));
    }
}
