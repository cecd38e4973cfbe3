//! Grammar generation selection.
use fairmeta_core::{Generation, GenerationSelect, ParseError};
use tracing::debug;

use crate::cursor::value_lines;
use crate::section::{classify, Section};

const V2_MARKERS: [&str; 2] = ["run-id", "compile-id"];

/// Resolves the generation to parse `lines` with.
///
/// A fixed selection is returned as is. Under [`GenerationSelect::Auto`],
/// identifier lines mark V2 and an `instrumenter` header marks V1; seeing both
/// or neither is an error, except that input without any record-bearing
/// section parses as V1 (to an empty tree). Lines that would hold a next-line
/// `set` value are not scanned for markers.
pub fn detect_generation(
    lines: &[&str],
    select: GenerationSelect,
) -> Result<Generation, ParseError> {
    if let GenerationSelect::Fixed(generation) = select {
        return Ok(generation);
    }

    let mut v1_marker = None;
    let mut v2_marker = None;
    let mut has_records = false;

    let values = value_lines(lines);
    for (idx, (line, is_value)) in lines.iter().zip(values).enumerate() {
        if is_value {
            continue;
        }
        match classify(line) {
            Some(Section::Instrumenter) => {
                v1_marker.get_or_insert(idx + 1);
            }
            Some(section) if section.bears_record() => has_records = true,
            _ => {
                if V2_MARKERS.iter().any(|marker| line.starts_with(marker)) {
                    v2_marker.get_or_insert(idx + 1);
                }
            }
        }
    }

    let generation = match (v1_marker, v2_marker) {
        (Some(v1), Some(v2)) => {
            return Err(ParseError::UnrecognizedGeneration(format!(
                "input mixes an `instrumenter` header (line {v1}) with identifier lines (line {v2})"
            )))
        }
        (Some(_), None) => Generation::V1,
        (None, Some(_)) => Generation::V2,
        (None, None) if !has_records => Generation::V1,
        (None, None) => {
            return Err(ParseError::UnrecognizedGeneration(
                "no `instrumenter` header and no `run-id`/`compile-id` lines; select a generation explicitly"
                    .to_string(),
            ))
        }
    };

    debug!(%generation, "detected metadata generation");
    Ok(generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::split_lines;

    fn detect(text: &str) -> Result<Generation, ParseError> {
        detect_generation(&split_lines(text), GenerationSelect::Auto)
    }

    #[test]
    fn test_fixed_selection_skips_detection() {
        let lines = split_lines("instrumenter\ncompile-id a_b_c");
        assert_eq!(
            detect_generation(&lines, GenerationSelect::Fixed(Generation::V2)),
            Ok(Generation::V2)
        );
    }

    #[test]
    fn test_markers() {
        assert_eq!(detect("runtime\nrun-id a_b_2024-01-01"), Ok(Generation::V2));
        assert_eq!(detect("instrumenter\nobject a.o\nsource-language c"), Ok(Generation::V1));
    }

    #[test]
    fn test_mixed_markers() {
        let err = detect("instrumenter\nobject a.o\ncompile-id a_b_c").unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_markers_inside_set_values() {
        assert_eq!(
            detect("instrumenter\nruntime\nset NOTE\ncompile-id is set elsewhere"),
            Ok(Generation::V1)
        );
        assert!(matches!(
            detect("runtime\nset A\ninstrumenter\nobject a.o\nsource-language c"),
            Err(ParseError::UnrecognizedGeneration(_))
        ));
    }

    #[test]
    fn test_no_markers() {
        assert!(matches!(
            detect("runtime\nset A 1"),
            Err(ParseError::UnrecognizedGeneration(_))
        ));
        assert_eq!(detect(""), Ok(Generation::V1));
        assert_eq!(detect("garbage\nmore garbage"), Ok(Generation::V1));
    }
}
