//! Top-level dispatcher over section headers.
use fairmeta_core::{ArtifactKind, Generation, Metadata, ParseConfig, ParseError};
use tracing::{debug, trace};

use crate::attributes::parse_common_attributes;
use crate::builder::{LinkedDraft, ObjectDraft, RuntimeDraft, TreeBuilder};
use crate::cursor::{split_lines, value_lines, Cursor};
use crate::extract::{first_value, length_framed, repeated_keyword, ByteCount, Repeat};
use crate::generation::detect_generation;
use crate::identifier::{parse_identifier, Identifier};
use crate::section::{classify, Section};

/// Parses a whole metadata file with the default configuration
/// (auto-detected generation, legacy absent-field shape).
pub fn parse_metadata(text: &str) -> Result<Metadata, ParseError> {
    parse_metadata_with(text, &ParseConfig::default())
}

pub fn parse_metadata_with(text: &str, config: &ParseConfig) -> Result<Metadata, ParseError> {
    let lines = split_lines(text);
    let generation = detect_generation(&lines, config.generation)?;
    let values = if generation.inline_env_values() {
        Vec::new()
    } else {
        value_lines(&lines)
    };

    let mut cursor = Cursor::with_values(&lines, &values);
    let mut tree = TreeBuilder::new(config.absent_fields);

    while cursor.has_more() {
        let line = cursor.current();
        let header_line = cursor.line_number();

        match cursor.structural().and_then(classify) {
            Some(Section::Runtime) => {
                debug!(line_no = header_line, "parsing runtime");
                cursor.advance(1);
                tree.runtime(parse_runtime(cursor, generation, header_line)?);
            }
            Some(section @ (Section::Executable | Section::SharedLibrary)) => {
                let kind = if section == Section::Executable {
                    ArtifactKind::Executable
                } else {
                    ArtifactKind::SharedLibrary
                };
                debug!(line_no = header_line, %kind, "parsing '{line}'");
                cursor.advance(1);
                tree.linked(parse_linked(cursor, kind, generation, header_line)?);
            }
            Some(Section::Object) => {
                debug!(line_no = header_line, "parsing object '{line}'");
                cursor.advance(1);
                tree.object(parse_object(cursor, line, generation, header_line)?);
            }
            _ => {
                trace!(line_no = header_line, "skipping '{line}'");
                cursor.advance(1);
            }
        }
    }

    Ok(tree.finish())
}

fn parse_runtime(
    cursor: Cursor<'_>,
    generation: Generation,
    header_line: usize,
) -> Result<RuntimeDraft, ParseError> {
    Ok(RuntimeDraft {
        attributes: parse_common_attributes(cursor, generation)?,
        ident: identifier(cursor, "run-id", generation, header_line)?,
    })
}

fn parse_linked(
    cursor: Cursor<'_>,
    kind: ArtifactKind,
    generation: Generation,
    header_line: usize,
) -> Result<LinkedDraft, ParseError> {
    let object_files = match ByteCount::from(generation) {
        ByteCount::Checked => length_framed(
            cursor.fork(),
            "object-file ",
            Repeat::MultipleLinesSingleElement,
            ByteCount::Checked,
        )?,
        ByteCount::Lenient => repeated_keyword(cursor.fork(), "object-file "),
    };

    Ok(LinkedDraft {
        kind,
        attributes: parse_common_attributes(cursor, generation)?,
        object_files,
        ident: identifier(cursor, "compile-id", generation, header_line)?,
    })
}

fn parse_object(
    cursor: Cursor<'_>,
    header: &str,
    generation: Generation,
    header_line: usize,
) -> Result<ObjectDraft, ParseError> {
    let attributes = parse_common_attributes(cursor, generation)?;

    let source_files = match ByteCount::from(generation) {
        ByteCount::Checked => length_framed(
            cursor.fork(),
            "source-file",
            Repeat::SingleLineMultipleElements,
            ByteCount::Checked,
        )?,
        ByteCount::Lenient => repeated_keyword(cursor.fork(), "source-file"),
    };

    let source_language = first_value(cursor.fork(), "source-language")
        .map(|found| found.value)
        .ok_or_else(|| ParseError::MissingRequiredField {
            field: "source-language",
            section: header.to_string(),
            line: header_line,
        })?;

    Ok(ObjectDraft {
        attributes,
        source_files,
        source_language,
        ident: identifier(cursor, "compile-id", generation, header_line)?,
    })
}

/// Reads the identifier of a section in generations that carry one. A
/// missing identifier line is reported like an empty identifier, at the
/// section header.
fn identifier(
    cursor: Cursor<'_>,
    keyword: &'static str,
    generation: Generation,
    header_line: usize,
) -> Result<Option<Identifier>, ParseError> {
    if !generation.has_identifiers() {
        return Ok(None);
    }
    let (value, line) = first_value(cursor.fork(), keyword)
        .map(|found| (found.value, found.line))
        .unwrap_or_default();
    let line = if line == 0 { header_line } else { line };
    parse_identifier(&value, keyword, line).map(Some)
}
