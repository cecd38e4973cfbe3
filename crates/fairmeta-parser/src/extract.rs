//! Field extractors.
//!
//! Each extractor takes a cursor by value (a fork), scans forward until the
//! next section boundary or its first satisfying match, and leaves the
//! caller's cursor untouched. Lines holding a `set` value are never matched
//! and never end a scan. `None` means the field did not occur; the tree
//! builder decides how an absent field is represented.

use fairmeta_core::{EnvMap, Generation, ParseError};

use crate::cursor::Cursor;

/// How often a length-framed keyword contributes values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// All values space-separated on one line; the first match ends the scan.
    SingleLineMultipleElements,
    /// The keyword repeats, one value per line, accumulated up to the boundary.
    MultipleLinesSingleElement,
}

/// Treatment of the byte count of a length-framed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteCount {
    /// The count is mandatory and must be zero exactly when no value follows.
    Checked,
    /// The count is optional and never compared with the value.
    Lenient,
}

impl From<Generation> for ByteCount {
    fn from(generation: Generation) -> Self {
        if generation.checks_byte_counts() {
            Self::Checked
        } else {
            Self::Lenient
        }
    }
}

/// A single value and the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub value: String,
    pub line: usize,
}

/// Splits on runs of whitespace into at most `max` parts; the last part keeps
/// the untouched remainder of the line.
pub fn split_fields(line: &str, max: usize) -> Vec<&str> {
    let mut parts = Vec::with_capacity(max);
    let mut rest = line.trim();
    while !rest.is_empty() && max > 0 {
        if parts.len() + 1 == max {
            parts.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(idx) => {
                parts.push(&rest[..idx]);
                rest = rest[idx..].trim_start();
            }
            None => {
                parts.push(rest);
                break;
            }
        }
    }
    parts
}

/// Collects `set`/`unset` directives up to the next boundary. A later
/// directive for the same name overwrites an earlier one.
///
/// V2 carries the value inline (`set NAME VALUE...`, empty when missing); V1
/// puts it on the line following `set NAME`.
pub fn env_block(mut cursor: Cursor<'_>, generation: Generation) -> EnvMap {
    let mut env = EnvMap::new();

    while cursor.has_more() {
        if cursor.at_boundary() {
            break;
        }
        let line = cursor.current();

        if line.starts_with("unset ") {
            if let Some(name) = split_fields(line, 3).get(1) {
                env.insert((*name).to_string(), None);
            }
        } else if line.starts_with("set ") {
            let parts = split_fields(line, 3);
            if let Some(name) = parts.get(1) {
                let value = if generation.inline_env_values() {
                    parts.get(2).copied().unwrap_or("")
                } else {
                    let value = cursor.peek(1);
                    cursor.advance(1);
                    value
                };
                env.insert((*name).to_string(), Some(value.to_string()));
            }
        }

        cursor.advance(1);
    }

    env
}

/// Reads `<keyword> <byte-count> [<value...>]` fields.
///
/// The byte count only signals presence. Under [`ByteCount::Checked`] a zero
/// count with a value, a non-zero count without one, or a missing or
/// non-numeric count is a framing error.
pub fn length_framed(
    mut cursor: Cursor<'_>,
    keyword: &str,
    repeat: Repeat,
    byte_count: ByteCount,
) -> Result<Option<Vec<String>>, ParseError> {
    let mut values = Vec::new();

    while cursor.has_more() {
        if cursor.at_boundary() {
            break;
        }

        if let Some(line) = cursor.structural().filter(|line| line.starts_with(keyword)) {
            let value = match byte_count {
                ByteCount::Checked => checked_value(line, keyword, cursor.line_number())?,
                ByteCount::Lenient => lenient_value(line),
            };

            if let Some(value) = value {
                match repeat {
                    Repeat::SingleLineMultipleElements => {
                        return Ok(Some(
                            value.split_whitespace().map(str::to_string).collect(),
                        ));
                    }
                    Repeat::MultipleLinesSingleElement => values.push(value.trim().to_string()),
                }
            }
        }

        cursor.advance(1);
    }

    Ok(if values.is_empty() { None } else { Some(values) })
}

fn checked_value<'l>(
    line: &'l str,
    keyword: &str,
    line_no: usize,
) -> Result<Option<&'l str>, ParseError> {
    let parts = split_fields(line, 3);
    let count = parts
        .get(1)
        .ok_or_else(|| ParseError::framing(line_no, keyword, "missing byte count"))?;
    let count: usize = count.parse().map_err(|_| {
        ParseError::framing(line_no, keyword, format!("byte count `{count}` is not a number"))
    })?;
    let value = parts.get(2).copied();

    match (count, value) {
        (0, Some(_)) => Err(ParseError::framing(
            line_no,
            keyword,
            "byte count 0 but a value follows",
        )),
        (n, None) if n != 0 => Err(ParseError::framing(
            line_no,
            keyword,
            format!("byte count {n} but no value follows"),
        )),
        _ => Ok(value),
    }
}

fn lenient_value(line: &str) -> Option<&str> {
    match split_fields(line, 3).as_slice() {
        [_, count] if count.parse::<usize>().is_ok() => None,
        [_, count, rest] if count.parse::<usize>().is_ok() => Some(*rest),
        [_, _, ..] => split_fields(line, 2).get(1).copied(),
        _ => None,
    }
}

/// Second token of every line starting with `keyword`, up to the boundary.
/// No byte-count framing.
pub fn repeated_keyword(mut cursor: Cursor<'_>, keyword: &str) -> Option<Vec<String>> {
    let mut values = Vec::new();

    while cursor.has_more() {
        if cursor.at_boundary() {
            break;
        }
        if let Some(line) = cursor.structural().filter(|line| line.starts_with(keyword)) {
            if let Some(token) = line.split_whitespace().nth(1) {
                values.push(token.to_string());
            }
        }
        cursor.advance(1);
    }

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// First unframed value of `keyword`: `kw VALUE` yields `VALUE`, `kw N
/// VALUE...` yields the tail after the second token.
pub fn first_value(mut cursor: Cursor<'_>, keyword: &str) -> Option<Found> {
    while cursor.has_more() {
        if cursor.at_boundary() {
            break;
        }
        if let Some(line) = cursor.structural().filter(|line| line.starts_with(keyword)) {
            let parts = split_fields(line, 3);
            if parts.len() >= 2 {
                return parts.last().map(|value| Found {
                    value: (*value).to_string(),
                    line: cursor.line_number(),
                });
            }
        }
        cursor.advance(1);
    }
    None
}
