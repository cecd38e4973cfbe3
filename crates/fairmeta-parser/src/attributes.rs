//! Attribute block shared by runtime, link and object sections.
use fairmeta_core::{EnvMap, Generation, ParseError};

use crate::cursor::Cursor;
use crate::extract::{env_block, length_framed, ByteCount, Repeat};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonAttributes {
    pub env: EnvMap,
    pub compiler: Option<String>,
    pub define_flags: Option<Vec<String>>,
    pub compiler_flags: Option<Vec<String>>,
    pub library_files: Option<Vec<String>>,
}

/// Runs one extractor per attribute, each on its own fork of `cursor`, so the
/// attributes may appear in any order inside the section.
pub fn parse_common_attributes(
    cursor: Cursor<'_>,
    generation: Generation,
) -> Result<CommonAttributes, ParseError> {
    let framing = ByteCount::from(generation);
    let single = Repeat::SingleLineMultipleElements;

    let compiler = length_framed(cursor.fork(), "compiler ", single, framing)?
        .and_then(|words| words.into_iter().next());

    Ok(CommonAttributes {
        env: env_block(cursor.fork(), generation),
        compiler,
        define_flags: length_framed(cursor.fork(), "define-flags ", single, framing)?,
        compiler_flags: length_framed(cursor.fork(), "compiler-flags ", single, framing)?,
        library_files: length_framed(cursor.fork(), "library-files ", single, framing)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::split_lines;

    #[test]
    fn test_field_order_is_irrelevant() {
        let forward = split_lines(
            "set CC gcc\ncompiler 3 gcc\ndefine-flags 6 -DX -DY\ncompiler-flags 3 -O2\nlibrary-files 0",
        );
        let backward = split_lines(
            "library-files 0\ncompiler-flags 3 -O2\ndefine-flags 6 -DX -DY\ncompiler 3 gcc\nset CC gcc",
        );

        let a = parse_common_attributes(Cursor::new(&forward), Generation::V2).unwrap();
        let b = parse_common_attributes(Cursor::new(&backward), Generation::V2).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.compiler.as_deref(), Some("gcc"));
        assert_eq!(a.define_flags, Some(vec!["-DX".to_string(), "-DY".to_string()]));
        assert_eq!(a.library_files, None);
        assert_eq!(a.env["CC"], Some("gcc".to_string()));
    }

    #[test]
    fn test_scan_stops_at_next_section() {
        let lines = split_lines("compiler-flags 0\nobject b.o\ncompiler 5 clang\ncompiler-flags 3 -O3");
        let attrs = parse_common_attributes(Cursor::new(&lines), Generation::V2).unwrap();
        assert_eq!(attrs.compiler, None);
        assert_eq!(attrs.compiler_flags, None);
    }

    #[test]
    fn test_framing_error_propagates() {
        let lines = split_lines("compiler 3 gcc\ndefine-flags 0 -DX");
        let err = parse_common_attributes(Cursor::new(&lines), Generation::V2).unwrap_err();
        assert!(matches!(err, ParseError::Framing { line: 2, .. }));

        // V1 does not check byte counts
        let attrs = parse_common_attributes(Cursor::new(&lines), Generation::V1).unwrap();
        assert_eq!(attrs.define_flags, Some(vec!["-DX".to_string()]));
    }
}
