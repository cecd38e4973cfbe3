//! Section headers and the boundary predicate shared by every scan.

/// Top-level and nested section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Source,
    Object,
    SharedLibrary,
    StaticLibrary,
    Executable,
    Runtime,
    Instrumenter,
}

/// Header keywords. The trailing space of multi-word headers is significant:
/// `object-file` must not open an `object ` section.
const SECTION_KEYWORDS: [(&str, Section); 7] = [
    ("source ", Section::Source),
    ("object ", Section::Object),
    ("shared-library ", Section::SharedLibrary),
    ("static-library ", Section::StaticLibrary),
    ("executable ", Section::Executable),
    ("runtime", Section::Runtime),
    ("instrumenter", Section::Instrumenter),
];

impl Section {
    /// Whether the dispatcher builds a record from this section.
    pub fn bears_record(self) -> bool {
        matches!(
            self,
            Self::Runtime | Self::Executable | Self::SharedLibrary | Self::Object
        )
    }
}

/// Prefix match of `keyword` on a trimmed line. A header keyword with a
/// trailing space also matches the bare word, since trimming removed the
/// space of an argument-less header such as `object`.
pub fn matches_keyword(line: &str, keyword: &str) -> bool {
    line.starts_with(keyword) || (keyword.ends_with(' ') && line == keyword.trim_end())
}

pub fn classify(line: &str) -> Option<Section> {
    SECTION_KEYWORDS
        .iter()
        .find(|(keyword, _)| matches_keyword(line, keyword))
        .map(|(_, section)| *section)
}

/// True when `line` opens a new section and ends any field scan.
pub fn is_new_section(line: &str) -> bool {
    classify(line).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        assert_eq!(classify("object foo.o"), Some(Section::Object));
        assert_eq!(classify("object"), Some(Section::Object));
        assert_eq!(classify("executable a.out"), Some(Section::Executable));
        assert_eq!(classify("shared-library libfoo.so"), Some(Section::SharedLibrary));
        assert_eq!(classify("static-library libfoo.a"), Some(Section::StaticLibrary));
        assert_eq!(classify("runtime"), Some(Section::Runtime));
        assert_eq!(classify("instrumenter"), Some(Section::Instrumenter));
        assert_eq!(classify("source main.c"), Some(Section::Source));
    }

    #[test]
    fn test_field_keywords_are_not_boundaries() {
        for line in [
            "object-file 5 foo.o",
            "source-file 6 main.c",
            "source-language c",
            "executable-name",
            "compiler 3 gcc",
            "set PATH /usr/bin",
            "",
        ] {
            assert!(!is_new_section(line), "false boundary: {line}");
        }
    }

    #[test]
    fn test_record_sections() {
        assert!(Section::Object.bears_record());
        assert!(!Section::Instrumenter.bears_record());
        assert!(!Section::StaticLibrary.bears_record());
    }
}
