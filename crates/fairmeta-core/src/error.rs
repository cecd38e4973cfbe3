//! Unified Error Model
use thiserror::Error;

/// Fatal parse failures. None of them is recovered from: the parse aborts and
/// no partial tree is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Byte count and value presence of a length-framed field disagree.
    #[error("FRAMING/line {line} `{keyword}`: {detail}")]
    Framing {
        line: usize,
        keyword: String,
        detail: String,
    },

    #[error("MISSING/`{field}` in section `{section}` starting at line {line}")]
    MissingRequiredField {
        field: &'static str,
        section: String,
        line: usize,
    },

    #[error("IDENT/line {line} `{keyword}`: {detail} (got `{value}`)")]
    MalformedIdentifier {
        line: usize,
        keyword: &'static str,
        value: String,
        detail: String,
    },

    #[error("GENERATION/{0}")]
    UnrecognizedGeneration(String),
}

impl ParseError {
    pub fn framing(line: usize, keyword: &str, detail: impl Into<String>) -> Self {
        Self::Framing {
            line,
            keyword: keyword.trim_end().to_string(),
            detail: detail.into(),
        }
    }

    pub fn malformed_identifier(
        line: usize,
        keyword: &'static str,
        value: &str,
        detail: impl Into<String>,
    ) -> Self {
        Self::MalformedIdentifier {
            line,
            keyword,
            value: value.to_string(),
            detail: detail.into(),
        }
    }

    /// Short category code, the prefix of the Display form.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Framing { .. } => "FRAMING",
            Self::MissingRequiredField { .. } => "MISSING",
            Self::MalformedIdentifier { .. } => "IDENT",
            Self::UnrecognizedGeneration(_) => "GENERATION",
        }
    }
}
