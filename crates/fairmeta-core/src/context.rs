//! Parse Context: grammar generation and absent-field policy
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data_model::{EnvMap, ABSENT_SENTINEL};

/// Revision of the metadata line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// `instrumenter` container, next-line env values, unchecked byte counts,
    /// no identifiers.
    V1,
    /// `run-id`/`compile-id` identifiers, inline env values, checked byte
    /// counts.
    V2,
}

impl Generation {
    pub fn has_identifiers(self) -> bool {
        matches!(self, Self::V2)
    }

    pub fn checks_byte_counts(self) -> bool {
        matches!(self, Self::V2)
    }

    pub fn inline_env_values(self) -> bool {
        matches!(self, Self::V2)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

/// How the parser picks a [`Generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSelect {
    /// Detect from distinguishing markers in the input.
    #[default]
    Auto,
    Fixed(Generation),
}

/// Representation of list fields that had no value in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentFields {
    /// Legacy shape: a one-element list holding an empty string.
    #[default]
    Sentinel,
    /// `null` for absent lists and for empty environment maps.
    Null,
}

impl AbsentFields {
    pub fn list(self, values: Option<Vec<String>>) -> Option<Vec<String>> {
        match (self, values) {
            (_, Some(values)) => Some(values),
            (Self::Sentinel, None) => Some(vec![ABSENT_SENTINEL.to_string()]),
            (Self::Null, None) => None,
        }
    }

    pub fn env(self, env: EnvMap) -> Option<EnvMap> {
        match self {
            Self::Null if env.is_empty() => None,
            _ => Some(env),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseConfig {
    #[serde(default)]
    pub generation: GenerationSelect,
    #[serde(default)]
    pub absent_fields: AbsentFields,
}

impl ParseConfig {
    pub fn new(generation: Generation) -> Self {
        Self::default().with_generation(generation)
    }

    pub fn with_generation(mut self, generation: Generation) -> Self {
        self.generation = GenerationSelect::Fixed(generation);
        self
    }

    pub fn with_absent_fields(mut self, absent_fields: AbsentFields) -> Self {
        self.absent_fields = absent_fields;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_policy() {
        assert_eq!(AbsentFields::Sentinel.list(None), Some(vec![String::new()]));
        assert_eq!(AbsentFields::Null.list(None), None);
        assert_eq!(
            AbsentFields::Null.list(Some(vec!["-O2".to_string()])),
            Some(vec!["-O2".to_string()])
        );
    }

    #[test]
    fn test_empty_env_policy() {
        assert_eq!(AbsentFields::Sentinel.env(EnvMap::new()), Some(EnvMap::new()));
        assert_eq!(AbsentFields::Null.env(EnvMap::new()), None);
    }

    #[test]
    fn test_config_from_json() {
        let config: ParseConfig =
            serde_json::from_str(r#"{"generation": {"fixed": "v2"}, "absent_fields": "null"}"#)
                .unwrap();
        assert_eq!(config, ParseConfig::new(Generation::V2).with_absent_fields(AbsentFields::Null));

        let defaults: ParseConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, ParseConfig::default());
    }
}
