//! Data Model: Metadata, Runtime, Instrumenter, LinkedArtifact, Object
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Single element of the legacy "field absent" list shape (`[""]`).
pub const ABSENT_SENTINEL: &str = "";

/// Environment variables of a section. `None` marks an `unset` directive.
pub type EnvMap = BTreeMap<String, Option<String>>;

/// Root of a parsed `scorep.fair` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    /// The runtime metadata.
    pub runtime: Option<Runtime>,
    /// The instrumenter metadata.
    pub instrumenter: Option<Instrumenter>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.runtime.is_none() && self.instrumenter.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Runtime {
    /// The run id.
    pub id: Option<String>,
    /// The time of execution, taken from the run id.
    pub date: Option<DateTime<Utc>>,
    /// The environment variables.
    pub env: Option<EnvMap>,
}

/// Link step of the instrumented build. At most one of `executable` and
/// `shared_library` is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Instrumenter {
    /// The executable metadata.
    pub executable: Option<LinkedArtifact>,
    /// The shared library metadata.
    pub shared_library: Option<LinkedArtifact>,
    /// The object metadata, in input order.
    #[serde(rename = "object")]
    pub objects: Vec<Object>,
}

impl Instrumenter {
    /// Builds an instrumenter with the linked artifact placed in the slot of its kind.
    pub fn new(linked: Option<(ArtifactKind, LinkedArtifact)>, objects: Vec<Object>) -> Self {
        let (executable, shared_library) = match linked {
            Some((ArtifactKind::Executable, artifact)) => (Some(artifact), None),
            Some((ArtifactKind::SharedLibrary, artifact)) => (None, Some(artifact)),
            None => (None, None),
        };
        Self {
            executable,
            shared_library,
            objects,
        }
    }

    pub fn linked_artifact(&self) -> Option<(ArtifactKind, &LinkedArtifact)> {
        match (&self.executable, &self.shared_library) {
            (Some(exe), _) => Some((ArtifactKind::Executable, exe)),
            (None, Some(lib)) => Some((ArtifactKind::SharedLibrary, lib)),
            (None, None) => None,
        }
    }
}

/// Which linked-artifact slot a link section fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Executable,
    SharedLibrary,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Executable => write!(f, "executable"),
            Self::SharedLibrary => write!(f, "shared-library"),
        }
    }
}

/// An executable or shared library produced by the link step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LinkedArtifact {
    /// The compile id.
    pub id: Option<String>,
    /// The time of linking.
    pub date: Option<DateTime<Utc>>,
    /// The compiler name.
    pub compiler: String,
    /// The define flags.
    pub define_flags: Option<Vec<String>>,
    /// The compiler flags.
    pub compiler_flags: Option<Vec<String>>,
    /// The library files.
    pub library_files: Option<Vec<String>>,
    /// The object files.
    pub object_files: Option<Vec<String>>,
    /// The environment variables.
    pub env: Option<EnvMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Object {
    /// The compile id.
    pub id: Option<String>,
    /// The time of compilation.
    pub date: Option<DateTime<Utc>>,
    /// The compiler name.
    pub compiler: String,
    /// The source language.
    pub source_language: String,
    /// The define flags.
    pub define_flags: Option<Vec<String>>,
    /// The compiler flags.
    pub compiler_flags: Option<Vec<String>>,
    /// The library files.
    pub library_files: Option<Vec<String>>,
    /// The source files.
    pub source_files: Option<Vec<String>>,
    /// The environment variables.
    pub env: Option<EnvMap>,
}
