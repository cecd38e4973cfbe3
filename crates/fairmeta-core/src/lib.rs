//! fairmeta core: record tree, error model and parse configuration
//!
//! Shared by the line parser and the `scorepmetadata2json` front end. Holds no
//! parsing logic of its own.

pub mod context;
pub mod data_model;
pub mod error;

pub use context::{AbsentFields, Generation, GenerationSelect, ParseConfig};
pub use data_model::{
    ArtifactKind, EnvMap, Instrumenter, LinkedArtifact, Metadata, Object, Runtime,
    ABSENT_SENTINEL,
};
pub use error::ParseError;

/// Version of the fairmeta toolchain
pub const FAIRMETA_VERSION: &str = env!("CARGO_PKG_VERSION");
