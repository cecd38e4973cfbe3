//! fairmeta-parser: `scorep.fair` lines to a typed record tree
//!
//! The input is split into trimmed lines once. A master [`Cursor`] walks the
//! lines and dispatches on section headers; every field of a section is then
//! found by its own scan over a fork of the cursor, so field order inside a
//! section does not matter.
//!
//! # Example
//!
//! ```
//! use fairmeta_parser::{parse_metadata_with, Generation, ParseConfig};
//!
//! let text = "object foo.o\ncompiler gcc\nsource-file main.c\nsource-language c\n";
//! let meta = parse_metadata_with(text, &ParseConfig::new(Generation::V1)).unwrap();
//! let objects = &meta.instrumenter.unwrap().objects;
//! assert_eq!(objects[0].source_language, "c");
//! ```

pub mod attributes;
pub mod builder;
pub mod cursor;
pub mod extract;
pub mod generation;
pub mod identifier;
pub mod parser;
pub mod section;

pub use builder::TreeBuilder;
pub use cursor::{split_lines, value_lines, Cursor};
pub use fairmeta_core::{
    AbsentFields, ArtifactKind, EnvMap, Generation, GenerationSelect, Instrumenter,
    LinkedArtifact, Metadata, Object, ParseConfig, ParseError, Runtime,
};
pub use generation::detect_generation;
pub use parser::{parse_metadata, parse_metadata_with};
pub use section::{is_new_section, Section};
