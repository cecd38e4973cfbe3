//! Tree Builder: collects dispatched sections into the root record.
use chrono::{DateTime, Utc};
use fairmeta_core::{
    AbsentFields, ArtifactKind, Instrumenter, LinkedArtifact, Metadata, Object, Runtime,
};
use tracing::warn;

use crate::attributes::CommonAttributes;
use crate::identifier::Identifier;

/// Fields of a `runtime` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeDraft {
    pub attributes: CommonAttributes,
    pub ident: Option<Identifier>,
}

/// Fields of an `executable ` or `shared-library ` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedDraft {
    pub kind: ArtifactKind,
    pub attributes: CommonAttributes,
    pub object_files: Option<Vec<String>>,
    pub ident: Option<Identifier>,
}

/// Fields of an `object ` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDraft {
    pub attributes: CommonAttributes,
    pub source_files: Option<Vec<String>>,
    pub source_language: String,
    pub ident: Option<Identifier>,
}

/// Accumulator threaded through the dispatcher loop.
#[derive(Debug)]
pub struct TreeBuilder {
    absent: AbsentFields,
    runtime: Option<Runtime>,
    linked: Option<(ArtifactKind, LinkedArtifact)>,
    objects: Vec<Object>,
}

impl TreeBuilder {
    pub fn new(absent: AbsentFields) -> Self {
        Self {
            absent,
            runtime: None,
            linked: None,
            objects: Vec::new(),
        }
    }

    pub fn runtime(&mut self, draft: RuntimeDraft) {
        if self.runtime.is_some() {
            warn!("second runtime section replaces the first");
        }
        let (id, date) = split_ident(draft.ident);
        self.runtime = Some(Runtime {
            id,
            date,
            env: self.absent.env(draft.attributes.env),
        });
    }

    /// Records a link section. A later one replaces an earlier one, and its
    /// kind decides the instrumenter slot.
    pub fn linked(&mut self, draft: LinkedDraft) {
        if let Some((previous, _)) = &self.linked {
            warn!(%previous, replacement = %draft.kind, "linked artifact replaced by a later section");
        }
        let (id, date) = split_ident(draft.ident);
        let attrs = draft.attributes;
        let artifact = LinkedArtifact {
            id,
            date,
            compiler: attrs.compiler.unwrap_or_default(),
            define_flags: self.absent.list(attrs.define_flags),
            compiler_flags: self.absent.list(attrs.compiler_flags),
            library_files: self.absent.list(attrs.library_files),
            object_files: self.absent.list(draft.object_files),
            env: self.absent.env(attrs.env),
        };
        self.linked = Some((draft.kind, artifact));
    }

    pub fn object(&mut self, draft: ObjectDraft) {
        let (id, date) = split_ident(draft.ident);
        let attrs = draft.attributes;
        self.objects.push(Object {
            id,
            date,
            compiler: attrs.compiler.unwrap_or_default(),
            source_language: draft.source_language,
            define_flags: self.absent.list(attrs.define_flags),
            compiler_flags: self.absent.list(attrs.compiler_flags),
            library_files: self.absent.list(attrs.library_files),
            source_files: self.absent.list(draft.source_files),
            env: self.absent.env(attrs.env),
        });
    }

    /// The instrumenter exists once a link section or an object was seen.
    pub fn finish(self) -> Metadata {
        let instrumenter = if self.linked.is_some() || !self.objects.is_empty() {
            Some(Instrumenter::new(self.linked, self.objects))
        } else {
            None
        };

        Metadata {
            runtime: self.runtime,
            instrumenter,
        }
    }
}

fn split_ident(ident: Option<Identifier>) -> (Option<String>, Option<DateTime<Utc>>) {
    match ident {
        Some(Identifier { id, date }) => (Some(id), Some(date)),
        None => (None, None),
    }
}
