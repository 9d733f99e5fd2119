#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data model for ffiglue binding metadata.
//!
//! Two layers:
//! - **Deserialization layer** (`metadata`): 1:1 mapping to the `bindings.json`
//!   artifact written by the native build
//! - **Model layer** (`types`, `decl`, `module`): validated, normalized
//!   structures consumed by the code generator
//!
//! Plus the byte-level wire formats shared by both sides of the boundary
//! (`wire`) and the metadata artifact lifecycle (`artifact`).

use std::path::PathBuf;

pub mod artifact;
pub mod decl;
pub mod layout;
pub mod metadata;
pub mod module;
pub mod normalize;
pub mod types;
pub mod utils;
pub mod wire;

#[cfg(test)]
mod module_tests;
#[cfg(test)]
mod types_tests;

pub use artifact::{ArtifactState, METADATA_DIR_ENV, METADATA_FILE, MetadataArtifact};
pub use decl::{DeclKind, Encoding, StructDecl, TypeDecl, UnionDecl, Variant};
pub use layout::{FieldSlot, Layout};
pub use metadata::RawMetadata;
pub use module::{
    BindingModule, BindingModuleBuilder, ByteOrder, DeclSet, LibraryLocation, ModuleOptions,
    Profile, Signature,
};
pub use normalize::SignatureNormalizer;
pub use types::{Primitive, TypeRef};

/// Errors raised while building a binding module from metadata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid metadata: {0}")]
    Metadata(String),

    #[error("duplicate type declaration `{0}`")]
    DuplicateType(String),

    #[error("duplicate function `{0}`")]
    DuplicateFunction(String),

    #[error("type declaration `{0}` shadows a primitive type")]
    ShadowsPrimitive(String),

    #[error("tagged union `{0}` has no variants")]
    EmptyUnion(String),

    #[error("tagged union `{union}` declares variant `{variant}` more than once")]
    DuplicateVariant { union: String, variant: String },

    #[error("tagged union `{0}` uses the same field for its discriminant and payload")]
    TagContentClash(String),

    #[error("fixed layout requested for `{type_name}`, but field `{field}` is not a fixed-width scalar")]
    FixedLayoutField { type_name: String, field: String },

    #[error("fixed layout is only supported for structs, `{0}` is a tagged union")]
    FixedLayoutUnion(String),

    #[error("{what} name `{name}` is not a valid identifier")]
    InvalidIdentifier { what: &'static str, name: String },

    #[error("{what} name `{name}` is reserved")]
    ReservedName { what: &'static str, name: String },

    #[error("variant `{variant}` of `{union}` is emitted as `{name}`, which is already declared")]
    VariantNameClash {
        union: String,
        variant: String,
        name: String,
    },

    #[error("field `{field}` of `{type_name}` is structured data, but `{fixed}` has a fixed layout")]
    FixedLayoutInStructured {
        type_name: String,
        field: String,
        fixed: String,
    },

    #[error("cannot access metadata artifact {}: {message}", path.display())]
    Artifact { path: PathBuf, message: String },
}

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, Error>;
