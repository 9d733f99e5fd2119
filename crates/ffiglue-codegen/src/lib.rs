#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! TypeScript glue generation for dynamically loaded native libraries.
//!
//! Pipeline for one binding module:
//! - `resolve` - primitive table and type resolution
//! - `marshal` / `unmarshal` - per-parameter and per-result strategies
//! - `locator` - per-platform library file names and cache policy
//! - `emit` - assembly of the final source unit, optional formatting
//! - `pipeline` - metadata artifact in, source text out

pub mod emit;
pub mod locator;
pub mod marshal;
pub mod pipeline;
pub mod resolve;
pub mod unmarshal;

#[cfg(test)]
mod unmarshal_tests;

pub use emit::{CommandFormatter, Config, Emitter, FormatError, Formatter, generate};
pub use locator::{CachePolicy, LibraryLocator, PlatformEntry};
pub use pipeline::{Generation, generate_from_artifact};
pub use resolve::{HostRepr, NativeKind, Resolved, Site, TypeResolver, TypeTable};

/// Errors that abort generation. Nothing is emitted when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unsupported type `{name}` in {site}")]
    UnsupportedType { name: String, site: String },

    #[error("`void` is not a valid type for {site}")]
    VoidParameter { site: String },

    #[error("`{0}` would shadow a binding the generated module relies on")]
    ShadowsBinding(String),

    #[error(transparent)]
    Module(#[from] ffiglue_core::Error),
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, Error>;
