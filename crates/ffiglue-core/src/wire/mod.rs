//! Byte-level formats crossing the native boundary.
//!
//! - `prefixed`: 4-byte big-endian length header + payload, used for every
//!   buffer-like result
//! - `structured`: JSON text for declared types, shape-checked against
//!   the declaration set
//! - `fixed`: packed C-like layout for opt-in pure-scalar structs
//!
//! These are what the emitted glue produces and consumes. Keeping a Rust
//! implementation next to the generator lets the native side share it.

pub mod fixed;
pub mod prefixed;
pub mod structured;

#[cfg(test)]
mod fixed_tests;

pub use fixed::FixedCodec;
pub use structured::StructuredCodec;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("payload of {0} bytes does not fit a 32-bit length header")]
    PayloadTooLarge(usize),

    #[error("truncated frame: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("malformed structured text: {0}")]
    Json(String),

    #[error("at `{path}`: expected {expected}")]
    Shape { path: String, expected: String },

    #[error("at `{0}`: non-finite floats have no structured representation")]
    NonFinite(String),

    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("at `{path}`: `{variant}` is not a variant of `{union}`")]
    UnknownVariant {
        path: String,
        union: String,
        variant: String,
    },
}

pub type Result<T> = std::result::Result<T, WireError>;
