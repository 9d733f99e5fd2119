//! Type resolution.
//!
//! Maps every type reference in a binding module to a host representation
//! and a native kind, or fails with `UnsupportedType`.

mod resolver;
mod type_table;

#[cfg(test)]
mod type_table_tests;

pub use resolver::{Class, Resolved, Site, TypeResolver};
pub use type_table::{HostRepr, NativeKind, TableEntry, TypeTable};
