//! Deterministic ordering of declarations and signatures.

use crate::decl::TypeDecl;
use crate::module::Signature;
use crate::{Error, Result};

/// Orders types and functions lexicographically by name.
///
/// Runs before anything else sees the module, so identical inputs produce
/// byte-identical output regardless of metadata field ordering.
pub struct SignatureNormalizer;

impl SignatureNormalizer {
    pub fn types(decls: Vec<TypeDecl>) -> Result<Vec<TypeDecl>> {
        sort_unique(decls, |d| &d.name, Error::DuplicateType)
    }

    pub fn signatures(sigs: Vec<Signature>) -> Result<Vec<Signature>> {
        sort_unique(sigs, |s| &s.name, Error::DuplicateFunction)
    }
}

fn sort_unique<T>(
    mut items: Vec<T>,
    name: impl Fn(&T) -> &String,
    duplicate: impl Fn(String) -> Error,
) -> Result<Vec<T>> {
    items.sort_by(|a, b| name(a).cmp(name(b)));
    if let Some(pair) = items.windows(2).find(|w| name(&w[0]) == name(&w[1])) {
        return Err(duplicate(name(&pair[0]).clone()));
    }
    Ok(items)
}
