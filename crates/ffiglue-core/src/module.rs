//! The binding module: everything one generation pass consumes.

use std::collections::HashSet;

use tracing::debug;

use crate::decl::{DeclKind, Encoding, TypeDecl};
use crate::layout::Layout;
use crate::normalize::SignatureNormalizer;
use crate::types::{Primitive, TypeRef};
use crate::utils::{is_builtin_type_name, is_js_identifier, is_reserved_word, variant_type_name};
use crate::{Error, Result};

/// Byte order for fixed-layout packing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Debug,
    Release,
}

impl Profile {
    pub fn dir_name(self) -> &'static str {
        match self {
            Profile::Debug => "debug",
            Profile::Release => "release",
        }
    }
}

/// Where the compiled library is loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibraryLocation {
    /// Path relative to the emitted module.
    Local(String),
    /// Remote base URL.
    Remote(String),
}

impl LibraryLocation {
    /// Cargo's output directory for `profile`, relative to a sibling `bindings/` dir.
    pub fn target_dir(profile: Profile) -> Self {
        LibraryLocation::Local(format!("../target/{}", profile.dir_name()))
    }

    pub fn base(&self) -> &str {
        match self {
            LibraryLocation::Local(path) => path,
            LibraryLocation::Remote(url) => url,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, LibraryLocation::Remote(_))
    }
}

impl Default for LibraryLocation {
    fn default() -> Self {
        Self::target_dir(Profile::Debug)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleOptions {
    pub byte_order: ByteOrder,
    pub profile: Profile,
    pub location: LibraryLocation,
}

/// A foreign function declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub result: TypeRef,
    pub non_blocking: bool,
    pub docs: Option<String>,
}

impl Signature {
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, result: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            params,
            result: result.into(),
            non_blocking: false,
            docs: None,
        }
    }

    pub fn non_blocking(mut self, value: bool) -> Self {
        self.non_blocking = value;
        self
    }

    pub fn docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }
}

/// Name-sorted declaration set with binary-search lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclSet {
    decls: Vec<TypeDecl>,
}

impl DeclSet {
    /// Normalizes `decls` into name order, rejecting duplicates.
    pub fn new(decls: Vec<TypeDecl>) -> Result<Self> {
        Ok(Self {
            decls: SignatureNormalizer::types(decls)?,
        })
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.decls
            .binary_search_by(|d| d.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.decls[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.iter()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// Immutable once built. Generation takes it by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingModule {
    name: String,
    options: ModuleOptions,
    types: DeclSet,
    signatures: Vec<Signature>,
}

impl BindingModule {
    pub fn builder(name: impl Into<String>) -> BindingModuleBuilder {
        BindingModuleBuilder {
            name: name.into(),
            options: ModuleOptions::default(),
            types: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Library package name, used for file names.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &ModuleOptions {
        &self.options
    }

    pub fn types(&self) -> &DeclSet {
        &self.types
    }

    /// Signatures in name order.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }
}

pub struct BindingModuleBuilder {
    name: String,
    options: ModuleOptions,
    types: Vec<TypeDecl>,
    signatures: Vec<Signature>,
}

impl BindingModuleBuilder {
    pub fn options(mut self, options: ModuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn byte_order(mut self, value: ByteOrder) -> Self {
        self.options.byte_order = value;
        self
    }

    pub fn profile(mut self, value: Profile) -> Self {
        self.options.profile = value;
        self
    }

    pub fn location(mut self, value: LibraryLocation) -> Self {
        self.options.location = value;
        self
    }

    pub fn type_decl(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    pub fn signature(mut self, sig: Signature) -> Self {
        self.signatures.push(sig);
        self
    }

    pub fn build(self) -> Result<BindingModule> {
        let types = DeclSet::new(self.types)?;
        let signatures = SignatureNormalizer::signatures(self.signatures)?;

        for decl in types.iter() {
            validate_decl(decl, &types)?;
        }
        for sig in &signatures {
            check_binding_name("function", &sig.name)?;
        }
        check_variant_names(&types)?;

        debug!(
            module = %self.name,
            types = types.len(),
            functions = signatures.len(),
            "binding module built"
        );

        Ok(BindingModule {
            name: self.name,
            options: self.options,
            types,
            signatures,
        })
    }
}

fn validate_decl(decl: &TypeDecl, types: &DeclSet) -> Result<()> {
    if Primitive::from_name(&decl.name).is_some() {
        return Err(Error::ShadowsPrimitive(decl.name.clone()));
    }
    check_binding_name("type", &decl.name)?;
    if is_builtin_type_name(&decl.name) {
        return Err(Error::ReservedName {
            what: "type",
            name: decl.name.clone(),
        });
    }

    // Fixed-layout values only cross the boundary as packed parameters or results.
    for (field, ty) in decl.references() {
        let TypeRef::Declared(name) = ty else {
            continue;
        };
        if types.get(name).is_some_and(TypeDecl::is_fixed_layout) {
            return Err(Error::FixedLayoutInStructured {
                type_name: decl.name.clone(),
                field,
                fixed: name.clone(),
            });
        }
    }

    match &decl.kind {
        DeclKind::Struct(s) => {
            if s.encoding == Encoding::Fixed {
                Layout::of(&decl.name, &s.fields)?;
            }
        }
        DeclKind::Union(u) => {
            if u.variants.is_empty() {
                return Err(Error::EmptyUnion(decl.name.clone()));
            }
            if u.tag == u.content {
                return Err(Error::TagContentClash(decl.name.clone()));
            }
            let mut seen = HashSet::new();
            for v in &u.variants {
                if !seen.insert(v.name.as_str()) {
                    return Err(Error::DuplicateVariant {
                        union: decl.name.clone(),
                        variant: v.name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Names emitted as bindings must be usable unquoted.
fn check_binding_name(what: &'static str, name: &str) -> Result<()> {
    if !is_js_identifier(name) {
        return Err(Error::InvalidIdentifier {
            what,
            name: name.to_string(),
        });
    }
    if is_reserved_word(name) {
        return Err(Error::ReservedName {
            what,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Variant interfaces share the namespace of declared types.
fn check_variant_names(types: &DeclSet) -> Result<()> {
    let mut emitted = HashSet::new();
    for decl in types.iter() {
        let DeclKind::Union(u) = &decl.kind else {
            continue;
        };
        for v in &u.variants {
            let name = variant_type_name(&decl.name, &v.name);
            if !is_js_identifier(&name) {
                return Err(Error::InvalidIdentifier {
                    what: "variant type",
                    name,
                });
            }
            if types.contains(&name) || !emitted.insert(name.clone()) {
                return Err(Error::VariantNameClash {
                    union: decl.name.clone(),
                    variant: v.name.clone(),
                    name,
                });
            }
        }
    }
    Ok(())
}
