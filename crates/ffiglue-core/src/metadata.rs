//! Deserialization layer for the `bindings.json` metadata artifact.
//!
//! Mirrors the JSON written by the native build one-to-one. Conversion into
//! the model (`RawMetadata::into_module`) classifies type references,
//! applies the normalizer and validates declarations.

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::decl::{
    DEFAULT_CONTENT, DEFAULT_TAG, DeclKind, Encoding, Fields, StructDecl, TypeDecl, UnionDecl,
    Variant,
};
use crate::module::{BindingModule, ByteOrder, LibraryLocation, ModuleOptions, Profile, Signature};
use crate::types::{Primitive, TypeRef};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    pub name: String,
    #[serde(default = "default_little_endian")]
    pub little_endian: bool,
    #[serde(default)]
    pub symbols: IndexMap<String, RawSignature>,
    #[serde(default)]
    pub type_defs: IndexMap<String, RawTypeDecl>,
    #[serde(default)]
    pub ts_types: IndexMap<String, String>,
}

fn default_little_endian() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSignature {
    #[serde(default)]
    pub parameters: Vec<RawTypeRef>,
    #[serde(default = "RawTypeRef::void")]
    pub result: RawTypeRef,
    #[serde(default)]
    pub non_blocking: bool,
    #[serde(default)]
    pub docs: Option<String>,
}

/// A type reference: a bare name, or the `{ "structenum": { "ident": .. } }` form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTypeRef {
    Name(String),
    StructEnum { structenum: RawIdent },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawIdent {
    pub ident: String,
}

impl RawTypeRef {
    fn void() -> Self {
        RawTypeRef::Name(Primitive::Void.name().to_string())
    }

    pub fn into_type_ref(self) -> TypeRef {
        match self {
            RawTypeRef::Name(name) => TypeRef::from_name(&name),
            RawTypeRef::StructEnum { structenum } => TypeRef::Declared(structenum.ident),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTypeDecl {
    Struct(RawStruct),
    Union(RawUnion),
    /// Bare `{ field: type }` map.
    Fields(IndexMap<String, RawTypeRef>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawLayout {
    #[default]
    Structured,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawStruct {
    pub fields: IndexMap<String, RawTypeRef>,
    #[serde(default)]
    pub layout: RawLayout,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawUnion {
    pub variants: Vec<RawVariant>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub layout: RawLayout,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawVariant {
    pub name: String,
    #[serde(default)]
    pub fields: Option<IndexMap<String, RawTypeRef>>,
    #[serde(default)]
    pub docs: Option<String>,
}

impl RawMetadata {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Metadata(e.to_string()))
    }

    /// Build the binding module for one generation pass.
    pub fn into_module(self, profile: Profile, location: LibraryLocation) -> Result<BindingModule> {
        let byte_order = if self.little_endian {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        };

        let mut ts_types = self.ts_types;
        let mut builder = BindingModule::builder(self.name).options(ModuleOptions {
            byte_order,
            profile,
            location,
        });

        for (name, raw) in self.type_defs {
            let mut decl = raw.into_decl(name)?;
            decl.host_text = ts_types.shift_remove(&decl.name);
            builder = builder.type_decl(decl);
        }

        for orphan in ts_types.keys() {
            debug!(type_name = %orphan, "ignoring precomputed text for undeclared type");
        }

        for (name, raw) in self.symbols {
            builder = builder.signature(Signature {
                name,
                params: raw
                    .parameters
                    .into_iter()
                    .map(RawTypeRef::into_type_ref)
                    .collect(),
                result: raw.result.into_type_ref(),
                non_blocking: raw.non_blocking,
                docs: raw.docs,
            });
        }

        builder.build()
    }
}

impl RawTypeDecl {
    fn into_decl(self, name: String) -> Result<TypeDecl> {
        let (kind, docs) = match self {
            RawTypeDecl::Fields(fields) => (
                DeclKind::Struct(StructDecl {
                    fields: convert_fields(fields),
                    encoding: Encoding::Structured,
                }),
                None,
            ),
            RawTypeDecl::Struct(s) => (
                DeclKind::Struct(StructDecl {
                    fields: convert_fields(s.fields),
                    encoding: match s.layout {
                        RawLayout::Structured => Encoding::Structured,
                        RawLayout::Fixed => Encoding::Fixed,
                    },
                }),
                s.docs,
            ),
            RawTypeDecl::Union(u) => {
                if u.layout == RawLayout::Fixed {
                    return Err(Error::FixedLayoutUnion(name));
                }
                let variants = u
                    .variants
                    .into_iter()
                    .map(|v| Variant {
                        name: v.name,
                        payload: v.fields.map(convert_fields),
                        docs: v.docs,
                    })
                    .collect();
                (
                    DeclKind::Union(UnionDecl {
                        tag: u.tag.unwrap_or_else(|| DEFAULT_TAG.to_string()),
                        content: u.content.unwrap_or_else(|| DEFAULT_CONTENT.to_string()),
                        variants,
                    }),
                    u.docs,
                )
            }
        };

        Ok(TypeDecl {
            name,
            kind,
            docs,
            host_text: None,
        })
    }
}

fn convert_fields(fields: IndexMap<String, RawTypeRef>) -> Fields {
    fields
        .into_iter()
        .map(|(name, ty)| (name, ty.into_type_ref()))
        .collect()
}
