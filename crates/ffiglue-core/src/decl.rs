//! User-declared data types.

use indexmap::IndexMap;

use crate::types::TypeRef;

/// Default discriminant field of a tagged union.
pub const DEFAULT_TAG: &str = "$tag";
/// Default payload field of a tagged union.
pub const DEFAULT_CONTENT: &str = "$data";

/// Ordered field name to type mapping.
pub type Fields = IndexMap<String, TypeRef>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: DeclKind,
    pub docs: Option<String>,
    /// Host declaration text precomputed by the native side; replaces the rendered one.
    pub host_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Struct(StructDecl),
    Union(UnionDecl),
}

/// How a struct crosses the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Self-describing structured text.
    #[default]
    Structured,
    /// Packed bytes at natural alignment. Pure-scalar structs only.
    Fixed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructDecl {
    pub fields: Fields,
    pub encoding: Encoding,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionDecl {
    pub tag: String,
    pub content: String,
    pub variants: Vec<Variant>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    /// `None` for a bare tag.
    pub payload: Option<Fields>,
    pub docs: Option<String>,
}

impl TypeDecl {
    pub fn structure(name: impl Into<String>, fields: Fields) -> Self {
        Self {
            name: name.into(),
            kind: DeclKind::Struct(StructDecl {
                fields,
                encoding: Encoding::Structured,
            }),
            docs: None,
            host_text: None,
        }
    }

    pub fn union(name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            kind: DeclKind::Union(UnionDecl {
                tag: DEFAULT_TAG.to_string(),
                content: DEFAULT_CONTENT.to_string(),
                variants,
            }),
            docs: None,
            host_text: None,
        }
    }

    /// Switch a struct to the fixed-layout encoding. No effect on unions.
    pub fn fixed(mut self) -> Self {
        if let DeclKind::Struct(s) = &mut self.kind {
            s.encoding = Encoding::Fixed;
        }
        self
    }

    pub fn docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    pub fn host_text(mut self, text: impl Into<String>) -> Self {
        self.host_text = Some(text.into());
        self
    }

    pub fn is_fixed_layout(&self) -> bool {
        matches!(
            &self.kind,
            DeclKind::Struct(StructDecl {
                encoding: Encoding::Fixed,
                ..
            })
        )
    }

    /// Every type reference this declaration mentions, with its field path.
    pub fn references(&self) -> Vec<(String, &TypeRef)> {
        match &self.kind {
            DeclKind::Struct(s) => s
                .fields
                .iter()
                .map(|(field, ty)| (field.clone(), ty))
                .collect(),
            DeclKind::Union(u) => u
                .variants
                .iter()
                .flat_map(|v| {
                    v.payload.iter().flat_map(move |fields| {
                        fields
                            .iter()
                            .map(move |(field, ty)| (format!("{}.{}", v.name, field), ty))
                    })
                })
                .collect(),
        }
    }
}

impl Variant {
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
            docs: None,
        }
    }

    pub fn with_fields(name: impl Into<String>, fields: Fields) -> Self {
        Self {
            name: name.into(),
            payload: Some(fields),
            docs: None,
        }
    }
}

impl UnionDecl {
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}
