use std::fmt;

use ffiglue_core::{DeclSet, Encoding, Primitive, TypeDecl, TypeRef};

use super::type_table::{HostRepr, NativeKind, TypeTable};
use crate::{Error, Result};

/// Where a type reference appears, for error reporting.
#[derive(Clone, Copy, Debug)]
pub enum Site<'a> {
    Param { function: &'a str, index: usize },
    Result { function: &'a str },
    Field { type_name: &'a str, field: &'a str },
}

impl fmt::Display for Site<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Param { function, index } => write!(f, "parameter {index} of `{function}`"),
            Site::Result { function } => write!(f, "result of `{function}`"),
            Site::Field { type_name, field } => write!(f, "field `{field}` of `{type_name}`"),
        }
    }
}

/// What a resolved reference is, for picking a marshalling strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class<'m> {
    Scalar(Primitive),
    Text,
    Bytes,
    Declared(&'m TypeDecl),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved<'m> {
    /// Host type annotation.
    pub host: String,
    pub native: NativeKind,
    pub class: Class<'m>,
}

pub struct TypeResolver<'m> {
    types: &'m DeclSet,
}

impl<'m> TypeResolver<'m> {
    pub fn new(types: &'m DeclSet) -> Self {
        Self { types }
    }

    pub fn resolve(&self, ty: &TypeRef, site: Site<'_>) -> Result<Resolved<'m>> {
        match ty {
            TypeRef::Primitive(p) => Ok(self.primitive(*p)),
            TypeRef::Declared(name) => self.declared(name, site),
        }
    }

    /// Host annotation for a declaration field under `encoding`.
    ///
    /// Structured text carries every number as a double and bytes as an
    /// array. Fixed layout reads wide integers back as `bigint`.
    pub fn field_type(&self, ty: &TypeRef, encoding: Encoding, site: Site<'_>) -> Result<String> {
        let resolved = self.resolve(ty, site)?;
        let text = match (resolved.class, encoding) {
            (Class::Scalar(Primitive::Void), Encoding::Structured) => "null",
            (Class::Scalar(_), Encoding::Structured) => "number",
            (Class::Bytes, Encoding::Structured) => "number[]",
            _ => return Ok(resolved.host),
        };
        Ok(text.to_string())
    }

    /// Resolve every field of every declaration, used or not.
    pub fn check_declarations(&self) -> Result<()> {
        for decl in self.types.iter() {
            for (field, ty) in decl.references() {
                self.resolve(
                    ty,
                    Site::Field {
                        type_name: &decl.name,
                        field: &field,
                    },
                )?;
            }
        }
        Ok(())
    }

    fn primitive(&self, p: Primitive) -> Resolved<'m> {
        let entry = TypeTable::get(p);
        let class = match entry.host {
            HostRepr::Text => Class::Text,
            HostRepr::Bytes => Class::Bytes,
            HostRepr::Number | HostRepr::BigInt | HostRepr::Void => Class::Scalar(p),
        };
        Resolved {
            host: entry.host.ts().to_string(),
            native: entry.native,
            class,
        }
    }

    fn declared(&self, name: &str, site: Site<'_>) -> Result<Resolved<'m>> {
        let decl = self.types.get(name).ok_or_else(|| Error::UnsupportedType {
            name: name.to_string(),
            site: site.to_string(),
        })?;
        Ok(Resolved {
            host: decl.name.clone(),
            native: NativeKind::Buffer,
            class: Class::Declared(decl),
        })
    }
}
