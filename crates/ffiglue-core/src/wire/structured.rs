//! Structured-text encoding of declared types.
//!
//! Values travel as JSON. Structs are objects keyed by field name. Tagged
//! unions are adjacently tagged: the discriminant field names the variant and
//! the payload field (absent for bare tags) holds its fields.

use serde_json::{Map, Value};

use super::{Result, WireError};
use crate::decl::{DeclKind, Fields, UnionDecl};
use crate::module::DeclSet;
use crate::types::{Primitive, TypeRef};

pub struct StructuredCodec<'a> {
    types: &'a DeclSet,
}

impl<'a> StructuredCodec<'a> {
    pub fn new(types: &'a DeclSet) -> Self {
        Self { types }
    }

    /// Check `value` against `ty`, then serialize it.
    pub fn encode(&self, ty: &TypeRef, value: &Value) -> Result<Vec<u8>> {
        self.validate(ty, value)?;
        serde_json::to_vec(value).map_err(|e| WireError::Json(e.to_string()))
    }

    /// Parse `bytes` and check the result against `ty`.
    ///
    /// For unions the discriminant selects which payload shape is checked.
    pub fn decode(&self, ty: &TypeRef, bytes: &[u8]) -> Result<Value> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| WireError::Json(e.to_string()))?;
        self.validate(ty, &value)?;
        Ok(value)
    }

    pub fn validate(&self, ty: &TypeRef, value: &Value) -> Result<()> {
        self.check(ty, value, "$")
    }

    fn check(&self, ty: &TypeRef, value: &Value, path: &str) -> Result<()> {
        match ty {
            TypeRef::Primitive(p) => check_primitive(*p, value, path),
            TypeRef::Declared(name) => {
                let decl = self
                    .types
                    .get(name)
                    .ok_or_else(|| WireError::UnknownType(name.clone()))?;
                match &decl.kind {
                    DeclKind::Struct(s) => self.check_fields(&s.fields, value, path, name),
                    DeclKind::Union(u) => self.check_union(name, u, value, path),
                }
            }
        }
    }

    fn check_fields(&self, fields: &Fields, value: &Value, path: &str, what: &str) -> Result<()> {
        let object = value
            .as_object()
            .ok_or_else(|| shape(path, format!("object `{what}`")))?;

        for (field, ty) in fields {
            let field_path = format!("{path}.{field}");
            let member = object
                .get(field)
                .ok_or_else(|| shape(&field_path, format!("field of type `{ty}`")))?;
            self.check(ty, member, &field_path)?;
        }

        if let Some(extra) = object.keys().find(|k| !fields.contains_key(k.as_str())) {
            return Err(shape(
                &format!("{path}.{extra}"),
                format!("no such field on `{what}`"),
            ));
        }

        Ok(())
    }

    fn check_union(&self, name: &str, u: &UnionDecl, value: &Value, path: &str) -> Result<()> {
        let object = value
            .as_object()
            .ok_or_else(|| shape(path, format!("tagged union `{name}`")))?;
        let tag_path = format!("{path}.{}", u.tag);
        let tag = object
            .get(&u.tag)
            .and_then(Value::as_str)
            .ok_or_else(|| shape(&tag_path, "variant name".to_string()))?;
        let variant = u.variant(tag).ok_or_else(|| WireError::UnknownVariant {
            path: tag_path.clone(),
            union: name.to_string(),
            variant: tag.to_string(),
        })?;

        let content_path = format!("{path}.{}", u.content);
        match (&variant.payload, object.get(&u.content)) {
            (Some(fields), Some(payload)) => {
                self.check_fields(fields, payload, &content_path, &variant.name)?
            }
            (Some(_), None) => {
                return Err(shape(&content_path, format!("payload of `{tag}`")));
            }
            (None, Some(_)) => {
                return Err(shape(&content_path, format!("no payload for `{tag}`")));
            }
            (None, None) => {}
        }

        check_no_extra(object, &[u.tag.as_str(), u.content.as_str()], path, name)
    }
}

fn check_no_extra(object: &Map<String, Value>, allowed: &[&str], path: &str, what: &str) -> Result<()> {
    match object.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(extra) => Err(shape(
            &format!("{path}.{extra}"),
            format!("no such field on `{what}`"),
        )),
        None => Ok(()),
    }
}

fn check_primitive(p: Primitive, value: &Value, path: &str) -> Result<()> {
    let ok = match p {
        Primitive::Void => value.is_null(),
        Primitive::Str => value.is_string(),
        Primitive::Buffer | Primitive::BufferMut | Primitive::Ptr => value
            .as_array()
            .is_some_and(|items| items.iter().all(|b| b.as_u64().is_some_and(|b| b <= 0xFF))),
        Primitive::F32 | Primitive::F64 => value.is_number(),
        Primitive::I8 => fits_signed(value, i8::MIN.into(), i8::MAX.into()),
        Primitive::I16 => fits_signed(value, i16::MIN.into(), i16::MAX.into()),
        Primitive::I32 => fits_signed(value, i32::MIN.into(), i32::MAX.into()),
        Primitive::I64 | Primitive::Isize => value.is_i64(),
        Primitive::U8 => fits_unsigned(value, u8::MAX.into()),
        Primitive::U16 => fits_unsigned(value, u16::MAX.into()),
        Primitive::U32 => fits_unsigned(value, u32::MAX.into()),
        Primitive::U64 | Primitive::Usize => value.is_u64(),
    };

    if ok {
        Ok(())
    } else {
        Err(shape(path, format!("`{p}`")))
    }
}

fn fits_signed(value: &Value, min: i64, max: i64) -> bool {
    value.as_i64().is_some_and(|v| (min..=max).contains(&v))
}

fn fits_unsigned(value: &Value, max: u64) -> bool {
    value.as_u64().is_some_and(|v| v <= max)
}

fn shape(path: &str, expected: String) -> WireError {
    WireError::Shape {
        path: path.to_string(),
        expected,
    }
}
