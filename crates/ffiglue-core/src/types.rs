//! Primitive tokens and type references.

use std::fmt;

/// Closed set of primitive type tokens understood across the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    Usize,
    Isize,
    F32,
    F64,
    Void,
    /// UTF-8 text.
    Str,
    /// Read-only bytes.
    Buffer,
    /// Mutable bytes, handed to the callee without a copy.
    BufferMut,
    /// Opaque pointer-backed bytes.
    Ptr,
}

impl Primitive {
    pub const ALL: [Primitive; 17] = [
        Primitive::I8,
        Primitive::U8,
        Primitive::I16,
        Primitive::U16,
        Primitive::I32,
        Primitive::U32,
        Primitive::I64,
        Primitive::U64,
        Primitive::Usize,
        Primitive::Isize,
        Primitive::F32,
        Primitive::F64,
        Primitive::Void,
        Primitive::Str,
        Primitive::Buffer,
        Primitive::BufferMut,
        Primitive::Ptr,
    ];

    /// Look up a primitive by its exact, case-sensitive token.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::I8 => "i8",
            Primitive::U8 => "u8",
            Primitive::I16 => "i16",
            Primitive::U16 => "u16",
            Primitive::I32 => "i32",
            Primitive::U32 => "u32",
            Primitive::I64 => "i64",
            Primitive::U64 => "u64",
            Primitive::Usize => "usize",
            Primitive::Isize => "isize",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Void => "void",
            Primitive::Str => "str",
            Primitive::Buffer => "buffer",
            Primitive::BufferMut => "buffermut",
            Primitive::Ptr => "ptr",
        }
    }

    /// Buffer-like primitives always cross the boundary as pointer + length.
    pub fn is_buffer_like(self) -> bool {
        matches!(
            self,
            Primitive::Str | Primitive::Buffer | Primitive::BufferMut | Primitive::Ptr
        )
    }

    /// Size in bytes for fixed-width scalars, `None` for void and buffer-like types.
    ///
    /// Pointer-sized integers assume a 64-bit target.
    pub fn scalar_width(self) -> Option<usize> {
        match self {
            Primitive::I8 | Primitive::U8 => Some(1),
            Primitive::I16 | Primitive::U16 => Some(2),
            Primitive::I32 | Primitive::U32 | Primitive::F32 => Some(4),
            Primitive::I64
            | Primitive::U64
            | Primitive::Usize
            | Primitive::Isize
            | Primitive::F64 => Some(8),
            Primitive::Void
            | Primitive::Str
            | Primitive::Buffer
            | Primitive::BufferMut
            | Primitive::Ptr => None,
        }
    }


}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to a type from a signature or a declaration field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(Primitive),
    Declared(String),
}

impl TypeRef {
    pub fn declared(name: impl Into<String>) -> Self {
        TypeRef::Declared(name.into())
    }

    /// Classify a bare name: primitive tokens win, anything else names a declared type.
    pub fn from_name(name: &str) -> Self {
        match Primitive::from_name(name) {
            Some(p) => TypeRef::Primitive(p),
            None => TypeRef::Declared(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeRef::Primitive(p) => p.name(),
            TypeRef::Declared(name) => name,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            TypeRef::Declared(_) => None,
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(p: Primitive) -> Self {
        TypeRef::Primitive(p)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
