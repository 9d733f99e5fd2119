//! Static primitive mapping: host representation and native kind per token.

use ffiglue_core::Primitive;

/// How a value looks on the managed side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostRepr {
    Number,
    BigInt,
    Void,
    Text,
    Bytes,
}

impl HostRepr {
    pub fn ts(self) -> &'static str {
        match self {
            HostRepr::Number => "number",
            HostRepr::BigInt => "bigint",
            HostRepr::Void => "void",
            HostRepr::Text => "string",
            HostRepr::Bytes => "Uint8Array",
        }
    }
}

/// How a value crosses the native call boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeKind {
    /// Passed by value as the given token.
    Scalar(Primitive),
    /// Pointer with an accompanying length.
    Buffer,
}

impl NativeKind {
    /// Native parameter slots this kind occupies in the symbol table.
    pub fn param_tokens(self) -> Vec<&'static str> {
        match self {
            NativeKind::Scalar(p) => vec![p.name()],
            NativeKind::Buffer => vec!["buffer", "usize"],
        }
    }

    /// Native result token.
    pub fn result_token(self) -> &'static str {
        match self {
            NativeKind::Scalar(p) => p.name(),
            NativeKind::Buffer => "pointer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableEntry {
    pub primitive: Primitive,
    pub host: HostRepr,
    pub native: NativeKind,
}

const fn scalar(primitive: Primitive, host: HostRepr) -> TableEntry {
    TableEntry {
        primitive,
        host,
        native: NativeKind::Scalar(primitive),
    }
}

const fn buffer(primitive: Primitive, host: HostRepr) -> TableEntry {
    TableEntry {
        primitive,
        host,
        native: NativeKind::Buffer,
    }
}

static ENTRIES: [TableEntry; 17] = [
    scalar(Primitive::I8, HostRepr::Number),
    scalar(Primitive::U8, HostRepr::Number),
    scalar(Primitive::I16, HostRepr::Number),
    scalar(Primitive::U16, HostRepr::Number),
    scalar(Primitive::I32, HostRepr::Number),
    scalar(Primitive::U32, HostRepr::Number),
    scalar(Primitive::I64, HostRepr::BigInt),
    scalar(Primitive::U64, HostRepr::BigInt),
    scalar(Primitive::Usize, HostRepr::BigInt),
    scalar(Primitive::Isize, HostRepr::BigInt),
    scalar(Primitive::F32, HostRepr::Number),
    scalar(Primitive::F64, HostRepr::Number),
    scalar(Primitive::Void, HostRepr::Void),
    buffer(Primitive::Str, HostRepr::Text),
    buffer(Primitive::Buffer, HostRepr::Bytes),
    buffer(Primitive::BufferMut, HostRepr::Bytes),
    buffer(Primitive::Ptr, HostRepr::Bytes),
];

pub struct TypeTable;

impl TypeTable {
    pub fn get(primitive: Primitive) -> &'static TableEntry {
        // ENTRIES follows `Primitive::ALL` order.
        &ENTRIES[primitive as usize]
    }
}
