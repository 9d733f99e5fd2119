use ffiglue_core::Primitive;

use super::{HostRepr, NativeKind, TypeTable};

#[test]
fn table_is_indexed_by_primitive() {
    for p in Primitive::ALL {
        assert_eq!(TypeTable::get(p).primitive, p);
    }
}

#[test]
fn token_lookup_is_exact() {
    assert_eq!(Primitive::from_name("u64").map(TypeTable::get).unwrap().host, HostRepr::BigInt);
    assert!(Primitive::from_name("U64").map(TypeTable::get).is_none());
    assert!(Primitive::from_name("i128").map(TypeTable::get).is_none());
    assert!(Primitive::from_name("").map(TypeTable::get).is_none());
}

#[test]
fn native_tokens() {
    assert_eq!(NativeKind::Scalar(Primitive::F32).param_tokens(), ["f32"]);
    assert_eq!(NativeKind::Buffer.param_tokens(), ["buffer", "usize"]);
    assert_eq!(NativeKind::Scalar(Primitive::Void).result_token(), "void");
    assert_eq!(NativeKind::Buffer.result_token(), "pointer");
}
