use indexmap::IndexMap;

use ffiglue_core::{DeclSet, Primitive, Signature, TypeDecl, TypeRef, Variant};

use crate::unmarshal::{ResultDecoding, ResultUnmarshaller};
use crate::resolve::TypeResolver;

fn types() -> DeclSet {
    DeclSet::new(vec![
        TypeDecl::union(
            "Shape",
            vec![
                Variant::with_fields(
                    "Circle",
                    IndexMap::from([("r".to_string(), TypeRef::from(Primitive::F64))]),
                ),
                Variant::unit("Empty"),
            ],
        ),
        TypeDecl::structure(
            "Point",
            IndexMap::from([("x".to_string(), TypeRef::from(Primitive::F32))]),
        )
        .fixed(),
    ])
    .unwrap()
}

fn unmarshal(result: impl Into<TypeRef>, non_blocking: bool) -> (String, String, &'static str) {
    let types = types();
    let resolver = TypeResolver::new(&types);
    let sig = Signature::new("f", vec![], result).non_blocking(non_blocking);
    let r = ResultUnmarshaller::new(&resolver).unmarshal(&sig).unwrap();
    (r.annotation(), r.return_stmt(), r.native)
}

#[test]
fn scalar_result_is_returned_unchanged() {
    let (annotation, stmt, native) = unmarshal(Primitive::I32, false);
    assert_eq!(annotation, "number");
    assert_eq!(stmt, "return rawResult;");
    assert_eq!(native, "i32");
}

#[test]
fn non_blocking_scalar_is_a_promise() {
    let (annotation, stmt, _) = unmarshal(Primitive::U64, true);
    assert_eq!(annotation, "Promise<bigint>");
    assert_eq!(stmt, "return rawResult;");
}

#[test]
fn void_result() {
    let (annotation, stmt, native) = unmarshal(Primitive::Void, false);
    assert_eq!(annotation, "void");
    assert_eq!(stmt, "return rawResult;");
    assert_eq!(native, "void");
}

#[test]
fn blocking_bytes_read_through_pointer() {
    let (annotation, stmt, native) = unmarshal(Primitive::Buffer, false);
    assert_eq!(annotation, "Uint8Array");
    assert_eq!(stmt, "return readPointer(rawResult);");
    assert_eq!(native, "pointer");
}

#[test]
fn non_blocking_bytes_decode_in_continuation() {
    let (annotation, stmt, _) = unmarshal(Primitive::Buffer, true);
    assert_eq!(annotation, "Promise<Uint8Array>");
    assert_eq!(stmt, "return rawResult.then((ptr) => readPointer(ptr));");
}

#[test]
fn text_result_is_decoded() {
    let (annotation, stmt, _) = unmarshal(Primitive::Str, false);
    assert_eq!(annotation, "string");
    assert_eq!(stmt, "return decode(readPointer(rawResult));");
}

#[test]
fn declared_result_is_parsed() {
    let (annotation, stmt, native) = unmarshal(TypeRef::declared("Shape"), false);
    assert_eq!(annotation, "Shape");
    assert_eq!(
        stmt,
        "return JSON.parse(decode(readPointer(rawResult))) as Shape;"
    );
    assert_eq!(native, "pointer");

    let (annotation, stmt, _) = unmarshal(TypeRef::declared("Shape"), true);
    assert_eq!(annotation, "Promise<Shape>");
    assert_eq!(
        stmt,
        "return rawResult.then((ptr) => JSON.parse(decode(readPointer(ptr))) as Shape);"
    );
}

#[test]
fn fixed_layout_result_is_unpacked() {
    let (_, stmt, _) = unmarshal(TypeRef::declared("Point"), false);
    assert_eq!(stmt, "return __unpack_Point(readPointer(rawResult));");
}

#[test]
fn helpers_follow_decoding() {
    let direct = ResultDecoding::Direct;
    assert_eq!(direct.decode_expr("x"), "x");

    let types = types();
    let resolver = TypeResolver::new(&types);
    let sig = Signature::new("f", vec![], Primitive::Str);
    let r = ResultUnmarshaller::new(&resolver).unmarshal(&sig).unwrap();
    let helpers = r.helpers();
    assert!(helpers.read_pointer);
    assert!(helpers.decode);
    assert!(!helpers.encode);
}
