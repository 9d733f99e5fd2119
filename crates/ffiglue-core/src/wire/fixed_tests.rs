use indexmap::IndexMap;
use serde_json::json;

use crate::decl::Fields;
use crate::layout::Layout;
use crate::module::ByteOrder;
use crate::types::{Primitive, TypeRef};
use crate::wire::{FixedCodec, WireError};

fn point_layout() -> Layout {
    let fields: Fields = IndexMap::from([
        ("tag".to_string(), TypeRef::from(Primitive::U8)),
        ("x".to_string(), TypeRef::from(Primitive::I32)),
        ("y".to_string(), TypeRef::from(Primitive::F64)),
    ]);
    Layout::of("Point", &fields).unwrap()
}

#[test]
fn packs_at_aligned_offsets_little_endian() {
    let codec = FixedCodec::new(point_layout(), ByteOrder::Little);
    let bytes = codec
        .pack(&json!({ "tag": 7, "x": 258, "y": 0.0 }))
        .unwrap();

    assert_eq!(bytes.len(), 16);
    assert_eq!(bytes[0], 7);
    assert_eq!(&bytes[1..4], [0, 0, 0]);
    assert_eq!(&bytes[4..8], [2, 1, 0, 0]);
}

#[test]
fn big_endian_reverses_multibyte_fields() {
    let codec = FixedCodec::new(point_layout(), ByteOrder::Big);
    let bytes = codec
        .pack(&json!({ "tag": 7, "x": 258, "y": 0.0 }))
        .unwrap();
    assert_eq!(&bytes[4..8], [0, 0, 1, 2]);
}

#[test]
fn round_trips_in_both_byte_orders() {
    let point = json!({ "tag": 255, "x": -12345, "y": 2.5 });
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let codec = FixedCodec::new(point_layout(), order);
        let bytes = codec.pack(&point).unwrap();
        assert_eq!(codec.unpack(&bytes).unwrap(), point, "{order:?}");
    }
}

#[test]
fn wide_integers_round_trip() {
    let fields: Fields = IndexMap::from([
        ("big".to_string(), TypeRef::from(Primitive::U64)),
        ("neg".to_string(), TypeRef::from(Primitive::I64)),
        ("ratio".to_string(), TypeRef::from(Primitive::F32)),
    ]);
    let codec = FixedCodec::new(Layout::of("Wide", &fields).unwrap(), ByteOrder::Big);
    let value = json!({ "big": u64::MAX, "neg": i64::MIN, "ratio": 0.75 });

    let bytes = codec.pack(&value).unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(codec.unpack(&bytes).unwrap(), value);
}

#[test]
fn out_of_range_value_is_rejected() {
    let codec = FixedCodec::new(point_layout(), ByteOrder::Little);
    let err = codec
        .pack(&json!({ "tag": 256, "x": 0, "y": 0.0 }))
        .unwrap_err();
    assert_eq!(
        err,
        WireError::Shape {
            path: "$.tag".into(),
            expected: "`u8`".into(),
        }
    );
}

#[test]
fn missing_field_is_rejected() {
    let codec = FixedCodec::new(point_layout(), ByteOrder::Little);
    let err = codec.pack(&json!({ "tag": 1, "x": 0 })).unwrap_err();
    assert!(matches!(err, WireError::Shape { path, .. } if path == "$.y"));
}

#[test]
fn short_input_is_truncated() {
    let codec = FixedCodec::new(point_layout(), ByteOrder::Little);
    assert_eq!(
        codec.unpack(&[0; 8]).unwrap_err(),
        WireError::Truncated {
            expected: 16,
            actual: 8
        }
    );
}

#[test]
fn non_finite_float_is_rejected_on_unpack() {
    let codec = FixedCodec::new(point_layout(), ByteOrder::Little);
    let mut bytes = codec
        .pack(&json!({ "tag": 1, "x": 2, "y": 0.0 }))
        .unwrap();

    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        bytes[8..16].copy_from_slice(&v.to_le_bytes());
        assert_eq!(
            codec.unpack(&bytes).unwrap_err(),
            WireError::NonFinite("$.y".into()),
            "{v}"
        );
    }
}
