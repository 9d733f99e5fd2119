use crate::types::{Primitive, TypeRef};

#[test]
fn every_token_round_trips_through_its_name() {
    for p in Primitive::ALL {
        assert_eq!(Primitive::from_name(p.name()), Some(p));
    }
}

#[test]
fn token_lookup_is_case_sensitive() {
    assert_eq!(Primitive::from_name("I32"), None);
    assert_eq!(Primitive::from_name("Str"), None);
    assert_eq!(Primitive::from_name("i128"), None);
}

#[test]
fn buffer_like_tokens_have_no_scalar_width() {
    for p in Primitive::ALL {
        if p.is_buffer_like() {
            assert_eq!(p.scalar_width(), None, "{p}");
        }
    }
    assert_eq!(Primitive::Void.scalar_width(), None);
    assert_eq!(Primitive::U16.scalar_width(), Some(2));
    assert_eq!(Primitive::Usize.scalar_width(), Some(8));
}

#[test]
fn bare_names_classify_by_token() {
    assert_eq!(TypeRef::from_name("u8"), TypeRef::Primitive(Primitive::U8));
    assert_eq!(TypeRef::from_name("Input"), TypeRef::declared("Input"));
    assert_eq!(TypeRef::from_name("buffermut").name(), "buffermut");
}
