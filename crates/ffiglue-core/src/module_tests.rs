use indexmap::IndexMap;

use crate::Error;
use crate::decl::{TypeDecl, Variant};
use crate::module::{BindingModule, DeclSet, LibraryLocation, Profile, Signature};
use crate::types::{Primitive, TypeRef};

fn input() -> TypeDecl {
    TypeDecl::structure(
        "Input",
        IndexMap::from([
            ("a".to_string(), TypeRef::from(Primitive::I32)),
            ("b".to_string(), TypeRef::from(Primitive::I32)),
        ]),
    )
}

#[test]
fn duplicate_function_is_rejected() {
    let err = BindingModule::builder("demo")
        .signature(Signature::new("add", vec![], Primitive::Void))
        .signature(Signature::new("add", vec![], Primitive::I32))
        .build()
        .unwrap_err();
    assert_eq!(err, Error::DuplicateFunction("add".into()));
}

#[test]
fn duplicate_type_is_rejected() {
    let err = DeclSet::new(vec![input(), input()]).unwrap_err();
    assert_eq!(err, Error::DuplicateType("Input".into()));
}

#[test]
fn declaration_may_not_shadow_primitive() {
    let err = BindingModule::builder("demo")
        .type_decl(TypeDecl::structure("u8", IndexMap::new()))
        .build()
        .unwrap_err();
    assert_eq!(err, Error::ShadowsPrimitive("u8".into()));
}

#[test]
fn union_checks() {
    let empty = BindingModule::builder("demo")
        .type_decl(TypeDecl::union("Never", vec![]))
        .build()
        .unwrap_err();
    assert_eq!(empty, Error::EmptyUnion("Never".into()));

    let dup = BindingModule::builder("demo")
        .type_decl(TypeDecl::union(
            "Shape",
            vec![Variant::unit("Empty"), Variant::unit("Empty")],
        ))
        .build()
        .unwrap_err();
    assert!(matches!(dup, Error::DuplicateVariant { variant, .. } if variant == "Empty"));
}

#[test]
fn decl_set_lookup_after_sorting() {
    let set = DeclSet::new(vec![
        TypeDecl::structure("Zed", IndexMap::new()),
        input(),
        TypeDecl::union("Mid", vec![Variant::unit("A")]),
    ])
    .unwrap();

    let names: Vec<_> = set.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Input", "Mid", "Zed"]);
    assert!(set.contains("Mid"));
    assert!(set.get("Missing").is_none());
}

#[test]
fn declaration_references_include_variant_fields() {
    let shape = TypeDecl::union(
        "Shape",
        vec![
            Variant::with_fields(
                "Circle",
                IndexMap::from([("r".to_string(), TypeRef::from(Primitive::F64))]),
            ),
            Variant::unit("Empty"),
        ],
    );
    let refs: Vec<_> = shape
        .references()
        .into_iter()
        .map(|(path, ty)| format!("{path}: {ty}"))
        .collect();
    assert_eq!(refs, ["Circle.r: f64"]);
}

#[test]
fn default_location_tracks_profile() {
    assert_eq!(
        LibraryLocation::target_dir(Profile::Release),
        LibraryLocation::Local("../target/release".into())
    );
    assert_eq!(LibraryLocation::default().base(), "../target/debug");
    assert!(LibraryLocation::Remote("https://x".into()).is_remote());
}

#[test]
fn function_names_must_be_plain_identifiers() {
    let err = BindingModule::builder("demo")
        .signature(Signature::new("my-fn", vec![Primitive::I32.into()], Primitive::I32))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidIdentifier {
            what: "function",
            name: "my-fn".into(),
        }
    );
    assert_eq!(err.to_string(), "function name `my-fn` is not a valid identifier");

    let err = BindingModule::builder("demo")
        .signature(Signature::new("delete", vec![], Primitive::Void))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::ReservedName {
            what: "function",
            name: "delete".into(),
        }
    );
}

#[test]
fn type_names_must_be_plain_identifiers() {
    let err = BindingModule::builder("demo")
        .type_decl(TypeDecl::structure("Content-Type", IndexMap::new()))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier { what: "type", .. }));

    for name in ["string", "class"] {
        let err = BindingModule::builder("demo")
            .type_decl(TypeDecl::structure(name, IndexMap::new()))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::ReservedName {
                what: "type",
                name: name.into(),
            }
        );
    }
}

#[test]
fn variant_interface_may_not_collide_with_declared_type() {
    let shape = TypeDecl::union(
        "Shape",
        vec![Variant::with_fields(
            "Circle",
            IndexMap::from([("r".to_string(), TypeRef::from(Primitive::F64))]),
        )],
    );
    let circle = TypeDecl::structure(
        "ShapeCircle",
        IndexMap::from([("x".to_string(), TypeRef::from(Primitive::Str))]),
    );

    let err = BindingModule::builder("demo")
        .type_decl(shape)
        .type_decl(circle)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::VariantNameClash {
            union: "Shape".into(),
            variant: "Circle".into(),
            name: "ShapeCircle".into(),
        }
    );
}

#[test]
fn variant_interfaces_must_be_distinct() {
    let siblings = BindingModule::builder("demo")
        .type_decl(TypeDecl::union(
            "Key",
            vec![Variant::unit("a_b"), Variant::unit("AB")],
        ))
        .build()
        .unwrap_err();
    assert!(matches!(siblings, Error::VariantNameClash { name, .. } if name == "KeyAB"));

    let across = BindingModule::builder("demo")
        .type_decl(TypeDecl::union("A", vec![Variant::unit("BC")]))
        .type_decl(TypeDecl::union("AB", vec![Variant::unit("C")]))
        .build()
        .unwrap_err();
    assert!(matches!(across, Error::VariantNameClash { name, .. } if name == "ABC"));
}

#[test]
fn fixed_layout_type_cannot_nest_in_structured_data() {
    let inner = TypeDecl::structure(
        "Inner",
        IndexMap::from([("id".to_string(), TypeRef::from(Primitive::U64))]),
    )
    .fixed();
    let outer = TypeDecl::structure(
        "Outer",
        IndexMap::from([("inner".to_string(), TypeRef::declared("Inner"))]),
    );

    let err = BindingModule::builder("demo")
        .type_decl(inner.clone())
        .type_decl(outer)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::FixedLayoutInStructured {
            type_name: "Outer".into(),
            field: "inner".into(),
            fixed: "Inner".into(),
        }
    );

    let wrapped = TypeDecl::union(
        "Event",
        vec![Variant::with_fields(
            "Tick",
            IndexMap::from([("at".to_string(), TypeRef::declared("Inner"))]),
        )],
    );
    let err = BindingModule::builder("demo")
        .type_decl(inner)
        .type_decl(wrapped)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::FixedLayoutInStructured { field, .. } if field == "Tick.at"));
}
