use crate::{
    DeclKind, Declaration, EnumBacking, EnumMember, EnumValue, Field, Identity, Primitive, Target,
    TypeExpr,
};

fn id(name: &str) -> Identity {
    Identity::new("pkg", name)
}

#[test]
fn same_shape_ignores_doc() {
    let a = Declaration::scalar_alias(id("IdCamp"), Primitive::Int);
    let b = Declaration::scalar_alias(id("IdCamp"), Primitive::Int).with_doc("campaign id");
    let c = Declaration::scalar_alias(id("IdCamp"), Primitive::String);
    assert!(a.same_shape(&b));
    assert!(!a.same_shape(&c));
}

#[test]
fn implementing_only_touches_structs() {
    let s = Declaration::structure(id("Circle"), vec![]).implementing(id("Shape"));
    let DeclKind::Struct(decl) = &s.kind else {
        panic!("expected struct");
    };
    assert_eq!(decl.implements, vec![id("Shape")]);

    let e = Declaration::opaque(id("Blob")).implementing(id("Shape"));
    assert_eq!(e.kind, DeclKind::Opaque);
}

#[test]
fn field_builders() {
    let f = Field::new("Base", id("Base"))
        .as_embedded()
        .opaque_in(Target::Dart)
        .opaque_in(Target::Dart);
    assert!(f.embedded);
    assert_eq!(f.opaque_for, vec![Target::Dart]);
}

#[test]
fn enum_value_backing() {
    assert_eq!(EnumMember::int("A", -3).value.backing(), EnumBacking::Int);
    assert_eq!(EnumMember::string("B", "b").value.backing(), EnumBacking::String);
    assert_eq!(EnumValue::Str("b\"q".into()).to_string(), r#""b\"q""#);
}

#[test]
fn declaration_serializes_flat() {
    let decl = Declaration::structure(
        id("Pair"),
        vec![Field::new("Items", TypeExpr::array(Primitive::Int.into(), 2))],
    );
    let json = serde_json::to_string(&decl).unwrap();
    insta::assert_snapshot!(json, @r#"{"id":"pkg.Pair","kind":"struct","fields":[{"name":"Items","type":{"array":{"elem":{"primitive":"int"},"len":2}}}]}"#);

    let back: Declaration = serde_json::from_str(&json).unwrap();
    assert_eq!(back, decl);
}
