use typeport_core::{
    Declaration, EnumBacking, EnumMember, Field, Format, Primitive, Target, TypeExpr,
};

use crate::test_utils::{dump, id, named};

#[test]
fn dump_every_shape() {
    let out = dump(vec![
        Declaration::external(
            id("Time"),
            [
                (Target::TypeScript, "./time".to_string()),
                (Target::Dart, "package:app/time.dart".to_string()),
            ],
        ),
        Declaration::formatted_alias(id("Stamp"), Primitive::Int, Format::Timestamp),
        Declaration::enumeration(
            id("Status"),
            EnumBacking::String,
            vec![EnumMember::string("Live", "live").with_label("Live")],
        ),
        Declaration::opaque(id("Blob")),
        Declaration::structure(
            id("Record"),
            vec![
                Field::new("At", named("Time")),
                Field::new("Stamp", named("Stamp")),
                Field::new("Status", named("Status")),
                Field::new("Raw", named("Blob")),
                Field::new("Grid", TypeExpr::array(TypeExpr::array(Primitive::Float.into(), 2), 3)),
            ],
        ),
    ]);

    insta::assert_snapshot!(out, @r#"
    pkg.Blob opaque
    pkg.Stamp alias
      = int (Timestamp)
    pkg.Status enum
      Live = "live" "Live"
    pkg.Time external
      typescript: ./time
      dart: package:app/time.dart
    pkg.Record struct
      At: pkg.Time
      Stamp: pkg.Stamp
      Status: pkg.Status
      Raw: pkg.Blob
      Grid: [3][2]float
    "#);
}

#[test]
fn dump_empty_schema() {
    assert_eq!(dump(vec![]), "");
}
