use typeport_core::{Declaration, Field, Primitive, TypeExpr, UnionMember};

use crate::graph::Ty;
use crate::test_utils::{analyze, dump, id, named};

#[test]
fn self_reference_needs_indirection() {
    let analysis = analyze(vec![Declaration::structure(
        id("Node"),
        vec![
            Field::new("Children", TypeExpr::slice(named("Node"))),
            Field::new("Parent", named("Node")),
        ],
    )]);
    let schema = analysis.schema();
    let node = schema.lookup(&id("Node")).unwrap();

    assert_eq!(schema.back_references().collect::<Vec<_>>(), [(node, node)]);
    assert!(schema.needs_indirection(node, node));
}

#[test]
fn fixed_array_elements_need_indirection() {
    let analysis = analyze(vec![Declaration::structure(
        id("Node"),
        vec![Field::new("Pair", TypeExpr::array(named("Node"), 2))],
    )]);
    let schema = analysis.schema();
    let node = schema.lookup(&id("Node")).unwrap();
    let optional = Ty::Optional(Box::new(Ty::Node(node)));
    let pair = |elem: Ty| Ty::Array {
        elem: Box::new(elem),
        len: 2,
    };

    assert_eq!(schema.field_ty(node, &pair(Ty::Node(node))), pair(optional.clone()));
    assert_eq!(schema.field_ty(node, &optional), optional);
    let slice = Ty::Slice(Box::new(Ty::Node(node)));
    assert_eq!(schema.field_ty(node, &slice), slice);
}

#[test]
fn indirection_follows_emission_order() {
    let analysis = analyze(vec![
        Declaration::structure(id("A"), vec![Field::new("B", named("B"))]),
        Declaration::structure(id("B"), vec![Field::new("A", named("A"))]),
        Declaration::scalar_alias(id("Score"), Primitive::Int),
    ]);
    let schema = analysis.schema();
    let [a, b, score] = ["A", "B", "Score"].map(|n| schema.lookup(&id(n)).unwrap());

    assert_eq!(schema.position(b), Some(0));
    assert_eq!(schema.position(a), Some(1));
    assert!(!schema.needs_indirection(a, b));
    assert!(schema.needs_indirection(b, a));
    // Scalars are never rendered indirectly.
    assert!(!schema.needs_indirection(a, score));
}

#[test]
fn generic_lists_its_instances() {
    let analysis = analyze(vec![
        Declaration::scalar_alias(id("IdFile"), Primitive::String),
        Declaration::scalar_alias(id("IdCamp"), Primitive::String),
        Declaration::generic(
            id("Holder"),
            "T",
            vec![Field::new("Value", TypeExpr::param("T"))],
            vec![named("IdFile"), named("IdCamp")],
        ),
    ]);
    let schema = analysis.schema();
    let holder = schema.lookup(&id("Holder")).unwrap();

    let instances: Vec<String> = schema
        .instances_of(&id("Holder"))
        .into_iter()
        .map(|i| schema.node(i).identity.to_string())
        .collect();
    assert_eq!(instances, ["pkg.Holder[pkg.IdCamp]", "pkg.Holder[pkg.IdFile]"]);
    assert_eq!(schema.position(holder), None);
    assert!(!schema.order().contains(&holder));
    assert!(schema.instances_of(&id("IdCamp")).is_empty());
}

#[test]
fn shapes_in_emission_order() {
    let out = dump(vec![
        Declaration::union(
            id("Event"),
            vec![
                UnionMember::new("created", id("Created")),
                UnionMember::new("deleted", id("Deleted")),
            ],
        ),
        Declaration::structure(
            id("Created"),
            vec![
                Field::new("At", named("Date_")),
                Field::new("Next", TypeExpr::optional(named("Event"))),
            ],
        )
        .implementing(id("Event")),
        Declaration::structure(id("Deleted"), vec![Field::new("At", named("Date_"))]),
        Declaration::scalar_alias(id("Date_"), Primitive::String),
        Declaration::opaque(id("Blob")),
    ]);

    insta::assert_snapshot!(out, @r"
    pkg.Blob opaque
    pkg.Date_ alias
      = string
    pkg.Deleted struct
      At: pkg.Date_
      implements pkg.Event
    pkg.Event union
      created => pkg.Created
      deleted => pkg.Deleted
    pkg.Created struct
      At: pkg.Date_
      Next: ?pkg.Event
      implements pkg.Event
    back-references:
      pkg.Event -> pkg.Created
    ");
}

#[test]
fn resolve_on_schema() {
    let analysis = analyze(vec![Declaration::opaque(id("Blob"))]);
    let schema = analysis.schema();

    assert_eq!(schema.len(), 1);
    assert!(schema.resolve(&id("Blob")).is_ok());
    insta::assert_snapshot!(schema.resolve(&id("Nope")).unwrap_err(), @"`pkg.Nope` is not declared");
}
