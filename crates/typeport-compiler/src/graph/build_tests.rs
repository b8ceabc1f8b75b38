use typeport_core::{Declaration, EnumBacking, EnumMember, Field, Primitive, TypeExpr, UnionMember};

use crate::Error;
use crate::diagnostics::Diagnostics;
use crate::options::UnresolvedPolicy;
use crate::test_utils::{id, named};

use super::*;

fn build_with(policy: UnresolvedPolicy, decls: Vec<Declaration>) -> Result<(TypeGraph, Diagnostics)> {
    let mut builder = GraphBuilder::new(policy);
    for decl in decls {
        builder.register(decl)?;
    }
    builder.finish()
}

fn build(decls: Vec<Declaration>) -> TypeGraph {
    build_with(UnresolvedPolicy::Error, decls).unwrap().0
}

fn build_err(decls: Vec<Declaration>) -> Error {
    build_with(UnresolvedPolicy::Error, decls).unwrap_err()
}

fn field_types(graph: &TypeGraph, name: &str) -> Vec<Ty> {
    let id = graph.lookup(&id(name)).unwrap();
    match &graph.node(id).kind {
        NodeKind::Struct { fields, .. } => fields.iter().map(|f| f.ty.clone()).collect(),
        other => panic!("expected a struct, got {}", other.describe()),
    }
}

#[test]
fn references_share_one_handle() {
    let graph = build(vec![
        Declaration::scalar_alias(id("Date_"), Primitive::String),
        Declaration::structure(
            id("Camp"),
            vec![
                Field::new("StartDate", named("Date_")),
                Field::new("EndDate", named("Date_")),
            ],
        ),
    ]);

    let date = graph.resolve(&id("Date_")).unwrap();
    assert_eq!(graph.resolve(&id("Date_")).unwrap(), date);
    assert_eq!(
        field_types(&graph, "Camp"),
        vec![Ty::Node(date), Ty::Node(date)]
    );
    assert_eq!(graph.edges(graph.resolve(&id("Camp")).unwrap()).len(), 1);
}

#[test]
fn forward_references_resolve() {
    let graph = build(vec![
        Declaration::structure(id("Camp"), vec![Field::new("Owner", named("User"))]),
        Declaration::structure(id("User"), vec![Field::new("Name", Primitive::String)]),
    ]);

    let user = graph.lookup(&id("User")).unwrap();
    assert_eq!(field_types(&graph, "Camp"), vec![Ty::Node(user)]);
}

#[test]
fn resolve_unknown_identity() {
    let graph = build(vec![Declaration::opaque(id("Blob"))]);

    let err = graph.resolve(&id("Missing")).unwrap_err();
    insta::assert_snapshot!(err, @"`pkg.Missing` is not declared");
}

#[test]
fn identical_redeclaration_is_ignored() {
    let decl = Declaration::scalar_alias(id("UserId"), Primitive::Int);
    let graph = build(vec![decl.clone(), decl.with_doc("Same shape, new doc.")]);

    assert_eq!(graph.len(), 1);
}

#[test]
fn conflicting_redeclaration() {
    let err = build_err(vec![
        Declaration::scalar_alias(id("UserId"), Primitive::Int),
        Declaration::scalar_alias(id("UserId"), Primitive::String),
    ]);

    assert_eq!(err, Error::DuplicateIdentity(id("UserId")));
    insta::assert_snapshot!(err, @"`pkg.UserId` is declared more than once with different shapes");
}

#[test]
fn unresolved_reference() {
    let err = build_err(vec![Declaration::structure(
        id("Camp"),
        vec![Field::new("Owner", TypeExpr::slice(named("User")))],
    )]);

    assert_eq!(err.identity(), &id("User"));
    insta::assert_snapshot!(err, @"`pkg.User` is not declared (referenced from `pkg.Camp`)");
}

#[test]
fn unresolved_union_member() {
    let err = build_err(vec![Declaration::union(
        id("Shape"),
        vec![UnionMember::new("circle", id("Circle"))],
    )]);

    insta::assert_snapshot!(err, @"`pkg.Circle` is not declared (referenced from `pkg.Shape`)");
}

#[test]
fn external_passthrough() {
    let (graph, diagnostics) = build_with(
        UnresolvedPolicy::External,
        vec![Declaration::structure(
            id("Camp"),
            vec![Field::new("Created", named("Time"))],
        )],
    )
    .unwrap();

    let time = graph.lookup(&id("Time")).unwrap();
    assert!(matches!(
        &graph.node(time).kind,
        NodeKind::External { imports } if imports.is_empty()
    ));
    insta::assert_snapshot!(
        diagnostics.render(),
        @"note: `pkg.Time` is not declared, passed through as external: referenced from `pkg.Camp`"
    );
}

#[test]
fn generic_argument_must_be_declared() {
    let decls = vec![Declaration::generic(
        id("Holder"),
        "T",
        vec![Field::new("Value", TypeExpr::param("T"))],
        vec![named("IdCamp")],
    )];

    let err = build_with(UnresolvedPolicy::External, decls).unwrap_err();
    assert_eq!(
        err,
        Error::UnresolvedGenericArgument {
            generic: id("Holder"),
            argument: id("IdCamp"),
        }
    );
    insta::assert_snapshot!(err, @"generic `pkg.Holder` is instantiated with `pkg.IdCamp`, which is not declared");
}

#[test]
fn nested_generic_argument_must_be_declared() {
    let err = build_err(vec![
        Declaration::generic(
            id("Holder"),
            "T",
            vec![Field::new("Value", TypeExpr::param("T"))],
            vec![],
        ),
        Declaration::structure(
            id("Camp"),
            vec![Field::new(
                "Ids",
                TypeExpr::instance(id("Holder"), TypeExpr::slice(named("IdCamp"))),
            )],
        ),
    ]);

    assert_eq!(err.identity(), &id("Holder"));
}

#[test]
fn parameter_outside_generic() {
    let err = build_err(vec![Declaration::structure(
        id("Camp"),
        vec![Field::new("Value", TypeExpr::param("T"))],
    )]);

    insta::assert_snapshot!(err, @"`pkg.Camp` uses type parameter `T` outside of a generic");
}

#[test]
fn instantiation_requests_share_one_node() {
    let graph = build(vec![
        Declaration::scalar_alias(id("IdCamp"), Primitive::Int),
        Declaration::generic(
            id("Holder"),
            "T",
            vec![Field::new("Value", TypeExpr::param("T"))],
            vec![named("IdCamp")],
        ),
        Declaration::structure(
            id("Camp"),
            vec![
                Field::new("A", TypeExpr::instance(id("Holder"), named("IdCamp"))),
                Field::new("B", TypeExpr::instance(id("Holder"), named("IdCamp"))),
            ],
        ),
    ]);

    let instance = graph.lookup(&id("Holder[pkg.IdCamp]")).unwrap();
    assert_eq!(graph.len(), 4);
    assert_eq!(
        field_types(&graph, "Camp"),
        vec![Ty::Node(instance), Ty::Node(instance)]
    );
    assert!(matches!(graph.node(instance).kind, NodeKind::Pending { .. }));
}

#[test]
fn instance_identity_spells_composite_arguments() {
    let graph = build(vec![
        Declaration::scalar_alias(id("IdCamp"), Primitive::Int),
        Declaration::generic(
            id("Holder"),
            "T",
            vec![Field::new("Value", TypeExpr::param("T"))],
            vec![
                TypeExpr::slice(named("IdCamp")),
                TypeExpr::map(Primitive::String.into(), TypeExpr::array(Primitive::Int.into(), 2)),
                TypeExpr::optional(Primitive::Bool.into()),
            ],
        ),
    ]);

    let names: Vec<String> = graph
        .iter()
        .skip(2)
        .map(|(_, node)| node.identity.to_string())
        .collect();
    insta::assert_snapshot!(names.join("\n"), @r"
    pkg.Holder[[]pkg.IdCamp]
    pkg.Holder[map[string][2]int]
    pkg.Holder[?bool]
    ");
}

#[test]
fn edge_kinds() {
    let graph = build(vec![
        Declaration::structure(id("Base"), vec![Field::new("Id", Primitive::Int)]),
        Declaration::structure(
            id("Circle"),
            vec![
                Field::new("Base", named("Base")).as_embedded(),
                Field::new("Parent", TypeExpr::optional(named("Circle"))),
            ],
        ),
        Declaration::union(id("Shape"), vec![UnionMember::new("circle", id("Circle"))]),
        Declaration::enumeration(id("Color"), EnumBacking::Int, vec![EnumMember::int("Red", 0)]),
    ]);

    let node = |name: &str| graph.lookup(&id(name)).unwrap();
    assert_eq!(
        graph.edges(node("Circle")),
        &[
            Edge {
                target: node("Base"),
                kind: EdgeKind::Inline,
            },
            Edge {
                target: node("Circle"),
                kind: EdgeKind::Reference,
            },
        ]
    );
    assert_eq!(
        graph.edges(node("Shape")),
        &[Edge {
            target: node("Circle"),
            kind: EdgeKind::Variant,
        }]
    );
    assert!(graph.edges(node("Color")).is_empty());
}
