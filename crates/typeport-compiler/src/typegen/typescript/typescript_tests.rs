use typeport_core::{
    Declaration, EnumBacking, EnumMember, Field, Format, Identity, Primitive, Target, TypeExpr,
    UnionMember,
};

use crate::test_utils::{analyze, id, named, typescript};

use super::*;

fn ts_with(config: Config, decls: Vec<Declaration>) -> String {
    emit_with_config(analyze(decls).schema(), config).render()
}

#[test]
fn alias_used_twice_renders_once() {
    let out = typescript(vec![
        Declaration::scalar_alias(id("Date_"), Primitive::String),
        Declaration::structure(
            id("Camp"),
            vec![
                Field::new("StartDate", named("Date_")),
                Field::new("EndDate", named("Date_")),
            ],
        ),
    ]);

    assert_eq!(out.matches("type Date_").count(), 1);
    insta::assert_snapshot!(out, @r#"
    // pkg.Date_
    export type Date_ = string & { readonly __brand: "pkg.Date_" };

    // pkg.Camp
    export interface Camp {
      StartDate: Date_;
      EndDate: Date_;
    }
    "#);
}

#[test]
fn enum_with_label_table() {
    let out = typescript(vec![Declaration::enumeration(
        id("Letter"),
        EnumBacking::Int,
        vec![
            EnumMember::int("A", 0).with_label("Alpha"),
            EnumMember::int("B", 1).with_label("Bravo"),
            EnumMember::int("C", 2).with_label("Charlie"),
            EnumMember::int("D", 3).with_label("Delta"),
            EnumMember::int("E", 4),
        ],
    )]);

    insta::assert_snapshot!(out, @r#"
    // pkg.Letter
    export enum Letter {
      A = 0,
      B = 1,
      C = 2,
      D = 3,
      E = 4,
    }

    export const LetterLabels: { [key in Letter]: string } = {
      [Letter.A]: "Alpha",
      [Letter.B]: "Bravo",
      [Letter.C]: "Charlie",
      [Letter.D]: "Delta",
      [Letter.E]: "",
    };
    "#);
}

#[test]
fn string_enum_and_quoted_members() {
    let out = typescript(vec![Declaration::enumeration(
        id("Mime"),
        EnumBacking::String,
        vec![
            EnumMember::string("Json", "application/json").with_label("JSON"),
            EnumMember::string("plain-text", "text/plain").with_label("Plain \"text\""),
        ],
    )]);

    insta::assert_snapshot!(out, @r#"
    // pkg.Mime
    export enum Mime {
      Json = "application/json",
      "plain-text" = "text/plain",
    }

    export const MimeLabels: { [key in Mime]: string } = {
      [Mime.Json]: "JSON",
      [Mime["plain-text"]]: "Plain \"text\"",
    };
    "#);
}

#[test]
fn one_interface_per_instance() {
    let out = typescript(vec![
        Declaration::scalar_alias(id("IdCamp"), Primitive::String),
        Declaration::scalar_alias(id("IdFile"), Primitive::String),
        Declaration::generic(
            id("Holder"),
            "T",
            vec![Field::new("Value", TypeExpr::param("T"))],
            vec![named("IdCamp"), named("IdFile")],
        ),
    ]);

    assert_eq!(out.matches("interface").count(), 2);
    insta::assert_snapshot!(out, @r#"
    // pkg.IdCamp
    export type IdCamp = string & { readonly __brand: "pkg.IdCamp" };

    // pkg.Holder[pkg.IdCamp]
    export interface HolderIdCamp {
      Value: IdCamp;
    }

    // pkg.IdFile
    export type IdFile = string & { readonly __brand: "pkg.IdFile" };

    // pkg.Holder[pkg.IdFile]
    export interface HolderIdFile {
      Value: IdFile;
    }
    "#);
}

#[test]
fn recursive_struct() {
    let out = typescript(vec![Declaration::structure(
        id("Node"),
        vec![
            Field::new("Children", TypeExpr::slice(named("Node"))),
            Field::new("Parent", named("Node")),
        ],
    )]);

    insta::assert_snapshot!(out, @r"
    // pkg.Node
    export interface Node {
      Children: Node[] | null;
      Parent: Node | null;
    }
    ");
}

#[test]
fn self_reference_in_fixed_array() {
    let out = typescript(vec![Declaration::structure(
        id("Node"),
        vec![
            Field::new("Pair", TypeExpr::array(named("Node"), 2)),
            Field::new("Grid", TypeExpr::array(TypeExpr::array(named("Node"), 1), 2)),
        ],
    )]);

    insta::assert_snapshot!(out, @r"
    // pkg.Node
    export interface Node {
      Pair: [Node | null, Node | null];
      Grid: [[Node | null], [Node | null]];
    }
    ");
}

#[test]
fn mutual_recursion_breaks_at_the_back_reference() {
    let out = typescript(vec![
        Declaration::structure(id("A"), vec![Field::new("B", named("B"))]),
        Declaration::structure(id("B"), vec![Field::new("A", named("A"))]),
    ]);

    insta::assert_snapshot!(out, @r"
    // pkg.B
    export interface B {
      A: A | null;
    }

    // pkg.A
    export interface A {
      B: B;
    }
    ");
}

#[test]
fn discriminated_union() {
    let out = typescript(vec![
        Declaration::union(
            id("Shape"),
            vec![
                UnionMember::new("circle", id("Circle")),
                UnionMember::new("square", id("Square")),
            ],
        ),
        Declaration::structure(id("Circle"), vec![Field::new("Radius", Primitive::Float)]),
        Declaration::structure(id("Square"), vec![Field::new("Side", Primitive::Float)]),
    ]);

    insta::assert_snapshot!(out, @r#"
    // pkg.Circle
    export interface Circle {
      Radius: number;
    }

    // pkg.Square
    export interface Square {
      Side: number;
    }

    export enum ShapeKind {
      circle = "circle",
      square = "square",
    }

    // pkg.Shape
    export type Shape =
      | { Kind: ShapeKind.circle; Data: Circle }
      | { Kind: ShapeKind.square; Data: Square };
    "#);
}

#[test]
fn empty_union_is_never() {
    let out = typescript(vec![Declaration::union(id("Nothing"), vec![])]);

    insta::assert_snapshot!(out, @r"
    // pkg.Nothing
    export type Nothing = never;
    ");
}

#[test]
fn containers() {
    let analysis = analyze(vec![
        Declaration::enumeration(
            id("Color"),
            EnumBacking::Int,
            vec![EnumMember::int("Red", 0).with_label("Red")],
        ),
        Declaration::scalar_alias(id("UserId"), Primitive::Int),
        Declaration::structure(
            id("Index"),
            vec![
                Field::new("ByName", TypeExpr::map(Primitive::String.into(), Primitive::Int.into())),
                Field::new("ByCount", TypeExpr::map(Primitive::Int.into(), Primitive::String.into())),
                Field::new("ByColor", TypeExpr::map(named("Color"), Primitive::Bool.into())),
                Field::new("ByUser", TypeExpr::map(named("UserId"), Primitive::Int.into())),
                Field::new("ByFlag", TypeExpr::map(Primitive::Bool.into(), Primitive::Int.into())),
                Field::new(
                    "Grid",
                    TypeExpr::array(TypeExpr::array(Primitive::Float.into(), 2), 3),
                ),
                Field::new("Maybe", TypeExpr::optional(Primitive::String.into())),
                Field::new(
                    "Tags",
                    TypeExpr::slice(TypeExpr::optional(Primitive::String.into())),
                ),
            ],
        ),
    ]);
    let output = emit(analysis.schema());

    insta::assert_snapshot!(output.block("Index").unwrap().content, @r"
    // pkg.Index
    export interface Index {
      ByName: { [key: string]: number } | null;
      ByCount: { [key: number]: string } | null;
      ByColor: Partial<Record<Color, boolean>> | null;
      ByUser: Map<UserId, number> | null;
      ByFlag: Map<boolean, number> | null;
      Grid: [[number, number], [number, number], [number, number]];
      Maybe: string | null;
      Tags: (string | null)[] | null;
    }
    ");
}

#[test]
fn plain_aliases() {
    let out = ts_with(
        Config::new().brand_aliases(false),
        vec![
            Declaration::formatted_alias(id("Date_"), Primitive::String, Format::Date),
            Declaration::scalar_alias(id("UserId"), Primitive::Int),
            Declaration::structure(
                id("Visits"),
                vec![Field::new("ByUser", TypeExpr::map(named("UserId"), named("Date_")))],
            ),
        ],
    );

    insta::assert_snapshot!(out, @r"
    // pkg.Date_
    // ISO 8601 date (YYYY-MM-DD)
    // distinct from string, not enforced by the type checker
    export type Date_ = string;

    // pkg.UserId
    // distinct from number, not enforced by the type checker
    export type UserId = number;

    // pkg.Visits
    export interface Visits {
      ByUser: { [key: number]: Date_ } | null;
    }
    ");
}

#[test]
fn opaque_declarations_and_fields() {
    let out = typescript(vec![
        Declaration::opaque(id("Blob")),
        Declaration::structure(
            id("Doc"),
            vec![
                Field::new("Body", Primitive::String).opaque_in(Target::TypeScript),
                Field::new("Title", Primitive::String).opaque_in(Target::Dart),
                Field::new("Meta", named("Blob")),
            ],
        ),
    ]);

    insta::assert_snapshot!(out, @r"
    // pkg.Blob
    export type Blob = unknown;

    // pkg.Doc
    export interface Doc {
      Body: unknown;
      Title: string;
      Meta: Blob;
    }
    ");
}

#[test]
fn externals_are_imported_not_redeclared() {
    let out = typescript(vec![
        Declaration::external(id("Time"), [(Target::TypeScript, "./time.ts".to_string())]),
        Declaration::external(id("Zone"), [(Target::Dart, "package:tz/tz.dart".to_string())]),
        Declaration::structure(
            id("Event"),
            vec![
                Field::new("At", named("Time")),
                Field::new("Zone", named("Zone")),
            ],
        ),
    ]);

    insta::assert_snapshot!(out, @r#"
    import { Time } from "./time";

    // pkg.Event
    export interface Event {
      At: Time;
      Zone: Zone;
    }
    "#);
}

#[test]
fn colliding_externals_are_imported_under_an_alias() {
    let a = Identity::new("a", "User");
    let b = Identity::new("b", "User");
    let out = typescript(vec![
        Declaration::external(a.clone(), [(Target::TypeScript, "./a".to_string())]),
        Declaration::external(b.clone(), [(Target::TypeScript, "./b.ts".to_string())]),
        Declaration::structure(
            id("S"),
            vec![Field::new("A", a), Field::new("B", b)],
        ),
    ]);

    insta::assert_snapshot!(out, @r#"
    import { User } from "./a";

    import { User as BUser } from "./b";

    // pkg.S
    export interface S {
      A: User;
      B: BUser;
    }
    "#);
}

#[test]
fn header_docs_and_no_export() {
    let out = ts_with(
        Config::new().export(false).header(true),
        vec![
            Declaration::structure(id("Camp"), vec![Field::new("Name", Primitive::String)])
                .with_doc("A camp.\nSecond line."),
            Declaration::structure(id("Empty"), vec![]),
        ],
    );

    insta::assert_snapshot!(out, @r"
    // Code generated by typeport. DO NOT EDIT.

    // A camp.
    // Second line.
    // pkg.Camp
    interface Camp {
      Name: string;
    }

    // pkg.Empty
    type Empty = Record<string, never>;
    ");
}

#[test]
fn quoted_property_names() {
    let out = typescript(vec![Declaration::structure(
        id("Headers"),
        vec![
            Field::new("content-type", Primitive::String),
            Field::new("$ref", Primitive::String),
        ],
    )]);

    insta::assert_snapshot!(out, @r#"
    // pkg.Headers
    export interface Headers {
      "content-type": string;
      $ref: string;
    }
    "#);
}
