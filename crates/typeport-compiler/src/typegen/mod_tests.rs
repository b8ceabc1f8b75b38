use indoc::indoc;
use typeport_core::{Declaration, Field, Primitive, Target};

use crate::test_utils::{analyze, id, named};

use super::*;

fn block(name: &str, content: &str, priority: bool) -> Block {
    Block {
        origin: None,
        name: name.to_string(),
        content: content.to_string(),
        priority,
    }
}

#[test]
fn render_puts_priority_blocks_first() {
    let output = Output {
        target: Target::TypeScript,
        blocks: vec![
            block("A", "type A = 1;", false),
            block("./b", "import { B } from \"./b\";", true),
            block("C", "type C = 2;\n\n", false),
        ],
    };

    insta::assert_snapshot!(output.render(), @r#"
    import { B } from "./b";

    type A = 1;

    type C = 2;
    "#);
    assert!(output.render().ends_with("2;\n"));
}

#[test]
fn blocks_carry_their_origin() {
    let analysis = analyze(vec![
        Declaration::enumeration(
            id("Color"),
            typeport_core::EnumBacking::Int,
            vec![typeport_core::EnumMember::int("Red", 0).with_label("Red")],
        ),
        Declaration::structure(id("Pen"), vec![Field::new("Ink", named("Color"))]),
    ]);
    let output = analysis.emit(&TargetConfig::typescript());

    let color = id("Color");
    let names: Vec<&str> = output
        .blocks_for(&color)
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(names, ["Color", "ColorLabels"]);
    assert_eq!(
        output.block("Pen").and_then(|b| b.origin.clone()),
        Some(id("Pen"))
    );
}

#[test]
fn emit_all_keeps_config_order() {
    let analysis = analyze(vec![Declaration::structure(
        id("Camp"),
        vec![Field::new("Name", Primitive::String)],
    )]);
    let configs = [
        TargetConfig::dart(),
        TargetConfig::typescript(),
        TargetConfig::Dart(dart::Config::new().header(true)),
    ];

    let outputs = analysis.emit_all(&configs);
    let targets: Vec<Target> = outputs.iter().map(|o| o.target).collect();
    assert_eq!(targets, [Target::Dart, Target::TypeScript, Target::Dart]);
    assert_eq!(outputs[0], analysis.emit(&configs[0]));
    assert_eq!(outputs[1], analysis.emit(&configs[1]));
    assert!(outputs[2].render().starts_with("// Code generated by typeport. DO NOT EDIT.\n"));
}

#[test]
fn target_config_from_json() {
    let configs: Vec<TargetConfig> = serde_json::from_str(indoc! {r#"
        [
          { "target": "typescript", "brand_aliases": false },
          { "target": "dart" }
        ]
    "#})
    .unwrap();

    assert_eq!(
        configs,
        [
            TargetConfig::TypeScript(typescript::Config::new().brand_aliases(false)),
            TargetConfig::dart(),
        ]
    );
    assert_eq!(configs[0].target(), Target::TypeScript);
}
