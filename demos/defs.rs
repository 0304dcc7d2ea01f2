//! Modifier Definition Example
//!
//! This example demonstrates the declarative layer: modifier definitions
//! parsed from JSON (as a registry would load them from content files),
//! compiled into typed modifiers, and applied to properties. Definitions
//! that do not fit the target stat type fail at compile time, before they
//! ever reach a property.

use serde::Deserialize;
use statmod::*;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum MoveMode {
    Walking,
    Swimming,
}
impl StatValue for MoveMode {}

fn main() {
    // A content catalog of numeric modifiers.
    let catalog = r#"[
        {
            "op": { "kind": "base-add", "value": 15.0 },
            "effect_tags": ["sturdy-boots"]
        },
        {
            "op": { "kind": "percent-add", "value": 0.3 },
            "effect_tags": ["wind-blessing"]
        },
        {
            "op": { "kind": "final-multiply", "value": 0.5 },
            "priority": 100,
            "effect_tags": ["encumbered"]
        }
    ]"#;
    let defs: Vec<ModifierDef> =
        serde_json::from_str(catalog).expect("catalog parses");

    let mut speed = StatProperty::new(100.0, Arc::new(NumericPipeline));
    let content = OwnerId::new();
    for def in &defs {
        let modifier = def.compile::<f64>().expect("numeric def compiles");
        speed.add_modifier(modifier, content);
    }
    // (100 + 15) * 1.3 * 0.5
    println!("speed with catalog applied: {:.2}", speed.value());

    // Discrete stats compile through the override path.
    let swim = ModifierDef::from_json(
        r#"{ "op": { "kind": "override", "value": "swimming" } }"#,
    )
    .expect("def parses");
    let mut mode = StatProperty::new(MoveMode::Walking, Arc::new(OverrideStrategy));
    mode.add_modifier(
        swim.compile_override::<MoveMode>().expect("override compiles"),
        content,
    );
    println!("move mode: {:?}", mode.value());

    // A mismatched definition is caught at translation, not at resolution.
    let bad = ModifierDef::from_json(
        r#"{ "op": { "kind": "override", "value": "not a number" } }"#,
    )
    .expect("def parses");
    match bad.compile::<f64>() {
        Ok(_) => unreachable!(),
        Err(e) => println!("rejected at the boundary: {e}"),
    }
}
