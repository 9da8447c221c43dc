//! Rendered output checked against a real JSON parser

use crate::test_utils::sample_document;
use gentable::{render, render_with, EscapeMode, List, RenderOptions, Table, ToJson, Value};
use serde_json::json;

fn parse(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|err| panic!("invalid JSON ({}): {}", err, text))
}

#[test]
fn test_scenario_document() {
    let mut inner = Table::new();
    inner.insert("d", 2i32);
    let mut table = Table::new();
    table.insert("a", 1i32);
    table.insert("b", "x");
    table.insert("c", inner);

    let text = render(&table, false);
    assert_eq!(parse(&text), json!({"a": 1, "b": "x", "c": {"d": 2}}));
    assert_eq!(text.matches(',').count(), 2);
}

#[test]
fn test_empty_map_is_exactly_braces() {
    assert_eq!(render(&Table::new(), false), "{}");
}

#[test]
fn test_sample_document_compact_and_pretty_agree() {
    let doc = sample_document();
    let compact = render(&doc, false);
    let pretty = render(&doc, true);

    assert!(!compact.contains('\n'));
    assert!(pretty.contains("\n  \""));
    assert_eq!(parse(&compact), parse(&pretty));

    let parsed = parse(&compact);
    assert_eq!(parsed["name"], json!("Ada \"the first\""));
    assert_eq!(parsed["id"], json!(1_234_567_890_123i64));
    assert_eq!(parsed["address"]["zip"], json!(49007));
    assert_eq!(parsed["scores"][1], json!(87));
    assert_eq!(parsed["scores"][2], json!({}));
    assert_eq!(parsed["empty"], json!({}));
}

#[test]
fn test_float_precision() {
    let doc = sample_document();
    let text = render(&doc, false);
    assert!(text.contains(r#""ratio":0.250000"#));
    assert!(text.contains("98.500000"));
}

#[test]
fn test_pretty_indentation_per_depth() {
    let mut list = List::new();
    list.push(Value::list());
    let mut table = Table::new();
    table.insert("l", list);

    assert_eq!(render(&table, true), "{\n  \"l\":[\n    []\n  ]\n}");
}

#[test]
fn test_control_characters_round_trip() {
    let text = "tab\there\u{1}\u{7f}é";
    let mut table = Table::new();
    table.insert(text, text);

    let parsed = parse(&table.to_json());
    assert_eq!(parsed[text], json!(text));
}

#[test]
fn test_raw_mode_matches_unescaped_output() {
    let mut table = Table::new();
    table.insert("k", "a\\b");

    let raw = render_with(&table, RenderOptions::compact().with_escape(EscapeMode::Raw));
    assert_eq!(raw, r#"{"k":"a\b"}"#);
    assert_eq!(table.to_json(), r#"{"k":"a\\b"}"#);
}

#[test]
fn test_large_table_renders_every_entry() {
    let table: Table = (0..1000).map(|i| (format!("k{}", i), i)).collect();
    let parsed = parse(&table.to_json_pretty());
    let object = parsed.as_object().unwrap();
    assert_eq!(object.len(), 1000);
    assert_eq!(object["k999"], json!(999));
}
