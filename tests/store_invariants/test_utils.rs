//! Shared helpers for the invariant suite

use gentable::{List, Table, Value};
use proptest::prelude::*;

/// An operation applied to both a `Table` and a reference map
#[derive(Debug, Clone)]
pub enum TableOp {
    Insert(String, i64),
    Remove(String),
}

/// Keys drawn from a small alphabet so operations collide often
pub fn small_key() -> impl Strategy<Value = String> {
    "[a-f]{1,3}"
}

pub fn table_op() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        3 => (small_key(), any::<i64>()).prop_map(|(k, v)| TableOp::Insert(k, v)),
        1 => small_key().prop_map(TableOp::Remove),
    ]
}

/// Build a table holding `key{i} -> i` for `0..count`
pub fn numbered_table(count: i32) -> Table {
    (0..count).map(|i| (format!("key{}", i), i)).collect()
}

/// Build the nested sample used across the JSON tests
pub fn sample_document() -> Table {
    let mut address = Table::new();
    address.insert("city", "Springfield");
    address.insert("zip", 49007i32);

    let mut scores = List::new();
    scores.push(98.5f64);
    scores.push(87i32);
    scores.push(Value::table());

    let mut root = Table::new();
    root.insert("name", "Ada \"the first\"");
    root.insert("age", 36i32);
    root.insert("id", 1_234_567_890_123i64);
    root.insert("ratio", 0.25f32);
    root.insert("address", address);
    root.insert("scores", scores);
    root.insert("empty", Table::new());
    root
}
