//! Table invariants under arbitrary operation sequences

use crate::test_utils::{numbered_table, table_op, TableOp};
use gentable::{Table, TableConfig, Value, ValueKind};
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn table_matches_reference_map(ops in prop::collection::vec(table_op(), 0..400)) {
        let mut table = Table::new();
        let mut reference = HashMap::new();

        for op in ops {
            match op {
                TableOp::Insert(key, value) => {
                    let previous = table.insert(key.clone(), value);
                    let expected = reference.insert(key, value).map(Value::from);
                    prop_assert_eq!(previous, expected);
                }
                TableOp::Remove(key) => {
                    let removed = table.remove(&key);
                    let expected = reference.remove(&key).map(Value::from);
                    prop_assert_eq!(removed, expected);
                    prop_assert!(!table.contains(&key));
                }
            }
        }

        prop_assert_eq!(table.len(), reference.len());
        for (key, value) in &reference {
            prop_assert_eq!(table.find_typed::<i64>(key), Some(*value));
        }
        prop_assert_eq!(table.iter().count(), reference.len());
    }

    #[test]
    fn resize_preserves_content(count in 1usize..2000, buckets in 1usize..64) {
        let mut table = Table::with_buckets(buckets).unwrap();
        for i in 0..count {
            table.insert(format!("k{}", i), i as i64);
        }
        prop_assert_eq!(table.len(), count);
        for i in 0..count {
            prop_assert_eq!(table.find_typed::<i64>(&format!("k{}", i)), Some(i as i64));
        }
    }

    #[test]
    fn overwrite_keeps_single_entry(key in ".{0,16}", first in any::<i32>(), second in ".{0,16}") {
        let mut table = Table::new();
        table.insert(key.clone(), first);
        table.insert(key.clone(), second.clone());
        prop_assert_eq!(table.len(), 1);
        prop_assert_eq!(table.find_typed::<&str>(&key), Some(second.as_str()));
    }

    #[test]
    fn any_load_factor_keeps_keys_findable(count in 0usize..600, load_factor in 1u32..100) {
        let config = TableConfig { load_factor, ..TableConfig::default() };
        let mut table = Table::with_config(config).unwrap();
        for i in 0..count {
            table.insert(format!("k{}", i), i as i32);
            prop_assert!(table.len() <= table.bucket_count());
        }
        prop_assert!(!table.contains("absent"));
        for i in 0..count {
            prop_assert_eq!(table.find_typed::<i32>(&format!("k{}", i)), Some(i as i32));
        }
    }
}

#[test]
fn test_primitive_round_trip() {
    let mut table = Table::new();
    table.insert("s", "text");
    table.insert("i", -5i32);
    table.insert("l", i64::MIN);
    table.insert("f", 1.25f32);
    table.insert("d", -0.5f64);

    assert_eq!(table.find_typed::<&str>("s"), Some("text"));
    assert_eq!(table.find_typed::<i32>("i"), Some(-5));
    assert_eq!(table.find_typed::<i64>("l"), Some(i64::MIN));
    assert_eq!(table.find_typed::<f32>("f"), Some(1.25));
    assert_eq!(table.find_typed::<f64>("d"), Some(-0.5));

    let kinds: Vec<(&str, ValueKind)> = ["s", "i", "l", "f", "d"]
        .iter()
        .map(|k| (*k, table.find(k).unwrap().kind()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("s", ValueKind::Str),
            ("i", ValueKind::Int32),
            ("l", ValueKind::Int64),
            ("f", ValueKind::Float32),
            ("d", ValueKind::Float64),
        ]
    );
}

#[test]
fn test_deletion_then_reinsert_after_churn() {
    let mut table = numbered_table(1000);
    for i in (0..1000).filter(|i| i % 3 != 0) {
        assert!(table.remove(&format!("key{}", i)).is_some());
    }
    assert_eq!(table.len(), 334);

    for i in 0..1000 {
        let key = format!("key{}", i);
        assert_eq!(table.contains(&key), i % 3 == 0, "{}", key);
    }

    for i in 0..1000 {
        table.insert(format!("key{}", i), -i);
    }
    assert_eq!(table.len(), 1000);
    assert_eq!(table.find_typed::<i32>("key999"), Some(-999));
}

#[test]
fn test_nested_tree_is_owned() {
    let mut leaf = Table::new();
    leaf.insert("depth", 2i32);
    let mut middle = Table::new();
    middle.insert("leaf", leaf);
    let mut root = Table::new();
    root.insert("middle", middle);

    let copy = root.clone();
    root.get_mut("middle")
        .and_then(Value::as_table_mut)
        .and_then(|m| m.get_mut("leaf"))
        .and_then(Value::as_table_mut)
        .unwrap()
        .insert("depth", 3i32);

    let depth = |t: &Table| {
        t.find_typed::<&Table>("middle")
            .and_then(|m| m.find_typed::<&Table>("leaf"))
            .and_then(|l| l.find_typed::<i32>("depth"))
    };
    assert_eq!(depth(&root), Some(3));
    assert_eq!(depth(&copy), Some(2));
}
