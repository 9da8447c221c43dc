//! List invariants

use gentable::{List, StoreError, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn remove_shifts_and_preserves_order(
        items in prop::collection::vec(any::<i64>(), 1..200),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(items.len());
        let mut list: List = items.iter().copied().collect();

        let removed = list.remove_at(index).unwrap();
        prop_assert_eq!(removed, Value::from(items[index]));
        prop_assert_eq!(list.len(), items.len() - 1);

        let mut expected = items.clone();
        expected.remove(index);
        let actual: Vec<i64> = list.iter().filter_map(Value::as_i64).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn push_keeps_every_value(items in prop::collection::vec(".{0,8}", 0..300)) {
        let mut list = List::with_capacity(1);
        for item in &items {
            list.push(item.as_str());
        }
        prop_assert_eq!(list.len(), items.len());
        prop_assert!(list.capacity() >= list.len());
        for (i, item) in items.iter().enumerate() {
            prop_assert_eq!(list.get_typed::<&str>(i), Some(item.as_str()));
        }
    }

    #[test]
    fn out_of_range_is_reported(len in 0usize..50, extra in 0usize..10) {
        let mut list: List = (0..len as i32).collect();
        let index = len + extra;
        prop_assert_eq!(list.at(index), Err(StoreError::IndexOutOfBounds { index, len }));
        prop_assert_eq!(
            list.remove_at(index),
            Err(StoreError::IndexOutOfBounds { index, len })
        );
        prop_assert_eq!(list.len(), len);
    }
}

#[test]
fn test_drain_from_front() {
    let mut list: List = (0..100).collect();
    for expected in 0..100 {
        assert_eq!(list.remove_at(0).unwrap(), Value::from(expected));
    }
    assert!(list.is_empty());
}
