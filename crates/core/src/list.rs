//! Growable ordered list of values
//!
//! `List` keeps [`Value`]s in insertion order and addresses them by
//! position. Capacity grows by half again whenever an append would not fit,
//! starting from 16 slots.

use crate::error::{Result, StoreError};
use crate::value::{FromValue, Value};
use std::fmt;
use std::ops::Index;

/// Initial capacity for a new list
const DEFAULT_CAPACITY: usize = 0x10;

/// Ordered sequence of [`Value`]s
///
/// # Examples
///
/// ```
/// use gentable_core::List;
///
/// let mut list = List::new();
/// for i in 0..5 {
///     list.push(i);
/// }
/// list.remove_at(0).unwrap();
///
/// assert_eq!(list.len(), 4);
/// assert_eq!(list.get_typed::<i32>(0), Some(1));
/// assert!(list.at(10).is_err());
/// ```
#[derive(Clone, PartialEq)]
pub struct List {
    elements: Vec<Value>,
}

impl List {
    /// Create an empty list with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty list with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Slots currently allocated
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Append a value
    ///
    /// If the backing storage cannot grow the failure is logged and the
    /// value is dropped. Use [`try_push`](Self::try_push) to observe it.
    pub fn push(&mut self, value: impl Into<Value>) {
        if let Err(err) = self.try_push(value) {
            tracing::warn!(target: "gentable::list", error = %err, "append abandoned");
        }
    }

    /// Append a value, reporting allocation failures
    pub fn try_push(&mut self, value: impl Into<Value>) -> Result<()> {
        self.ensure_room(1)?;
        self.elements.push(value.into());
        Ok(())
    }

    /// Append every value from `values`, growing at most once
    pub fn try_extend<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.ensure_room(values.len())?;
        self.elements.extend(values);
        Ok(())
    }

    /// Value at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.elements.get_mut(index)
    }

    /// Value at `index`, or `IndexOutOfBounds`
    pub fn at(&self, index: usize) -> Result<&Value> {
        self.elements.get(index).ok_or(StoreError::IndexOutOfBounds {
            index,
            len: self.elements.len(),
        })
    }

    /// Value at `index` read as `T`
    ///
    /// `None` if the index is out of range or the kind does not match.
    pub fn get_typed<'a, T: FromValue<'a>>(&'a self, index: usize) -> Option<T> {
        self.get(index).and_then(T::from_value)
    }

    /// Remove the value at `index`, shifting later values left by one
    pub fn remove_at(&mut self, index: usize) -> Result<Value> {
        let len = self.elements.len();
        if index >= len {
            tracing::warn!(
                target: "gentable::list",
                index,
                len,
                "remove index out of bounds"
            );
            return Err(StoreError::IndexOutOfBounds { index, len });
        }
        Ok(self.elements.remove(index))
    }

    /// Position of the first value equal to `value`
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.elements.iter().position(|v| v == value)
    }

    /// Drop every value, keeping the allocation
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.elements.iter_mut()
    }

    /// Borrow the values as a slice
    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    /// Grow by 1.5x (or to the required size, if larger)
    fn ensure_room(&mut self, additional: usize) -> Result<()> {
        let len = self.elements.len();
        let required = len
            .checked_add(additional)
            .ok_or_else(|| StoreError::elements(usize::MAX))?;
        let capacity = self.elements.capacity();
        if required <= capacity {
            return Ok(());
        }

        let grown = capacity
            .saturating_add(capacity / 2)
            .max(DEFAULT_CAPACITY)
            .max(required);
        self.elements
            .try_reserve_exact(grown - len)
            .map_err(|_| StoreError::elements(grown))
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

impl Index<usize> for List {
    type Output = Value;

    /// Panics when `index` is out of bounds
    fn index(&self, index: usize) -> &Value {
        &self.elements[index]
    }
}

impl<V: Into<Value>> Extend<V> for List {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        if let Err(err) = self.try_extend(iter) {
            tracing::warn!(target: "gentable::list", error = %err, "extend abandoned");
        }
    }
}

impl<V: Into<Value>> FromIterator<V> for List {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use crate::value::ValueKind;

    fn ints(list: &List) -> Vec<i32> {
        list.iter().filter_map(Value::as_i32).collect()
    }

    #[test]
    fn test_new_list() {
        let list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.capacity() >= DEFAULT_CAPACITY);
    }

    #[test]
    fn test_push_and_get() {
        let mut list = List::new();
        list.push("a");
        list.push(1i32);
        list.push(2i64);
        list.push(3.5f32);
        list.push(4.5f64);
        list.push(Table::new());
        list.push(List::new());

        let kinds: Vec<ValueKind> = list.iter().map(Value::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Str,
                ValueKind::Int32,
                ValueKind::Int64,
                ValueKind::Float32,
                ValueKind::Float64,
                ValueKind::Table,
                ValueKind::List,
            ]
        );
        assert_eq!(list.get_typed::<&str>(0), Some("a"));
        assert_eq!(list.get_typed::<i64>(2), Some(2));
        assert_eq!(list.get_typed::<i32>(2), None);
    }

    #[test]
    fn test_growth_keeps_order() {
        let mut list = List::with_capacity(2);
        for i in 0..100 {
            list.push(i);
        }
        assert_eq!(list.len(), 100);
        assert_eq!(ints(&list), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_growth_factor() {
        let mut list = List::new();
        for i in 0..16 {
            list.push(i);
        }
        assert_eq!(list.capacity(), 16);
        list.push(16i32);
        assert_eq!(list.capacity(), 24);
    }

    #[test]
    fn test_at_out_of_bounds() {
        let mut list = List::new();
        list.push(1i32);
        assert_eq!(list.at(0).unwrap(), &Value::from(1i32));
        assert_eq!(
            list.at(1).unwrap_err(),
            StoreError::IndexOutOfBounds { index: 1, len: 1 }
        );
        assert!(list.get(1).is_none());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let list = List::new();
        let _ = &list[0];
    }

    #[test]
    fn test_remove_at_shifts() {
        let mut list: List = (0..5).collect();
        for i in 0..3 {
            assert!(list.remove_at(i).is_ok());
        }
        // Removing 0, then 1, then 2 from a shifting list
        assert_eq!(ints(&list), vec![1, 3]);
    }

    #[test]
    fn test_remove_at_last() {
        let mut list: List = (0..3).collect();
        assert_eq!(list.remove_at(2).unwrap(), Value::from(2i32));
        assert_eq!(ints(&list), vec![0, 1]);
    }

    #[test]
    fn test_remove_at_out_of_bounds() {
        let mut list: List = (0..3).collect();
        assert_eq!(
            list.remove_at(3),
            Err(StoreError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_try_extend() {
        let mut list = List::new();
        list.try_extend(vec!["a", "b", "c"]).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2], Value::from("c"));
    }

    #[test]
    fn test_index_of() {
        let list: List = vec!["x", "y", "x"].into_iter().collect();
        assert_eq!(list.index_of(&Value::from("x")), Some(0));
        assert_eq!(list.index_of(&Value::from("y")), Some(1));
        assert_eq!(list.index_of(&Value::from("z")), None);
    }

    #[test]
    fn test_nested_list_mutation() {
        let mut outer = List::new();
        outer.push(List::new());
        outer
            .get_mut(0)
            .and_then(Value::as_list_mut)
            .unwrap()
            .push("inner");
        assert_eq!(
            outer.get_typed::<&List>(0).unwrap().get_typed::<&str>(0),
            Some("inner")
        );
    }

    #[test]
    fn test_equality_and_clone() {
        let a: List = (0..4).collect();
        let mut b = a.clone();
        assert_eq!(a, b);
        b.push(4i32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear_and_into_iter() {
        let mut list: List = (0..4).collect();
        let values: Vec<Value> = list.clone().into_iter().collect();
        assert_eq!(values.len(), 4);
        list.clear();
        assert!(list.is_empty());
    }
}
