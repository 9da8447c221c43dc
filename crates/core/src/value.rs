//! Tagged values stored in tables and lists
//!
//! `Value` is a closed sum over the seven payload kinds a store can hold:
//! - Strings (owned, always copied on the way in)
//! - 32/64-bit integers and floats
//! - Nested tables and lists, owned outright
//!
//! A value owns everything beneath it, so the store is always a tree:
//! moving a `Table` or `List` into a `Value` transfers it, and dropping the
//! value drops the whole subtree.

use crate::list::List;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// UTF-8 string
    Str,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Nested table
    Table,
    /// Nested list
    List,
}

impl ValueKind {
    /// Lowercase name used in messages
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Str => "str",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::Table => "table",
            ValueKind::List => "list",
        }
    }

    /// True for the table and list kinds
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Table | ValueKind::List)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single stored value
///
/// # Examples
///
/// ```
/// use gentable_core::{Table, Value, ValueKind};
///
/// let v = Value::from("hello");
/// assert_eq!(v.kind(), ValueKind::Str);
/// assert_eq!(v.as_str(), Some("hello"));
/// assert_eq!(v.as_i32(), None);
///
/// let nested = Value::from(Table::new());
/// assert!(nested.as_table().unwrap().is_empty());
/// ```
///
/// Equality is structural. Tables compare equal when they hold the same
/// keys with equal values, regardless of bucket layout. Floats follow IEEE
/// comparison, so a value holding NaN is not equal to itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Owned string
    Str(String),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
    /// Owned nested table
    Table(Table),
    /// Owned nested list
    List(List),
}

impl Value {
    /// Empty nested table
    pub fn table() -> Self {
        Value::Table(Table::new())
    }

    /// Empty nested list
    pub fn list() -> Self {
        Value::List(List::new())
    }

    /// Active variant
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Float32(_) => ValueKind::Float32,
            Value::Float64(_) => ValueKind::Float64,
            Value::Table(_) => ValueKind::Table,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Check the active variant
    pub fn is(&self, kind: ValueKind) -> bool {
        self.kind() == kind
    }

    /// Typed read: `Some` only when the active variant matches `T`
    ///
    /// ```
    /// use gentable_core::Value;
    ///
    /// let v = Value::from(7i64);
    /// assert_eq!(v.get::<i64>(), Some(7));
    /// assert_eq!(v.get::<i32>(), None);
    /// ```
    pub fn get<'a, T: FromValue<'a>>(&'a self) -> Option<T> {
        T::from_value(self)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Take the nested table out, if this is one
    pub fn into_table(self) -> Option<Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Take the nested list out, if this is one
    pub fn into_list(self) -> Option<List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

// =============================================================================
// FromValue
// =============================================================================

/// Types that can be read out of a [`Value`] without conversion
///
/// Implemented for the payload of each variant. Scalars are copied out,
/// strings and containers are borrowed.
pub trait FromValue<'a>: Sized {
    /// Variant this type reads from
    const KIND: ValueKind;

    /// Extract the payload, or `None` on a kind mismatch
    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for &'a str {
    const KIND: ValueKind = ValueKind::Str;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'a> FromValue<'a> for i32 {
    const KIND: ValueKind = ValueKind::Int32;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_i32()
    }
}

impl<'a> FromValue<'a> for i64 {
    const KIND: ValueKind = ValueKind::Int64;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_i64()
    }
}

impl<'a> FromValue<'a> for f32 {
    const KIND: ValueKind = ValueKind::Float32;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_f32()
    }
}

impl<'a> FromValue<'a> for f64 {
    const KIND: ValueKind = ValueKind::Float64;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_f64()
    }
}

impl<'a> FromValue<'a> for &'a Table {
    const KIND: ValueKind = ValueKind::Table;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_table()
    }
}

impl<'a> FromValue<'a> for &'a List {
    const KIND: ValueKind = ValueKind::List;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_list()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<Table> for Value {
    fn from(v: Table) -> Self {
        Value::Table(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Value::List(v)
    }
}
