//! gentable: an embeddable heterogeneous key-value store
//!
//! A [`Table`] maps string keys to [`Value`]s, and a [`List`] holds values in
//! order. Values may themselves be tables or lists, so a store is a tree of
//! nested containers that can be rendered as JSON.
//!
//! # Quick Start
//!
//! ```
//! use gentable::{render, List, Table};
//!
//! let mut inner = Table::new();
//! inner.insert("d", 2i32);
//!
//! let mut tags = List::new();
//! tags.push("x");
//!
//! let mut root = Table::new();
//! root.insert("a", 1i32);
//! root.insert("c", inner);
//! root.insert("tags", tags);
//!
//! assert_eq!(root.find_typed::<i32>("a"), Some(1));
//! assert!(render(&root, false).contains(r#""c":{"d":2}"#));
//! ```
//!
//! # Crates
//!
//! - `gentable-core`: values, tables, lists and their configuration
//! - `gentable-json`: JSON rendering

pub use gentable_core::{
    hash, number, Entry, FromValue, Iter, List, Result, StoreError, Table, TableConfig,
    TextBuffer, Value, ValueKind,
};
pub use gentable_json::{render, render_with, EscapeMode, RenderOptions, ToJson};
