//! Core data structures for gentable
//!
//! This crate implements the schema-less document model:
//! - Value: Tagged value over strings, integers, floats, tables and lists
//! - Table: String-keyed open-addressed hash table with tombstone deletion
//! - List: Growable ordered sequence with positional removal
//! - TextBuffer: Append-only text accumulator used by the JSON renderer
//!
//! Everything is single-threaded and tree-shaped: a container owns the
//! values inside it, and nesting a table or list moves it into its parent.

#![warn(clippy::all)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod hash;
pub mod list;
pub mod number;
pub mod table;
pub mod value;

// Re-exports
pub use buffer::TextBuffer;
pub use config::TableConfig;
pub use error::{Result, StoreError};
pub use list::List;
pub use table::{Entry, Iter, Table};
pub use value::{FromValue, Value, ValueKind};
