//! Command execution against an in-memory store
//!
//! A `Session` owns the root [`Table`] and applies one [`Command`] at a
//! time. Keys are dotted paths: `a.b.c` names key `c` inside table `b`
//! inside table `a`. Writing commands create missing intermediate tables;
//! reading commands treat a missing or non-table intermediate as absent.

use crate::command::{Command, Delta, USAGE};
use crate::config::ShellConfig;
use crate::error::{CommandError, Result};
use gentable_core::{Table, Value};
use gentable_json::{render_with, EscapeMode, RenderOptions};
use std::fmt;
use tracing::debug;

/// Result of a successful command
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Write acknowledged
    Ok,
    /// Key not present
    Nil,
    /// Rendered JSON text
    Json(String),
    /// Count reply (`del`, `push`)
    Count(usize),
    /// Free-form text (`help`)
    Text(String),
    /// The shell should stop
    Exit,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Ok => f.write_str("OK"),
            Output::Nil => f.write_str("(nil)"),
            Output::Json(text) | Output::Text(text) => f.write_str(text),
            Output::Count(n) => write!(f, "{}", n),
            Output::Exit => Ok(()),
        }
    }
}

/// Interactive session state
pub struct Session {
    store: Table,
    pretty: bool,
    escape: EscapeMode,
}

impl Session {
    /// Create a session with an empty store sized by `config`
    pub fn new(config: &ShellConfig) -> Result<Self> {
        Ok(Self {
            store: Table::with_config(config.table)?,
            pretty: config.pretty,
            escape: config.escape,
        })
    }

    /// The root table
    pub fn store(&self) -> &Table {
        &self.store
    }

    /// Apply one command
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        debug!(target: "gentable::shell", ?command, "execute");
        match command {
            Command::Set { key, value } => self.set(&key, value),
            Command::Get { key } => self.get(&key),
            Command::Del { key } => self.del(&key),
            Command::Incr { key, delta } => self.incr(&key, delta),
            Command::Push { key, value } => self.push(&key, value),
            Command::Show { pretty } => Ok(Output::Json(render_with(
                &self.store,
                self.options(pretty || self.pretty),
            ))),
            Command::Help => Ok(Output::Text(help_text())),
            Command::Exit => Ok(Output::Exit),
        }
    }

    fn options(&self, pretty: bool) -> RenderOptions {
        RenderOptions {
            pretty,
            escape: self.escape,
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<Output> {
        let (parents, leaf) = split_path(key)?;
        let table = parent_for_write(&mut self.store, &parents)?;
        table.try_insert(leaf, value)?;
        Ok(Output::Ok)
    }

    fn get(&self, key: &str) -> Result<Output> {
        let (parents, leaf) = split_path(key)?;
        let value = parent_for_read(&self.store, &parents).and_then(|table| table.find(leaf));
        Ok(match value {
            Some(value) => Output::Json(render_with(value, self.options(self.pretty))),
            None => Output::Nil,
        })
    }

    fn del(&mut self, key: &str) -> Result<Output> {
        let (parents, leaf) = split_path(key)?;
        let removed = parent_for_update(&mut self.store, &parents)
            .and_then(|table| table.remove(leaf))
            .is_some();
        Ok(Output::Count(usize::from(removed)))
    }

    fn incr(&mut self, key: &str, delta: Delta) -> Result<Output> {
        let options = self.options(false);
        let (parents, leaf) = split_path(key)?;
        let table = parent_for_write(&mut self.store, &parents)?;
        let slot = table.get_or_try_insert_with(leaf, || Value::from(0i32))?;
        *slot = increment(key, slot, delta)?;
        Ok(Output::Json(render_with(&*slot, options)))
    }

    fn push(&mut self, key: &str, value: Value) -> Result<Output> {
        let (parents, leaf) = split_path(key)?;
        let table = parent_for_write(&mut self.store, &parents)?;
        match table.get_or_try_insert_with(leaf, Value::list)? {
            Value::List(list) => {
                list.try_push(value)?;
                Ok(Output::Count(list.len()))
            }
            other => Err(CommandError::NotAList {
                key: key.to_string(),
                found: other.kind(),
            }),
        }
    }
}

/// Split a dotted key into its parent segments and final segment
fn split_path(key: &str) -> Result<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(CommandError::InvalidKey(key.to_string()));
    }
    // split() always yields at least one segment
    let leaf = segments.pop().unwrap_or(key);
    Ok((segments, leaf))
}

/// Walk `parents`, creating empty tables where a segment is missing
fn parent_for_write<'a>(root: &'a mut Table, parents: &[&str]) -> Result<&'a mut Table> {
    let mut table = root;
    for (depth, segment) in parents.iter().enumerate() {
        table = match table.get_or_try_insert_with(segment, Value::table)? {
            Value::Table(inner) => inner,
            other => {
                return Err(CommandError::NotATable {
                    path: parents[..=depth].join("."),
                    found: other.kind(),
                })
            }
        };
    }
    Ok(table)
}

fn parent_for_read<'a>(root: &'a Table, parents: &[&str]) -> Option<&'a Table> {
    parents
        .iter()
        .try_fold(root, |table, segment| table.find_typed::<&Table>(segment))
}

fn parent_for_update<'a>(root: &'a mut Table, parents: &[&str]) -> Option<&'a mut Table> {
    let mut table = root;
    for segment in parents {
        table = table.get_mut(segment)?.as_table_mut()?;
    }
    Some(table)
}

/// Add `delta` to a numeric value
///
/// `int32` results that leave the 32-bit range widen to `int64`. A float
/// delta applied to an integer yields a `float64`. Float values keep their
/// width.
fn increment(key: &str, current: &Value, delta: Delta) -> Result<Value> {
    let overflow = || CommandError::Overflow(key.to_string());
    let next = match (current, delta) {
        (Value::Int32(n), Delta::Int(d)) => {
            let sum = i64::from(*n).checked_add(d).ok_or_else(overflow)?;
            i32::try_from(sum).map_or(Value::Int64(sum), Value::Int32)
        }
        (Value::Int64(n), Delta::Int(d)) => Value::Int64(n.checked_add(d).ok_or_else(overflow)?),
        (Value::Int32(n), Delta::Float(d)) => Value::Float64(f64::from(*n) + d),
        (Value::Int64(n), Delta::Float(d)) => Value::Float64(*n as f64 + d),
        (Value::Float32(n), d) => Value::Float32(n + delta_f64(d) as f32),
        (Value::Float64(n), d) => Value::Float64(n + delta_f64(d)),
        (other, _) => {
            return Err(CommandError::NotNumeric {
                key: key.to_string(),
                found: other.kind(),
            })
        }
    };
    Ok(next)
}

fn delta_f64(delta: Delta) -> f64 {
    match delta {
        Delta::Int(n) => n as f64,
        Delta::Float(n) => n,
    }
}

fn help_text() -> String {
    let mut text = String::from("Commands:");
    for (_, usage) in USAGE {
        text.push_str("\n  ");
        text.push_str(usage);
    }
    text.push_str("\nKeys may be dotted paths (a.b.c) into nested tables.");
    text
}
