//! Shell error types

use gentable_core::{StoreError, ValueKind};
use thiserror::Error;

/// Result alias for shell commands
pub type Result<T> = std::result::Result<T, CommandError>;

/// Errors reported back to the shell user
///
/// None of these end the session; the loop prints them and reads the next
/// line.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    /// The line could not be split into words
    #[error("unbalanced quotes in input")]
    Tokenize,

    /// The first word is not a known command
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),

    /// A known command got the wrong number of arguments
    #[error("wrong number of arguments for '{command}' (usage: {usage})")]
    WrongArity {
        /// Command name
        command: &'static str,
        /// Usage line for the command
        usage: &'static str,
    },

    /// A dotted key had an empty segment
    #[error("invalid key '{0}'")]
    InvalidKey(String),

    /// A path segment that must be a table holds something else
    #[error("'{path}' holds a {found}, not a table")]
    NotATable {
        /// Path up to and including the offending segment
        path: String,
        /// Kind found there
        found: ValueKind,
    },

    /// `push` targeted a key holding something other than a list
    #[error("'{key}' holds a {found}, not a list")]
    NotAList {
        /// Target key
        key: String,
        /// Kind found there
        found: ValueKind,
    },

    /// `incr` targeted a non-numeric value
    #[error("'{key}' holds a {found}, not a number")]
    NotNumeric {
        /// Target key
        key: String,
        /// Kind found there
        found: ValueKind,
    },

    /// The `incr` delta was not a number
    #[error("increment '{0}' is not a number")]
    InvalidDelta(String),

    /// Integer increment left the 64-bit range
    #[error("increment of '{0}' would overflow")]
    Overflow(String),

    /// Error surfaced by the store itself
    #[error(transparent)]
    Store(#[from] StoreError),
}
