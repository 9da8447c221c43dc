//! Error types for the gentable core
//!
//! Lookups that miss (absent key, mismatched kind) are not errors: they
//! return `None`. `StoreError` only covers conditions a caller may want to
//! report: bad configuration, out-of-range list access, and allocation
//! failure while growing a container.

use thiserror::Error;

/// Result alias used throughout the core crate
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by tables, lists and their configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A list index was outside `0..len`
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Length of the list at the time of the call
        len: usize,
    },

    /// Growing a bucket array, entry array or list buffer failed
    #[error("failed to allocate room for {requested} {what}")]
    AllocationFailed {
        /// What was being allocated ("buckets", "elements", ...)
        what: &'static str,
        /// Number of items requested
        requested: usize,
    },

    /// A table configuration value was rejected
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Build an `AllocationFailed` for `requested` bucket slots
    pub(crate) fn buckets(requested: usize) -> Self {
        StoreError::AllocationFailed {
            what: "buckets",
            requested,
        }
    }

    /// Build an `AllocationFailed` for `requested` table entries
    pub(crate) fn entries(requested: usize) -> Self {
        StoreError::AllocationFailed {
            what: "entries",
            requested,
        }
    }

    /// Build an `AllocationFailed` for `requested` list elements
    pub(crate) fn elements(requested: usize) -> Self {
        StoreError::AllocationFailed {
            what: "elements",
            requested,
        }
    }
}
