//! Table sizing configuration
//!
//! ```toml
//! initial_buckets = 31
//! min_buckets = 31
//! load_factor = 80
//! ```

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// Default bucket count for a new table
pub const DEFAULT_BUCKETS: usize = 0x1f;

/// Default resize threshold, as a percentage of the bucket count
pub const DEFAULT_LOAD_FACTOR: u32 = 0x50;

/// Sizing parameters for a [`Table`](crate::Table)
///
/// A table resizes when `modified_count * 100 / bucket_count` exceeds
/// `load_factor`. A resize never produces fewer than `min_buckets` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Bucket count the table starts with
    pub initial_buckets: usize,
    /// Floor applied to the bucket count chosen by a resize
    pub min_buckets: usize,
    /// Resize threshold in percent, `1..=99`
    pub load_factor: u32,
}

impl TableConfig {
    /// Config with a custom initial bucket count and default load factor
    pub fn with_buckets(initial_buckets: usize) -> Self {
        Self {
            initial_buckets,
            ..Self::default()
        }
    }

    /// Check the invariants the probing code depends on
    ///
    /// A load factor of 100 or more would let every slot fill up, after
    /// which a probe for a missing key could not terminate on an empty slot.
    pub fn validate(&self) -> Result<()> {
        if self.initial_buckets == 0 {
            return Err(StoreError::InvalidConfig(
                "initial_buckets must be at least 1".to_string(),
            ));
        }
        if self.min_buckets == 0 {
            return Err(StoreError::InvalidConfig(
                "min_buckets must be at least 1".to_string(),
            ));
        }
        if self.load_factor == 0 || self.load_factor >= 100 {
            return Err(StoreError::InvalidConfig(format!(
                "load_factor must be between 1 and 99, got {}",
                self.load_factor
            )));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKETS,
            min_buckets: DEFAULT_BUCKETS,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}
