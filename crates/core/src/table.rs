//! Open-addressed string-keyed table
//!
//! `Table` maps owned string keys to [`Value`]s using a bucket array with
//! linear probing over a dense array of entries.
//!
//! # Design
//!
//! - Slots are tri-state: `Empty`, `Tombstone` or `Occupied(i)`, where `i`
//!   indexes the entry array
//! - A key's probe sequence is `(string_hash(key) + n) % bucket_count`
//! - Deletion leaves a tombstone so later keys on the same path stay reachable
//! - Every insert or delete bumps `modified_count`; once
//!   `modified_count * 100 / bucket_count` exceeds the load factor the table
//!   is rehashed into `next_prime(2 * len)` buckets (floored at `min_buckets`)
//!
//! Because the trigger counts modifications rather than live entries, a
//! delete-heavy workload also ends in a rehash, and since the new size is
//! derived from the live count that rehash shrinks the table.
//!
//! # Iteration order
//!
//! Iteration walks the entry array. Removing a key moves the last entry into
//! the freed position, so the order is not insertion order once anything has
//! been removed. Callers must not rely on it.

use crate::config::TableConfig;
use crate::error::{Result, StoreError};
use crate::hash::{probe_index, string_hash};
use crate::number::next_prime;
use crate::value::{FromValue, Value};
use std::fmt;
use std::mem;

/// A live key/value pair stored in a table
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: String,
    value: Value,
}

impl Entry {
    /// Key of this entry
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value of this entry
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Split into owned key and value
    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Tombstone,
    /// Index into `Table::entries`
    Occupied(usize),
}

/// Outcome of walking a key's probe sequence
enum Probe {
    /// Key is live; `slot` points at `entries[entry]`
    Found { slot: usize, entry: usize },
    /// Key is absent; this is where it would go
    Vacant(usize),
    /// Key is absent and no slot on its path is free
    Full,
}

/// String-keyed table of [`Value`]s
///
/// # Examples
///
/// ```
/// use gentable_core::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("name", "gentable");
/// table.insert("answer", 42i32);
///
/// assert_eq!(table.find_typed::<&str>("name"), Some("gentable"));
/// assert_eq!(table.find_typed::<i32>("answer"), Some(42));
/// assert_eq!(table.find_typed::<i64>("answer"), None);
///
/// table.remove("name");
/// assert!(!table.contains("name"));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct Table {
    slots: Vec<Slot>,
    /// Live entries; each is referenced by exactly one occupied slot
    entries: Vec<Entry>,
    config: TableConfig,
    /// Inserts and deletes since the last rehash
    modified_count: usize,
}

impl Table {
    /// Create a table with the default bucket count and load factor
    pub fn new() -> Self {
        let config = TableConfig::default();
        Self {
            slots: vacant_slots(config.initial_buckets),
            entries: Vec::new(),
            config,
            modified_count: 0,
        }
    }

    /// Create a table with `bucket_count` initial buckets
    ///
    /// Useful when the number of keys is known up front: a table sized at
    /// roughly twice the expected key count never needs to rehash.
    pub fn with_buckets(bucket_count: usize) -> Result<Self> {
        Self::with_config(TableConfig::with_buckets(bucket_count))
    }

    /// Create a table with explicit bucket count and load factor
    pub fn with_buckets_and_load_factor(bucket_count: usize, load_factor: u32) -> Result<Self> {
        Self::with_config(TableConfig {
            initial_buckets: bucket_count,
            load_factor,
            ..TableConfig::default()
        })
    }

    /// Create a table from a validated configuration
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            slots: vacant_slots(config.initial_buckets),
            entries: Vec::new(),
            config,
            modified_count: 0,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table holds no live entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current size of the bucket array
    pub fn bucket_count(&self) -> usize {
        self.slots.len()
    }

    /// Resize threshold in percent
    pub fn load_factor(&self) -> u32 {
        self.config.load_factor
    }

    /// Inserts and deletes applied since the last rehash
    pub fn modified_count(&self) -> usize {
        self.modified_count
    }

    /// Configuration this table was built with
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Check if `key` is live in the table
    pub fn contains(&self, key: &str) -> bool {
        self.entry_index(key).is_some()
    }

    /// Look up the value stored under `key`
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.find_entry(key).map(Entry::value)
    }

    /// Look up the whole entry stored under `key`
    pub fn find_entry(&self, key: &str) -> Option<&Entry> {
        self.entry_index(key).map(|index| &self.entries[index])
    }

    /// Look up `key` and read it as `T`
    ///
    /// Returns `None` both when the key is absent and when the stored value
    /// has a different kind.
    pub fn find_typed<'a, T: FromValue<'a>>(&'a self, key: &str) -> Option<T> {
        self.find(key).and_then(T::from_value)
    }

    /// Mutable access to the value stored under `key`
    ///
    /// Replacing the value through this reference does not count as a
    /// modification and never triggers a rehash.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let index = self.entry_index(key)?;
        Some(&mut self.entries[index].value)
    }

    // ========================================================================
    // Insert / Remove
    // ========================================================================

    /// Insert `value` under `key`, returning the value it replaced
    ///
    /// An existing key is overwritten in place: the length is unchanged and
    /// the old value is handed back. If growing the table fails the failure
    /// is logged and the insert is abandoned; use
    /// [`try_insert`](Self::try_insert) to observe it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        match self.try_insert(key, value) {
            Ok(previous) => previous,
            Err(err) => {
                tracing::warn!(target: "gentable::table", error = %err, "insert abandoned");
                None
            }
        }
    }

    /// Insert `value` under `key`, reporting allocation failures
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        self.ensure_capacity();
        let (_, previous) = self.place(key.into(), value.into())?;
        Ok(previous)
    }

    /// Mutable access to the value under `key`, inserting `default()` first
    /// if the key is absent
    ///
    /// Inserting counts as a modification like any other insert; finding an
    /// existing value does not.
    pub fn get_or_try_insert_with<F>(&mut self, key: &str, default: F) -> Result<&mut Value>
    where
        F: FnOnce() -> Value,
    {
        match self.entry_index(key) {
            Some(index) => Ok(&mut self.entries[index].value),
            None => {
                self.ensure_capacity();
                let (value, _) = self.place(key.to_string(), default())?;
                Ok(value)
            }
        }
    }

    /// Remove `key`, returning its value if it was live
    ///
    /// The slot becomes a tombstone. The resize check runs afterwards even
    /// when the key was absent.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = match self.probe(key) {
            Probe::Found { slot, entry } => Some(self.take_entry(slot, entry)),
            Probe::Vacant(_) | Probe::Full => None,
        };
        self.ensure_capacity();
        removed
    }

    /// Drop every entry, keeping the current bucket count
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.entries.clear();
        self.modified_count = 0;
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterate over live entries
    ///
    /// The iterator is `Clone`, so a walk can be restarted from any point.
    /// See the module docs for why the order is unspecified.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: self.entries.iter(),
        }
    }

    /// Iterate over live keys
    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over live values
    pub fn values(&self) -> impl Iterator<Item = &Value> + Clone + '_ {
        self.iter().map(|(_, value)| value)
    }

    // ========================================================================
    // Probing and resizing
    // ========================================================================

    fn probe(&self, key: &str) -> Probe {
        let bucket_count = self.slots.len();
        let hash = string_hash(key);
        let mut first_tombstone = None;

        for attempt in 0..bucket_count {
            let index = probe_index(hash, attempt, bucket_count);
            match self.slots[index] {
                Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied(entry) if self.entries[entry].key == key => {
                    return Probe::Found { slot: index, entry }
                }
                Slot::Occupied(_) => {}
            }
        }

        match first_tombstone {
            Some(index) => Probe::Vacant(index),
            None => Probe::Full,
        }
    }

    fn entry_index(&self, key: &str) -> Option<usize> {
        match self.probe(key) {
            Probe::Found { entry, .. } => Some(entry),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Store `value` under `key`, returning the stored value and any value
    /// it replaced
    fn place(&mut self, key: String, value: Value) -> Result<(&mut Value, Option<Value>)> {
        match self.probe(&key) {
            Probe::Found { entry, .. } => {
                self.modified_count += 1;
                let stored = &mut self.entries[entry].value;
                let previous = mem::replace(stored, value);
                Ok((stored, Some(previous)))
            }
            Probe::Vacant(slot) => {
                let index = self.entries.len();
                self.entries
                    .try_reserve(1)
                    .map_err(|_| StoreError::entries(index + 1))?;
                self.entries.push(Entry { key, value });
                self.slots[slot] = Slot::Occupied(index);
                self.modified_count += 1;
                Ok((&mut self.entries[index].value, None))
            }
            Probe::Full => {
                // Only reachable when a resize was abandoned earlier
                let target = next_prime(self.entries.len().saturating_add(1).saturating_mul(2));
                self.rehash(target)?;
                self.place(key, value)
            }
        }
    }

    /// Tombstone `slot` and drop `entries[entry]`
    ///
    /// The last entry moves into the freed position, so its slot is
    /// repointed first.
    fn take_entry(&mut self, slot: usize, entry: usize) -> Value {
        let last = self.entries.len() - 1;
        if entry != last {
            if let Some(moved) = self.slot_of(last) {
                self.slots[moved] = Slot::Occupied(entry);
            }
        }
        self.slots[slot] = Slot::Tombstone;
        self.modified_count += 1;
        self.entries.swap_remove(entry).value
    }

    /// Slot referencing `entries[entry]`, found along its key's probe path
    fn slot_of(&self, entry: usize) -> Option<usize> {
        let bucket_count = self.slots.len();
        let hash = string_hash(&self.entries[entry].key);
        (0..bucket_count)
            .map(|attempt| probe_index(hash, attempt, bucket_count))
            .find(|&index| self.slots[index] == Slot::Occupied(entry))
    }

    fn needs_resize(&self) -> bool {
        let ratio = self.modified_count.saturating_mul(100) / self.slots.len();
        ratio > self.config.load_factor as usize
    }

    fn ensure_capacity(&mut self) {
        if !self.needs_resize() {
            return;
        }
        let target = next_prime(self.entries.len().saturating_mul(2)).max(self.config.min_buckets);
        if let Err(err) = self.rehash(target) {
            tracing::warn!(
                target: "gentable::table",
                error = %err,
                buckets = self.slots.len(),
                "resize abandoned, keeping current buckets"
            );
        }
    }

    /// Rebuild the bucket array with `bucket_count` fresh buckets
    ///
    /// The new array is allocated and filled before it replaces the old
    /// one, so a failed allocation leaves the table untouched.
    fn rehash(&mut self, bucket_count: usize) -> Result<()> {
        let bucket_count = bucket_count.max(self.entries.len() + 1);
        let mut slots = try_vacant_slots(bucket_count)?;

        for (index, entry) in self.entries.iter().enumerate() {
            let slot = vacant_index(&slots, &entry.key);
            slots[slot] = Slot::Occupied(index);
        }

        let old_buckets = mem::replace(&mut self.slots, slots).len();
        self.modified_count = self.entries.len();

        tracing::debug!(
            target: "gentable::table",
            from = old_buckets,
            to = bucket_count,
            entries = self.entries.len(),
            "rehashed table"
        );
        Ok(())
    }
}

/// First empty slot on `key`'s probe path in a tombstone-free array
///
/// The caller guarantees at least one empty slot exists.
fn vacant_index(slots: &[Slot], key: &str) -> usize {
    let bucket_count = slots.len();
    let hash = string_hash(key);
    let mut attempt = 0;
    loop {
        let index = probe_index(hash, attempt, bucket_count);
        if slots[index] == Slot::Empty {
            return index;
        }
        attempt += 1;
    }
}

fn vacant_slots(bucket_count: usize) -> Vec<Slot> {
    vec![Slot::Empty; bucket_count]
}

fn try_vacant_slots(bucket_count: usize) -> Result<Vec<Slot>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(bucket_count)
        .map_err(|_| StoreError::buckets(bucket_count))?;
    slots.resize(bucket_count, Slot::Empty);
    Ok(slots)
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.find(key).map_or(false, |v| v == value))
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Table {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a table's live entries
#[derive(Clone)]
pub struct Iter<'a> {
    entries: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .next()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over a table's live entries
pub struct IntoIter {
    entries: std::vec::IntoIter<Entry>,
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(Entry::into_parts)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            entries: self.entries.into_iter(),
        }
    }
}
