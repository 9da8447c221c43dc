//! Store Invariant Test Suite
//!
//! Properties every table and list must hold regardless of how many
//! resizes, overwrites and deletions they have been through, plus checks
//! that rendered output is well-formed JSON.
//!
//! ```bash
//! cargo test --test store_invariants
//! ```

mod test_utils;

mod json_output;
mod list_properties;
mod table_properties;
