//! String hashing and the linear probe sequence
//!
//! The table probes slot `(string_hash(key) + attempt) % bucket_count` for
//! `attempt = 0, 1, 2, ...`. Both functions are pure and deterministic, so
//! the same key always walks the same slots for a given bucket count.

/// Multiplier applied to each byte before mixing
const HASH_MULTIPLIER: i64 = 0x11;

/// Rolling polynomial hash over the bytes of `key`
///
/// Each byte shifts the accumulator left by 6, adds the scaled byte xor'd
/// with the key length, then folds the high bits back down. A final
/// shift/xor pass spreads the result across the low 32 bits.
///
/// The result is always non-negative when viewed as an `i32`, i.e. it fits
/// in 31 bits.
pub fn string_hash(key: &str) -> u32 {
    let bytes = key.as_bytes();
    let len_mix = (bytes.len() as i64).wrapping_sub(1);

    let mut hash: i64 = 0;
    for &byte in bytes {
        hash <<= 6;
        hash = hash.wrapping_add((i64::from(byte) * HASH_MULTIPLIER) ^ len_mix);
        hash ^= (hash >> 16) ^ (hash >> 8);
    }
    hash ^= (hash >> 24) ^ (hash >> 12);

    let folded = (i64::from(hash as i32) ^ (hash >> 8) ^ (hash >> 4)) as i32;
    if folded < 0 {
        !folded as u32
    } else {
        folded as u32
    }
}

/// Slot index for the `attempt`-th probe of a key with hash `hash`
///
/// `bucket_count` must be non-zero.
#[inline]
pub fn probe_index(hash: u32, attempt: usize, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "probe over an empty bucket array");
    let start = hash as usize % bucket_count;
    (start + attempt % bucket_count) % bucket_count
}
