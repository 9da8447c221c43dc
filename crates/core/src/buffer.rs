//! Growable text buffer
//!
//! Append-only accumulator used by the JSON renderer. Capacity grows to the
//! next power of two above the required length, so a long run of small
//! appends costs amortized O(1) each.

use crate::number::next_power_of_two;
use std::fmt::{self, Write};

/// Initial capacity in bytes for a fresh buffer
const DEFAULT_CAPACITY: usize = 16;

/// Append-only text accumulator
///
/// Numbers are appended in the fixed formats the renderer relies on:
/// integers in plain decimal, floats with six fractional digits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            value: String::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Create a buffer with at least `capacity` bytes reserved
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            value: String::with_capacity(capacity),
        }
    }

    /// Append a string slice
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.ensure_room(text.len());
        self.value.push_str(text);
        self
    }

    /// Append a single character
    pub fn append_char(&mut self, c: char) -> &mut Self {
        self.ensure_room(c.len_utf8());
        self.value.push(c);
        self
    }

    /// Append a 32-bit integer in decimal
    pub fn append_i32(&mut self, n: i32) -> &mut Self {
        self.append_display(n)
    }

    /// Append a 64-bit integer in decimal
    pub fn append_i64(&mut self, n: i64) -> &mut Self {
        self.append_display(n)
    }

    /// Append a 32-bit float with six fractional digits
    pub fn append_f32(&mut self, n: f32) -> &mut Self {
        self.append_f64(f64::from(n))
    }

    /// Append a 64-bit float with six fractional digits
    pub fn append_f64(&mut self, n: f64) -> &mut Self {
        self.append_display(format_args!("{:.6}", n))
    }

    /// Append `count` copies of `text`
    pub fn append_repeated(&mut self, text: &str, count: usize) -> &mut Self {
        self.ensure_room(text.len().saturating_mul(count));
        for _ in 0..count {
            self.value.push_str(text);
        }
        self
    }

    /// Drop the contents, keeping the allocation
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Owned copy of the current contents
    pub fn value_copy(&self) -> String {
        self.value.clone()
    }

    /// Borrow the current contents
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the buffer, returning its contents without copying
    pub fn into_string(self) -> String {
        self.value
    }

    /// Length of the contents in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Check if nothing has been appended since creation or the last clear
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Current capacity in bytes
    pub fn capacity(&self) -> usize {
        self.value.capacity()
    }

    fn append_display(&mut self, value: impl fmt::Display) -> &mut Self {
        // Writing into a String cannot fail
        let _ = write!(self, "{}", value);
        self
    }

    fn ensure_room(&mut self, additional: usize) {
        let required = self.value.len().saturating_add(additional);
        if required <= self.value.capacity() {
            return;
        }
        let target = next_power_of_two(required);
        self.value.reserve_exact(target - self.value.len());
    }
}

impl Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<TextBuffer> for String {
    fn from(buffer: TextBuffer) -> Self {
        buffer.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn test_append_text_and_numbers() {
        let mut buffer = TextBuffer::new();
        buffer
            .append("n=")
            .append_i32(-42)
            .append_char(' ')
            .append_i64(9_000_000_000)
            .append_char(' ')
            .append_f64(1.5)
            .append_char(' ')
            .append_f32(0.25);
        assert_eq!(buffer.as_str(), "n=-42 9000000000 1.500000 0.250000");
    }

    #[test]
    fn test_float_formatting_rounds_to_six_digits() {
        let mut buffer = TextBuffer::new();
        buffer.append_f64(2.0 / 3.0);
        assert_eq!(buffer.as_str(), "0.666667");
    }

    #[test]
    fn test_append_repeated() {
        let mut buffer = TextBuffer::new();
        buffer.append_repeated("  ", 3).append("x");
        assert_eq!(buffer.as_str(), "      x");
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = TextBuffer::new();
        buffer.append(&"x".repeat(100));
        let capacity = buffer.capacity();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_growth_uses_power_of_two() {
        let mut buffer = TextBuffer::with_capacity(4);
        buffer.append(&"a".repeat(100));
        assert!(buffer.capacity() >= 128);
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn test_value_copy_is_independent() {
        let mut buffer = TextBuffer::new();
        buffer.append("first");
        let copy = buffer.value_copy();
        buffer.clear();
        buffer.append("second");
        assert_eq!(copy, "first");
        assert_eq!(buffer.into_string(), "second");
    }

    #[test]
    fn test_fmt_write_integration() {
        let mut buffer = TextBuffer::new();
        write!(buffer, "{}-{}", "a", 1).unwrap();
        assert_eq!(buffer.to_string(), "a-1");
    }
}
