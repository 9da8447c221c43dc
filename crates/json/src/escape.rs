//! String escaping for JSON output
//!
//! Only the characters JSON requires are escaped: the quote, the backslash
//! and control characters below 0x20. Everything else, including non-ASCII
//! UTF-8, passes through unchanged.

use gentable_core::TextBuffer;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// How string contents are written between their quotes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Escape quotes, backslashes and control characters
    #[default]
    Standard,
    /// Write strings verbatim
    ///
    /// Matches the output of older builds that never escaped anything. A
    /// string containing `"` or a control character yields invalid JSON.
    Raw,
}

/// Append `text` to `buffer` according to `mode`
pub(crate) fn write_escaped(buffer: &mut TextBuffer, text: &str, mode: EscapeMode) {
    if mode == EscapeMode::Raw {
        buffer.append(text);
        return;
    }

    // Escapable bytes are all ASCII, so every split point is a char boundary
    let mut clean_from = 0;
    for (i, byte) in text.bytes().enumerate() {
        let short = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0c => "\\f",
            0x00..=0x1f => "",
            _ => continue,
        };

        buffer.append(&text[clean_from..i]);
        if short.is_empty() {
            let _ = write!(buffer, "\\u{:04x}", byte);
        } else {
            buffer.append(short);
        }
        clean_from = i + 1;
    }
    buffer.append(&text[clean_from..]);
}
