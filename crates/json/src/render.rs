//! Recursive JSON rendering
//!
//! Output format:
//! - Objects `{"key":value,...}` in table iteration order
//! - Arrays `[value,...]` in list order
//! - Integers in decimal, floats with six fractional digits
//! - Non-finite floats as `null`
//! - Empty containers as `{}` / `[]`
//!
//! Compact mode emits no whitespace. Pretty mode starts every member on a
//! new line indented two spaces per nesting level and puts each closing
//! bracket on its own line at the parent's level.

use crate::escape::{write_escaped, EscapeMode};
use gentable_core::{List, Table, TextBuffer, Value};

const INDENT: &str = "  ";

/// Options controlling the rendered text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Newlines and indentation between members
    pub pretty: bool,
    /// How string contents are escaped
    pub escape: EscapeMode,
}

impl RenderOptions {
    /// Single-line output
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented multi-line output
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Same options with a different escape mode
    pub fn with_escape(mut self, escape: EscapeMode) -> Self {
        self.escape = escape;
        self
    }
}

/// Types that can be rendered as JSON
///
/// Implemented for [`Table`], [`List`] and [`Value`].
pub trait ToJson {
    /// Append this value's JSON text to `writer` at its current depth
    fn write_json(&self, writer: &mut JsonWriter);

    /// Compact JSON text
    fn to_json(&self) -> String {
        render(self, false)
    }

    /// Indented JSON text
    fn to_json_pretty(&self) -> String {
        render(self, true)
    }
}

/// Render `value` as JSON with default escaping
///
/// # Examples
///
/// ```
/// use gentable_core::Table;
/// use gentable_json::render;
///
/// let mut table = Table::new();
/// table.insert("a", 1i32);
/// assert_eq!(render(&table, false), r#"{"a":1}"#);
/// assert_eq!(render(&table, true), "{\n  \"a\":1\n}");
/// assert_eq!(render(&Table::new(), false), "{}");
/// ```
pub fn render<T: ToJson + ?Sized>(value: &T, pretty: bool) -> String {
    render_with(
        value,
        RenderOptions {
            pretty,
            ..RenderOptions::default()
        },
    )
}

/// Render `value` as JSON with explicit options
pub fn render_with<T: ToJson + ?Sized>(value: &T, options: RenderOptions) -> String {
    let mut writer = JsonWriter::new(options);
    value.write_json(&mut writer);
    writer.finish()
}

/// Streaming JSON writer over a [`TextBuffer`]
///
/// Tracks the current nesting depth so nested containers indent correctly.
pub struct JsonWriter {
    buffer: TextBuffer,
    options: RenderOptions,
    depth: usize,
}

impl JsonWriter {
    /// Create a writer with an empty buffer
    pub fn new(options: RenderOptions) -> Self {
        Self {
            buffer: TextBuffer::new(),
            options,
            depth: 0,
        }
    }

    /// Consume the writer, returning the rendered text
    pub fn finish(self) -> String {
        self.buffer.into_string()
    }

    /// Write any value, recursing into containers
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Str(s) => self.write_string(s),
            Value::Int32(n) => {
                self.buffer.append_i32(*n);
            }
            Value::Int64(n) => {
                self.buffer.append_i64(*n);
            }
            Value::Float32(n) => self.write_float(f64::from(*n)),
            Value::Float64(n) => self.write_float(*n),
            Value::Table(table) => self.write_table(table),
            Value::List(list) => self.write_list(list),
        }
    }

    /// Write a table as an object
    pub fn write_table(&mut self, table: &Table) {
        self.write_container('{', '}', table.iter(), |writer, (key, value)| {
            writer.write_string(key);
            writer.buffer.append_char(':');
            writer.write_value(value);
        });
    }

    /// Write a list as an array
    pub fn write_list(&mut self, list: &List) {
        self.write_container('[', ']', list.iter(), |writer, value| {
            writer.write_value(value);
        });
    }

    fn write_container<I, F>(&mut self, open: char, close: char, items: I, mut write_item: F)
    where
        I: ExactSizeIterator,
        F: FnMut(&mut Self, I::Item),
    {
        self.buffer.append_char(open);
        if items.len() == 0 {
            self.buffer.append_char(close);
            return;
        }

        self.depth += 1;
        for (i, item) in items.enumerate() {
            if i > 0 {
                self.buffer.append_char(',');
            }
            self.newline();
            write_item(self, item);
        }
        self.depth -= 1;

        self.newline();
        self.buffer.append_char(close);
    }

    fn write_string(&mut self, text: &str) {
        self.buffer.append_char('"');
        write_escaped(&mut self.buffer, text, self.options.escape);
        self.buffer.append_char('"');
    }

    fn write_float(&mut self, n: f64) {
        if n.is_finite() {
            self.buffer.append_f64(n);
        } else {
            self.buffer.append("null");
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.buffer.append_char('\n');
            self.buffer.append_repeated(INDENT, self.depth);
        }
    }
}

impl ToJson for Table {
    fn write_json(&self, writer: &mut JsonWriter) {
        writer.write_table(self);
    }
}

impl ToJson for List {
    fn write_json(&self, writer: &mut JsonWriter) {
        writer.write_list(self);
    }
}

impl ToJson for Value {
    fn write_json(&self, writer: &mut JsonWriter) {
        writer.write_value(self);
    }
}
