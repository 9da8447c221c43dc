//! Shell command parsing
//!
//! A line is split into words with shell quoting rules, the first word is
//! matched case-insensitively against the command names, and the remaining
//! words become the command's arguments.
//!
//! Values given to `set` and `push` are inferred from their text:
//! - `{}` and `[]` create an empty table or list
//! - integers that fit in 32 bits become `int32`, larger ones `int64`
//! - anything else that parses as a float becomes `float64`
//! - everything else, and any quoted word, is a string

use crate::error::{CommandError, Result};
use gentable_core::Value;

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Store a value, creating intermediate tables for dotted keys
    Set { key: String, value: Value },
    /// Print the value under a key
    Get { key: String },
    /// Remove a key
    Del { key: String },
    /// Add to a numeric value
    Incr { key: String, delta: Delta },
    /// Append to a list
    Push { key: String, value: Value },
    /// Render the whole store
    Show { pretty: bool },
    /// Print the command summary
    Help,
    /// Leave the shell
    Exit,
}

/// Amount added by `incr`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delta {
    Int(i64),
    Float(f64),
}

impl Default for Delta {
    fn default() -> Self {
        Delta::Int(1)
    }
}

/// One-line usage strings, also shown by `help`
pub const USAGE: &[(&str, &str)] = &[
    ("set", "set <key> <value>"),
    ("get", "get <key>"),
    ("del", "del <key>"),
    ("incr", "incr <key> [delta]"),
    ("push", "push <key> <value>"),
    ("show", "show [pretty]"),
    ("help", "help"),
    ("exit", "exit | quit"),
];

fn usage(command: &'static str) -> &'static str {
    USAGE
        .iter()
        .find(|(name, _)| *name == command)
        .map_or(command, |(_, usage)| usage)
}

fn arity(command: &'static str) -> CommandError {
    CommandError::WrongArity {
        command,
        usage: usage(command),
    }
}

/// A word from the input line and whether any part of it was quoted
#[derive(Debug)]
struct Word {
    text: String,
    quoted: bool,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = split_words(line)?.into_iter();
        let name = match words.next() {
            Some(word) => word.text.to_ascii_lowercase(),
            None => return Ok(None),
        };
        let args: Vec<Word> = words.collect();

        let command = match name.as_str() {
            "set" => match args.as_slice() {
                [key, value] => Command::Set {
                    key: key.text.clone(),
                    value: infer_value(value),
                },
                _ => return Err(arity("set")),
            },
            "get" => Command::Get {
                key: single_key("get", &args)?,
            },
            "del" => Command::Del {
                key: single_key("del", &args)?,
            },
            "incr" => match args.as_slice() {
                [key] => Command::Incr {
                    key: key.text.clone(),
                    delta: Delta::default(),
                },
                [key, delta] => Command::Incr {
                    key: key.text.clone(),
                    delta: parse_delta(&delta.text)?,
                },
                _ => return Err(arity("incr")),
            },
            "push" => match args.as_slice() {
                [key, value] => Command::Push {
                    key: key.text.clone(),
                    value: infer_value(value),
                },
                _ => return Err(arity("push")),
            },
            "show" => match args.as_slice() {
                [] => Command::Show { pretty: false },
                [flag] if flag.text.eq_ignore_ascii_case("pretty") => {
                    Command::Show { pretty: true }
                }
                _ => return Err(arity("show")),
            },
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(CommandError::UnknownCommand(name)),
        };
        Ok(Some(command))
    }
}

fn single_key(command: &'static str, args: &[Word]) -> Result<String> {
    match args {
        [key] => Ok(key.text.clone()),
        _ => Err(arity(command)),
    }
}

/// Split on unquoted whitespace, honouring single and double quotes
///
/// Word boundaries come from [`raw_words`]; each raw word is then unquoted
/// by `shlex` so escapes and quoting follow POSIX shell rules. A word is
/// never a comment: a leading `#` is escaped before lexing, so the value
/// in `push tags #rust` survives. Any quote in the raw word forces string
/// inference.
fn split_words(line: &str) -> Result<Vec<Word>> {
    raw_words(line)
        .into_iter()
        .map(|raw| {
            let parts = if raw.starts_with('#') {
                shlex::split(&format!("\\{}", raw))
            } else {
                shlex::split(raw)
            };
            Ok(Word {
                text: parts.ok_or(CommandError::Tokenize)?.concat(),
                quoted: raw.contains(['"', '\'']),
            })
        })
        .collect()
}

/// Raw word boundaries, tracking quote state the same way the lexer does
fn raw_words(line: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = None;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), _) => {}
            (_, '\\') => {
                escaped = true;
                start.get_or_insert(i);
            }
            (Some('"'), '"') => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => {
                quote = Some(c);
                start.get_or_insert(i);
            }
            (None, c) if c.is_whitespace() => {
                if let Some(s) = start.take() {
                    words.push(&line[s..i]);
                }
            }
            (None, _) => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        words.push(&line[s..]);
    }
    words
}

fn infer_value(word: &Word) -> Value {
    if word.quoted {
        return Value::from(word.text.as_str());
    }
    infer_unquoted(&word.text)
}

/// Infer a value from bare text
pub fn infer_unquoted(text: &str) -> Value {
    match text {
        "{}" => return Value::table(),
        "[]" => return Value::list(),
        _ => {}
    }
    if let Ok(n) = text.parse::<i32>() {
        return Value::from(n);
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }
    // Rust also accepts "inf" and "NaN"; keep those as text
    if text.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(n) = text.parse::<f64>() {
            return Value::from(n);
        }
    }
    Value::from(text)
}

fn parse_delta(text: &str) -> Result<Delta> {
    if let Ok(n) = text.parse::<i64>() {
        return Ok(Delta::Int(n));
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Delta::Float(n)),
        _ => Err(CommandError::InvalidDelta(text.to_string())),
    }
}
