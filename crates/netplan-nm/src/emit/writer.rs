//! Event-based YAML document writer
//!
//! Emits block-style mappings with plain or double-quoted scalars, the
//! subset of YAML netplan configuration files use. The writer validates the
//! event sequence: keys must be scalars and every mapping must be closed.

use std::io::Write;

use crate::error::EmitError;

const INDENT: &str = "  ";

#[derive(Debug)]
struct Mapping {
    depth: usize,
    entries: usize,
    /// The next scalar is a value, not a key
    awaiting_value: bool,
    /// The parent key line has not been terminated yet
    inline_pending: bool,
}

/// Streaming YAML writer over any [`Write`] sink
pub struct YamlWriter<W: Write> {
    out: W,
    stack: Vec<Mapping>,
    done: bool,
}

impl<W: Write> YamlWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stack: Vec::new(),
            done: false,
        }
    }

    /// Open a mapping, either as the document root or as the value of the
    /// key written last
    pub fn open_mapping(&mut self) -> Result<(), EmitError> {
        let mapping = match self.stack.last() {
            None if self.done => return Err(encoding("document already complete")),
            None => Mapping {
                depth: 0,
                entries: 0,
                awaiting_value: false,
                inline_pending: false,
            },
            Some(parent) if !parent.awaiting_value => {
                return Err(encoding("mapping keys must be scalars"));
            }
            Some(parent) => Mapping {
                depth: parent.depth + 1,
                entries: 0,
                awaiting_value: false,
                inline_pending: true,
            },
        };
        self.stack.push(mapping);
        Ok(())
    }

    pub fn close_mapping(&mut self) -> Result<(), EmitError> {
        let mapping = self
            .stack
            .pop()
            .ok_or_else(|| encoding("no mapping to close"))?;
        if mapping.awaiting_value {
            return Err(encoding("mapping closed while a value is expected"));
        }

        // Empty mappings use flow style
        if mapping.entries == 0 {
            if mapping.inline_pending {
                self.out.write_all(b" {}\n")?;
            } else {
                self.out.write_all(b"{}\n")?;
            }
        }

        match self.stack.last_mut() {
            Some(parent) => {
                parent.awaiting_value = false;
                parent.entries += 1;
            }
            None => self.done = true,
        }
        Ok(())
    }

    /// Write an unquoted scalar
    ///
    /// Values that would not read back as the same string unquoted are
    /// double-quoted instead.
    pub fn plain(&mut self, value: &str) -> Result<(), EmitError> {
        if !is_plain_safe(value) {
            return self.quoted(value);
        }
        self.scalar(value)
    }

    /// Write a double-quoted scalar
    pub fn quoted(&mut self, value: &str) -> Result<(), EmitError> {
        self.scalar(&double_quote(value))
    }

    /// `key: value` with both sides plain
    pub fn plain_pair(&mut self, key: &str, value: &str) -> Result<(), EmitError> {
        self.plain(key)?;
        self.plain(value)
    }

    /// `key: "value"`
    pub fn quoted_pair(&mut self, key: &str, value: &str) -> Result<(), EmitError> {
        self.plain(key)?;
        self.quoted(value)
    }

    /// End the stream and hand back the sink
    pub fn finish(mut self) -> Result<W, EmitError> {
        if !self.stack.is_empty() {
            return Err(encoding("document has unclosed mappings"));
        }
        if !self.done {
            return Err(encoding("document is empty"));
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn scalar(&mut self, text: &str) -> Result<(), EmitError> {
        let mapping = self
            .stack
            .last_mut()
            .ok_or_else(|| encoding("scalar outside of a mapping"))?;

        if mapping.awaiting_value {
            writeln!(self.out, " {text}")?;
            mapping.awaiting_value = false;
            mapping.entries += 1;
        } else {
            if mapping.inline_pending {
                self.out.write_all(b"\n")?;
                mapping.inline_pending = false;
            }
            write!(self.out, "{}{text}:", INDENT.repeat(mapping.depth))?;
            mapping.awaiting_value = true;
        }
        Ok(())
    }
}

fn encoding(message: impl Into<String>) -> EmitError {
    EmitError::Encoding(message.into())
}

/// Check whether a scalar reads back as the same string without quotes
fn is_plain_safe(value: &str) -> bool {
    let mut chars = value.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let second = chars.next();

    if value.chars().any(char::is_control) {
        return false;
    }
    if value.starts_with(' ') || value.ends_with(' ') || value.ends_with(':') {
        return false;
    }
    if ",[]{}#&*!|>'\"%@`".contains(first) {
        return false;
    }
    if "-?:".contains(first) && matches!(second, None | Some(' ')) {
        return false;
    }
    !(value.contains(": ") || value.contains(" #"))
}

/// Double-quote a scalar, escaping the way libyaml does
fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{a0}' => out.push_str("\\_"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            '\u{feff}' => out.push_str("\\uFEFF"),
            c if c.is_control() => {
                out.push_str(&format!("\\x{:02X}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
