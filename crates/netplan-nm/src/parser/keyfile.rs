//! Parser for NetworkManager keyfile connection profiles (`.nmconnection`)
//!
//! Follows GLib keyfile rules: `[group]` headers, `key=value` entries,
//! `#` comments. Group and key order is preserved.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::KeyfileError;

/// `[group]`
static GROUP_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([^\[\]]+)\]$").unwrap());

/// `key = value`, whitespace around `=` is not part of key or value
static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^=]*?)\s*=\s*(.*)$").unwrap());

/// Parsed keyfile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyfile {
    groups: IndexMap<String, IndexMap<String, String>>,
}

impl Keyfile {
    /// Parse keyfile from string content
    pub fn parse_str(content: &str) -> Result<Self, KeyfileError> {
        let mut keyfile = Keyfile::default();
        let mut current: Option<String> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(caps) = GROUP_HEADER.captures(line) {
                let name = caps[1].to_string();
                // Repeated groups are merged
                keyfile.groups.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let caps = KEY_VALUE.captures(line).ok_or_else(|| KeyfileError::Syntax {
                line: line_no,
                message: format!("expected group header or key=value, found '{line}'"),
            })?;
            let key = &caps[1];
            if key.is_empty() {
                return Err(KeyfileError::Syntax {
                    line: line_no,
                    message: "empty key name".to_string(),
                });
            }

            let group = current.as_ref().ok_or_else(|| KeyfileError::Syntax {
                line: line_no,
                message: format!("key '{key}' outside of any group"),
            })?;
            keyfile
                .groups
                .entry(group.clone())
                .or_default()
                .insert(key.to_string(), caps[2].to_string());
        }

        Ok(keyfile)
    }

    /// Group names in file order
    pub fn groups(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    /// Key names of `group` in file order (empty for a missing group)
    pub fn keys(&self, group: &str) -> impl Iterator<Item = &str> + '_ {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|entries| entries.keys().map(String::as_str))
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn has_key(&self, group: &str, key: &str) -> bool {
        self.raw(group, key).is_some()
    }

    /// Read a string value with escape sequences resolved
    ///
    /// Returns `None` if the key is missing or the value holds an invalid
    /// escape sequence.
    pub fn get_string(&self, group: &str, key: &str) -> Option<String> {
        unescape(self.raw(group, key)?)
    }

    /// Read a boolean value (`true`, `false`, `1`, `0`)
    pub fn get_bool(&self, group: &str, key: &str) -> Option<bool> {
        match self.raw(group, key)? {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn get_u64(&self, group: &str, key: &str) -> Option<u64> {
        self.raw(group, key)?.trim().parse().ok()
    }

    /// Remove a handled key
    ///
    /// A group left without keys is removed as well, whether or not the key
    /// was present.
    pub fn clear_key(&mut self, group: &str, key: &str) -> bool {
        let Some(entries) = self.groups.get_mut(group) else {
            return false;
        };
        let removed = entries.shift_remove(key).is_some();
        if entries.is_empty() {
            self.groups.shift_remove(group);
        }
        removed
    }

    fn raw(&self, group: &str, key: &str) -> Option<&str> {
        self.groups.get(group)?.get(key).map(String::as_str)
    }
}

/// Resolve keyfile escapes (`\s`, `\n`, `\t`, `\r`, `\\`)
fn unescape(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            's' => out.push(' '),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            _ => return None,
        }
    }
    Some(out)
}
