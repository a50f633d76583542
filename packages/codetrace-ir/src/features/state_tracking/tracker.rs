//! Variable state tracker

use rustc_hash::FxHashMap;

use crate::shared::utils::literal::{is_identifier, is_string_literal, normalize_value, strip_quotes};

/// Last-known textual value per variable, updated in scan order
///
/// One tracker per analysis call; it is never shared between requests.
#[derive(Debug, Default, Clone)]
pub struct StateTracker {
    values: FxHashMap<String, String>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the value of `name`
    pub fn observe(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of `name`, or the identifier itself when unknown
    pub fn lookup<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    /// Value shown for a right-hand side or argument
    ///
    /// String literals lose their quotes, bare identifiers resolve through
    /// the table, anything else is kept as written.
    pub fn resolve_value(&self, raw: &str) -> String {
        let value = normalize_value(raw);
        if is_string_literal(raw.trim().trim_end_matches(';').trim()) {
            return value;
        }
        if is_identifier(&value) {
            return self.lookup(&value).to_string();
        }
        value
    }

    /// Substitute every known identifier in an expression
    ///
    /// String literals and member names after `.` are left untouched.
    pub fn render_expression(&self, expr: &str) -> String {
        let expr = expr.trim();
        if is_string_literal(expr) {
            return strip_quotes(expr).to_string();
        }

        let mut out = String::with_capacity(expr.len());
        let mut chars = expr.char_indices().peekable();
        let mut prev: Option<char> = None;

        while let Some((start, c)) = chars.next() {
            if c == '"' || c == '\'' || c == '`' {
                out.push(c);
                while let Some((_, inner)) = chars.next() {
                    out.push(inner);
                    if inner == '\\' {
                        if let Some((_, escaped)) = chars.next() {
                            out.push(escaped);
                        }
                    } else if inner == c {
                        break;
                    }
                }
                prev = Some(c);
                continue;
            }

            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' || next == '$' {
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let token = &expr[start..end];
                let is_member = prev == Some('.');
                match self.get(token) {
                    Some(value) if !is_member && !c.is_ascii_digit() => out.push_str(value),
                    _ => out.push_str(token),
                }
                prev = token.chars().last();
                continue;
            }

            out.push(c);
            prev = Some(c);
        }
        out
    }
}
