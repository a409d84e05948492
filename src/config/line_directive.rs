//! Line directive patterns for tangled output.
//!
//! A pattern such as `//line %f:%l` is expanded before every tangled code
//! line so compilers and debuggers can map generated code back to the
//! literate source. Escapes:
//!
//! - `%f`: source document of the line
//! - `%l`: line number in that document
//! - `%i`: indentation of the line in the tangled output
//! - `%%`: a literal `%`
//!
//! Any other `%x` produces `x`, and a trailing lone `%` is dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A line directive pattern. The empty pattern disables directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineDirective(String);

impl LineDirective {
    /// Creates a directive from a pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    pub fn is_enabled(&self) -> bool {
        !self.0.is_empty()
    }

    /// Expands the pattern for one line, including the trailing newline.
    ///
    /// Returns an empty string when directives are disabled.
    pub fn format(&self, indent: &str, file: &str, line: usize) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(self.0.len() + file.len() + indent.len() + 8);
        let mut chars = self.0.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('i') => out.push_str(indent),
                Some('f') => out.push_str(file),
                Some('l') => out.push_str(&line.to_string()),
                Some(other) => out.push(other),
                None => {}
            }
        }
        out.push('\n');
        out
    }
}

impl fmt::Display for LineDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LineDirective {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
