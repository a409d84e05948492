//! Chunk names.

use std::borrow::Borrow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A root chunk is written to a file of that name, so it must end in an extension.
static FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\S+$").unwrap());

/// Trailing word characters of a root name, used as the fence language.
static LANGUAGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_a-zA-Z0-9]*$").unwrap());

/// A chunk name identifies a named fenced block.
///
/// The name is the info string of the opening fence with surrounding
/// whitespace removed, e.g. ```` ``` Parse arguments ```` names the chunk
/// `Parse arguments`. Root chunks are named after the file they tangle to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChunkName(String);

impl ChunkName {
    /// Creates a new ChunkName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the name looks like a file name (ends in `.ext`).
    pub fn is_filename(&self) -> bool {
        FILENAME_PATTERN.is_match(&self.0)
    }

    /// Returns the language tag implied by this name, if any.
    ///
    /// `main.go` gives `go`, `Makefile.in` gives `in`. A name ending in
    /// whitespace or punctuation has no tag.
    pub fn language_tag(&self) -> Option<&str> {
        language_tag(&self.0)
    }
}

/// Language tag implied by a chunk name given as a plain string.
pub fn language_tag(name: &str) -> Option<&str> {
    LANGUAGE_PATTERN
        .find(name)
        .map(|m| m.as_str())
        .filter(|tag| !tag.is_empty())
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChunkName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChunkName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ChunkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ChunkName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
