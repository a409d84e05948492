//! Text location tracking for warnings and error reporting.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A line within a source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TextLocation {
    /// The document path, as scheduled by the scanner.
    pub filename: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(filename: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            filename: filename.into(),
            line,
        }
    }

    pub fn file(&self) -> &Path {
        &self.filename
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename.display(), self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let loc = TextLocation::new("chaps/first.md", 10);
        assert_eq!(format!("{}", loc), "chaps/first.md:10");
    }

    #[test]
    fn test_file_accessor() {
        let loc = TextLocation::new("book.md", 1);
        assert_eq!(loc.file(), Path::new("book.md"));
        assert_eq!(loc.line, 1);
    }
}
