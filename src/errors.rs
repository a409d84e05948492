//! Error types for litweave.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::ChunkName;
use crate::text_location::TextLocation;

/// Main error type for litweave operations.
#[derive(Error, Debug)]
pub enum LitweaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{location}: file ended while still in chunk '{chunk}'")]
    UnclosedChunk {
        location: TextLocation,
        chunk: ChunkName,
    },

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for litweave operations.
pub type Result<T> = std::result::Result<T, LitweaveError>;

/// A single lattice validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Root chunks whose names do not look like file names.
    NonFilenameRoots(Vec<ChunkName>),
    /// A reference cycle, from the first occurrence of the repeated name to its repetition.
    Cycle(Vec<ChunkName>),
    /// Referenced chunks that are never defined.
    Undefined(Vec<ChunkName>),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFilenameRoots(names) if names.len() == 1 => write!(
                f,
                "Found top level chunk which isn't a filename: {}",
                join_names(names)
            ),
            Self::NonFilenameRoots(names) => write!(
                f,
                "Found top level chunks which aren't filenames: {}",
                join_names(names)
            ),
            Self::Cycle(path) => {
                let path: Vec<&str> = path.iter().map(ChunkName::as_str).collect();
                write!(f, "Found cyclic chunks: {}", path.join(" -> "))
            }
            Self::Undefined(names) => {
                let plural = if names.len() >= 2 { "s" } else { "" };
                write!(f, "Chunk{} not defined: {}", plural, join_names(names))
            }
        }
    }
}

/// All validation failures of one lattice, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for LitweaveError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

fn join_names(names: &[ChunkName]) -> String {
    names
        .iter()
        .map(ChunkName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<ChunkName> {
        list.iter().map(|n| ChunkName::new(*n)).collect()
    }

    #[test]
    fn test_non_filename_roots_singular_and_plural() {
        let one = ValidationError::NonFilenameRoots(names(&["main"]));
        assert_eq!(
            one.to_string(),
            "Found top level chunk which isn't a filename: main"
        );

        let two = ValidationError::NonFilenameRoots(names(&["main", "setup"]));
        assert_eq!(
            two.to_string(),
            "Found top level chunks which aren't filenames: main, setup"
        );
    }

    #[test]
    fn test_cycle_message() {
        let err = ValidationError::Cycle(names(&["dd", "ee", "ff", "dd"]));
        assert_eq!(err.to_string(), "Found cyclic chunks: dd -> ee -> ff -> dd");
    }

    #[test]
    fn test_undefined_message() {
        assert_eq!(
            ValidationError::Undefined(names(&["x"])).to_string(),
            "Chunk not defined: x"
        );
        assert_eq!(
            ValidationError::Undefined(names(&["x", "y"])).to_string(),
            "Chunks not defined: x, y"
        );
    }

    #[test]
    fn test_validation_errors_one_per_line() {
        let errors = ValidationErrors(vec![
            ValidationError::Undefined(names(&["x"])),
            ValidationError::Cycle(names(&["a", "b", "a"])),
        ]);
        let err: LitweaveError = errors.into();
        assert_eq!(
            err.to_string(),
            "Chunk not defined: x\nFound cyclic chunks: a -> b -> a"
        );
    }

    #[test]
    fn test_unclosed_chunk_mentions_file() {
        let err = LitweaveError::UnclosedChunk {
            location: TextLocation::new("first.md", 3),
            chunk: ChunkName::new("Chunk one"),
        };
        let msg = err.to_string();
        assert!(msg.contains("first.md"));
        assert!(msg.contains("in chunk"));
    }
}
