//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::line_directive::LineDirective;

/// Main configuration structure for litweave.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Follow links from the root document to chapter documents.
    #[serde(default)]
    pub book: bool,

    /// Pattern written before every tangled line; empty disables it.
    #[serde(default)]
    pub line_directive: LineDirective,

    /// Directory for generated HTML. Defaults to the root document's directory.
    #[serde(default)]
    pub doc_out_dir: Option<PathBuf>,

    /// Text placed before the chunk name shown above each code block.
    #[serde(default)]
    pub chunk_name_marker: String,
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the HTML output directory for a root document.
    pub fn doc_out_dir_for(&self, root: &Path) -> PathBuf {
        match &self.doc_out_dir {
            Some(dir) => dir.clone(),
            None => root.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }

    /// Applies command-line overrides on top of file settings.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if overrides.book {
            self.book = true;
        }
        if let Some(ref pattern) = overrides.line_directive {
            self.line_directive = LineDirective::new(pattern.as_str());
        }
        if let Some(ref dir) = overrides.doc_out_dir {
            self.doc_out_dir = Some(dir.clone());
        }
        if let Some(ref marker) = overrides.chunk_name_marker {
            self.chunk_name_marker = marker.clone();
        }
    }
}

/// Settings given on the command line, which win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub book: bool,
    pub line_directive: Option<String>,
    pub doc_out_dir: Option<PathBuf>,
    pub chunk_name_marker: Option<String>,
}
