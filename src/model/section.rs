//! Hierarchical section numbering.
//!
//! Every ATX heading moves the section counter: a `##` heading after
//! section `2.1` produces `2.2`, a `#` heading after `2.1.3` produces `3`.
//! The counter before any heading is the root section, rendered as `0`.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::readers::parse_heading;

/// A numbered section of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// The document the section currently belongs to.
    pub file: PathBuf,
    /// Section numbers, one per heading level. Empty for the root section.
    pub numbers: Vec<u32>,
    /// Heading text, without the leading `#` run.
    pub text: String,
}

impl Section {
    /// Creates the root section for a document.
    pub fn root(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            numbers: Vec::new(),
            text: String::new(),
        }
    }

    /// Creates a section with explicit numbers.
    pub fn new(file: impl Into<PathBuf>, numbers: Vec<u32>, text: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            numbers,
            text: text.into(),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Heading depth of this section (0 for the root).
    pub fn depth(&self) -> usize {
        self.numbers.len()
    }

    /// Advances the counter over `line`.
    ///
    /// Returns the new section and whether the line was a heading. Lines that
    /// are not headings leave the section unchanged.
    pub fn next(&self, line: &str) -> (Section, bool) {
        let Some((level, text)) = parse_heading(line) else {
            return (self.clone(), false);
        };

        let old_level = self.numbers.len();
        let numbers = if level > old_level {
            let mut numbers = self.numbers.clone();
            numbers.resize(level, 1);
            numbers
        } else {
            let mut numbers = self.numbers[..level].to_vec();
            numbers[level - 1] += 1;
            numbers
        };

        let section = Section {
            file: self.file.clone(),
            numbers,
            text: text.to_string(),
        };
        (section, true)
    }

    /// Returns a copy of this section owned by another document.
    pub fn moved_to(&self, file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..self.clone()
        }
    }

    /// Section numbers joined by dots, `0` for the root.
    pub fn number_label(&self) -> String {
        if self.numbers.is_empty() {
            return "0".to_string();
        }
        self.numbers
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// HTML anchor name of this section, e.g. `section-2.1`.
    pub fn anchor(&self) -> String {
        format!("section-{}", self.number_label())
    }

    /// Orders sections by their numbers only; a prefix sorts first.
    pub fn number_order(&self, other: &Section) -> Ordering {
        self.numbers.cmp(&other.numbers)
    }
}
