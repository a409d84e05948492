//! Chunks and the chunk table.

use indexmap::IndexMap;
use serde::Serialize;

use super::chunk_name::ChunkName;
use super::section::Section;
use crate::readers::parse_reference;
use crate::text_location::TextLocation;

/// One fenced occurrence of a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkDefinition {
    /// Location of the opening fence.
    pub location: TextLocation,
    /// Section the fence appeared in.
    pub section: Section,
}

/// A line of chunk content, as written in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkLine {
    pub location: TextLocation,
    pub text: String,
}

impl ChunkLine {
    /// Creates a new content line.
    pub fn new(location: TextLocation, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
        }
    }

    /// Returns the referenced chunk name if this line is a reference.
    pub fn reference(&self) -> Option<&str> {
        parse_reference(&self.text).map(|(_, name)| name)
    }

    /// Returns the indentation before `@` and the referenced name.
    pub fn reference_with_indent(&self) -> Option<(&str, &str)> {
        parse_reference(&self.text)
    }
}

/// Recorded at a closing fence: which chunk closed, in which section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostChunkRef {
    pub name: ChunkName,
    pub section: Section,
}

/// All occurrences of one chunk name.
///
/// Content is kept in scan order: lines from a second occurrence follow
/// the lines of the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub definitions: Vec<ChunkDefinition>,
    pub lines: Vec<ChunkLine>,
}

impl Chunk {
    /// Iterates over the names this chunk references, in content order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(ChunkLine::reference)
    }

    /// Finds the last definition in the same file as `location` that opens
    /// before it.
    pub fn definition_before(&self, location: &TextLocation) -> Option<&ChunkDefinition> {
        self.definitions
            .iter()
            .filter(|def| def.location.filename == location.filename)
            .filter(|def| def.location.line < location.line)
            .last()
    }
}

/// Every chunk of a run, keyed by name in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChunkTable {
    chunks: IndexMap<ChunkName, Chunk>,
}

impl ChunkTable {
    /// Creates a new empty chunk table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chunk with this name, creating it if absent.
    pub fn entry(&mut self, name: impl Into<ChunkName>) -> &mut Chunk {
        self.chunks.entry(name.into()).or_default()
    }

    /// Records an opening fence for `name`.
    pub fn add_definition(&mut self, name: &str, location: TextLocation, section: Section) {
        self.entry(name)
            .definitions
            .push(ChunkDefinition { location, section });
    }

    /// Appends a content line to `name`.
    pub fn add_line(&mut self, name: &str, location: TextLocation, text: &str) {
        self.entry(name).lines.push(ChunkLine::new(location, text));
    }

    pub fn get(&self, name: &str) -> Option<&Chunk> {
        self.chunks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chunks.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkName, &Chunk)> {
        self.chunks.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &ChunkName> {
        self.chunks.keys()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
