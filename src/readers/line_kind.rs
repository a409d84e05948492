//! Line classification.
//!
//! Every scanned line is classified once, in the context of whether a chunk
//! is currently open, and the scanner dispatches on the resulting
//! [`LineKind`]. Only the constructs litweave needs are recognized: ATX
//! headings, fences, and chunk reference lines.

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while, take_while1},
    combinator::rest,
};

/// Opening and closing fence marker.
pub const FENCE: &str = "```";

/// The role a line plays in a literate document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// An ATX heading outside a chunk.
    Heading { level: usize, text: &'a str },
    /// A fence opening a chunk. The name may be empty.
    ChunkOpen { name: &'a str },
    /// The fence closing the open chunk.
    ChunkClose,
    /// A chunk line that stands for the content of another chunk.
    ChunkReference { indent: &'a str, name: &'a str },
    /// Any other line inside a chunk.
    Code,
    /// Any other line outside a chunk.
    Prose,
}

impl<'a> LineKind<'a> {
    /// Classifies `line`, given whether a chunk is open.
    pub fn classify(line: &'a str, in_chunk: bool) -> Self {
        if in_chunk {
            if line == FENCE {
                LineKind::ChunkClose
            } else if let Some((indent, name)) = parse_reference(line) {
                LineKind::ChunkReference { indent, name }
            } else {
                LineKind::Code
            }
        } else if let Some(name) = parse_fence_open(line) {
            LineKind::ChunkOpen { name }
        } else if let Some((level, text)) = parse_heading(line) {
            LineKind::Heading { level, text }
        } else {
            LineKind::Prose
        }
    }
}

fn heading(input: &str) -> IResult<&str, (&str, &str, &str)> {
    (
        take_while1(|c: char| c == '#'),
        take_while1(|c: char| c.is_ascii_whitespace()),
        rest,
    )
        .parse(input)
}

/// Parses an ATX heading into its level and text.
///
/// The `#` run must start the line and be followed by whitespace; the text
/// is the rest of the line.
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let (_, (hashes, _, text)) = heading(line).ok()?;
    Some((hashes.len(), text))
}

fn fence_open(input: &str) -> IResult<&str, &str> {
    tag(FENCE).parse(input)
}

/// Parses a fence opening line, returning the trimmed chunk name.
pub fn parse_fence_open(line: &str) -> Option<&str> {
    let (name, _) = fence_open(line).ok()?;
    Some(name.trim())
}

fn reference_head(input: &str) -> IResult<&str, (&str, &str)> {
    (take_while(char::is_whitespace), tag("@{")).parse(input)
}

/// Parses a chunk reference line such as `    @{Parse arguments}`.
///
/// Returns the whitespace before `@` and the trimmed name. Whitespace may
/// surround the reference, but any other text on the line makes it plain
/// code, as does an empty name.
pub fn parse_reference(line: &str) -> Option<(&str, &str)> {
    let (body, (indent, _)) = reference_head(line).ok()?;
    let name = body.trim_end().strip_suffix('}')?.trim();
    if name.is_empty() {
        None
    } else {
        Some((indent, name))
    }
}

/// Returns the leading whitespace of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(line.len());
    &line[..end]
}

/// Returns the run of backticks a fence line starts with.
pub fn fence_backticks(line: &str) -> &str {
    let end = line.find(|c: char| c != '`').unwrap_or(line.len());
    &line[..end]
}
