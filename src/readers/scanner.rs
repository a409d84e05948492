//! Line scanner.
//!
//! A [`Scanner`] walks a document line by line and records what it finds
//! into a [`Document`]: chunk definitions and content, where chunks open
//! and close, where sections start, and the raw markdown of every file.
//! One scanner is used for a whole run so the section counter carries
//! over from one chapter to the next.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::line_kind::LineKind;
use super::links::chapter_links;
use crate::interface::Document;
use crate::io::paths::resolve_link;
use crate::model::{ChunkName, Section};
use crate::text_location::TextLocation;

/// Problems that do not stop the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    UnnamedChunk,
    UnclosedChunk,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedChunk => write!(f, "Chunk has no name"),
            Self::UnclosedChunk => write!(f, "Content finished but chunk not closed"),
        }
    }
}

/// A warning attached to a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub location: TextLocation,
    pub kind: WarningKind,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

/// Scanning state for the file currently being read.
#[derive(Debug, Clone)]
pub struct Scanner {
    file: PathBuf,
    line_number: usize,
    in_chunk: bool,
    chunk_name: ChunkName,
    section: Section,
    follow_links: bool,
}

impl Scanner {
    /// Creates a scanner positioned before the first line of `file`.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        Self {
            section: Section::root(&file),
            file,
            line_number: 0,
            in_chunk: false,
            chunk_name: ChunkName::default(),
            follow_links: false,
        }
    }

    /// Moves on to another file. The section counter carries over.
    pub fn start_file(&mut self, file: impl Into<PathBuf>, follow_links: bool) {
        self.file = file.into();
        self.line_number = 0;
        self.in_chunk = false;
        self.section = self.section.moved_to(&self.file);
        self.follow_links = follow_links;
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn in_chunk(&self) -> bool {
        self.in_chunk
    }

    pub fn chunk_name(&self) -> &ChunkName {
        &self.chunk_name
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Location of the line most recently processed.
    pub fn location(&self) -> TextLocation {
        TextLocation::new(&self.file, self.line_number)
    }

    /// Processes every line of `content`.
    ///
    /// A chunk still open at the end is reported as a warning; callers that
    /// treat it as fatal check [`Scanner::in_chunk`] afterwards.
    pub fn process_content(&mut self, doc: &mut Document, content: &str) {
        for line in content.lines() {
            self.process_line(doc, line);
        }
        if self.in_chunk {
            doc.warnings.push(Warning {
                location: self.location(),
                kind: WarningKind::UnclosedChunk,
            });
        }
    }

    /// Processes a single line.
    pub fn process_line(&mut self, doc: &mut Document, line: &str) {
        self.line_number += 1;
        let kind = LineKind::classify(line, self.in_chunk);

        if !self.in_chunk && self.follow_links {
            for link in chapter_links(line) {
                if !link.is_external() {
                    doc.schedule(resolve_link(&self.file, link.path));
                }
            }
        }

        if let LineKind::Heading { .. } = kind {
            let (section, changed) = self.section.next(line);
            if changed {
                self.section = section;
                doc.record_section_start(&self.file, self.line_number, self.section.clone());
            }
        }
        if self.line_number == 1 {
            // Every file starts with an anchor, even without a heading.
            doc.section_starts
                .entry(self.file.clone())
                .or_default()
                .entry(1)
                .or_insert_with(|| self.section.clone());
        }

        match kind {
            LineKind::ChunkClose => {
                self.in_chunk = false;
                doc.record_chunk_close(
                    &self.file,
                    self.line_number,
                    self.chunk_name.clone(),
                    self.section.clone(),
                );
            }
            LineKind::Code | LineKind::ChunkReference { .. } => {
                doc.chunks
                    .add_line(self.chunk_name.as_str(), self.location(), line);
            }
            LineKind::ChunkOpen { name } => {
                if name.is_empty() {
                    doc.warnings.push(Warning {
                        location: self.location(),
                        kind: WarningKind::UnnamedChunk,
                    });
                }
                self.chunk_name = ChunkName::new(name);
                self.in_chunk = true;
                doc.chunks
                    .add_definition(name, self.location(), self.section.clone());
                doc.record_chunk_start(&self.file, self.line_number, self.chunk_name.clone());
            }
            LineKind::Heading { .. } | LineKind::Prose => {}
        }

        doc.append_markdown(&self.file, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(file: &str, content: &str) -> (Document, Scanner) {
        let mut doc = Document::new();
        let mut scanner = Scanner::new(file);
        doc.schedule(PathBuf::from(file));
        scanner.process_content(&mut doc, content);
        (doc, scanner)
    }

    fn texts(doc: &Document, name: &str) -> Vec<String> {
        doc.chunks
            .get(name)
            .map(|c| c.lines.iter().map(|l| l.text.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_markdown_is_kept_verbatim() {
        let content = "# Title\nSome text\n``` One\n  code\n```\n";
        let (doc, _) = scan("a.md", content);
        assert_eq!(doc.markdown_of(Path::new("a.md")), Some(content));
    }

    #[test]
    fn test_chunks_are_collected() {
        let content = "\
``` One
Line 1.1
@{Three}
Line 1.3
```
Text
``` Three
Line 3.1
```
``` One
Line 1.4
```
";
        let (doc, scanner) = scan("a.md", content);
        assert!(!scanner.in_chunk());
        assert_eq!(texts(&doc, "One"), ["Line 1.1", "@{Three}", "Line 1.3", "Line 1.4"]);
        assert_eq!(texts(&doc, "Three"), ["Line 3.1"]);

        let one = doc.chunks.get("One").unwrap();
        let def_lines: Vec<usize> = one.definitions.iter().map(|d| d.location.line).collect();
        assert_eq!(def_lines, [1, 10]);
        assert_eq!(one.lines[3].location, TextLocation::new("a.md", 11));

        let starts = &doc.chunk_starts[Path::new("a.md")];
        assert_eq!(starts.get(&7), Some(&ChunkName::new("Three")));
        let closes = &doc.chunk_refs[Path::new("a.md")];
        assert_eq!(closes.keys().copied().collect::<Vec<_>>(), [5, 9, 12]);
        assert_eq!(closes[&9].name, ChunkName::new("Three"));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_sections_are_recorded() {
        let content = "Intro\n# One\ntext\n## One.One\n``` x.txt\n# not a heading\n```\n# Two\n";
        let (doc, scanner) = scan("a.md", content);
        let starts = &doc.section_starts[Path::new("a.md")];
        let recorded: Vec<(usize, String)> = starts
            .iter()
            .map(|(line, s)| (*line, s.number_label()))
            .collect();
        assert_eq!(
            recorded,
            [
                (1, "0".to_string()),
                (2, "1".to_string()),
                (4, "1.1".to_string()),
                (8, "2".to_string())
            ]
        );
        assert_eq!(scanner.section().text, "Two");

        let def = &doc.chunks.get("x.txt").unwrap().definitions[0];
        assert_eq!(def.section.number_label(), "1.1");
    }

    #[test]
    fn test_heading_on_first_line_is_the_start() {
        let (doc, _) = scan("a.md", "# Section One\nText\n");
        let starts = &doc.section_starts[Path::new("a.md")];
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[&1].text, "Section One");
    }

    #[test]
    fn test_warnings_around_chunks() {
        let (doc, scanner) = scan("w.md", "```\nanonymous\n```\n``` Open\nstill open\n");
        assert_eq!(
            doc.warnings,
            [
                Warning {
                    location: TextLocation::new("w.md", 1),
                    kind: WarningKind::UnnamedChunk
                },
                Warning {
                    location: TextLocation::new("w.md", 5),
                    kind: WarningKind::UnclosedChunk
                },
            ]
        );
        assert!(scanner.in_chunk());
        assert_eq!(scanner.chunk_name().as_str(), "Open");
        assert_eq!(
            doc.warnings[1].to_string(),
            "w.md:5: Content finished but chunk not closed"
        );
    }

    #[test]
    fn test_links_followed_only_when_enabled() {
        let content = "* [First](chaps/first.md)\n* [Second](chaps/second.md#intro)\n";

        let (doc, _) = scan("book.md", content);
        assert_eq!(doc.inputs().len(), 1);

        let mut doc = Document::new();
        doc.schedule(PathBuf::from("../aaa/book.md"));
        let mut scanner = Scanner::new("../aaa/book.md");
        scanner.start_file("../aaa/book.md", true);
        scanner.process_content(&mut doc, content);
        let inputs: Vec<&Path> = doc.inputs().iter().map(PathBuf::as_path).collect();
        assert_eq!(
            inputs,
            [
                Path::new("../aaa/book.md"),
                Path::new("../aaa/chaps/first.md"),
                Path::new("../aaa/chaps/second.md")
            ]
        );
    }

    #[test]
    fn test_links_inside_chunks_are_ignored() {
        let mut doc = Document::new();
        let mut scanner = Scanner::new("book.md");
        scanner.start_file("book.md", true);
        scanner.process_content(
            &mut doc,
            "``` notes.txt\n[code](code.md)\n```\n[ext](https://example.org/x.md)\n",
        );
        assert!(doc.inputs().is_empty());
    }

    #[test]
    fn test_section_carries_into_next_file() {
        let mut doc = Document::new();
        let mut scanner = Scanner::new("first.md");
        scanner.process_content(&mut doc, "# One\n## One.One\n");
        scanner.start_file("second.md", false);
        scanner.process_content(&mut doc, "Text\n## Next\n");

        let starts = &doc.section_starts[Path::new("second.md")];
        assert_eq!(starts[&1], Section::new("second.md", vec![1, 1], "One.One"));
        assert_eq!(starts[&2], Section::new("second.md", vec![1, 2], "Next"));
    }
}
