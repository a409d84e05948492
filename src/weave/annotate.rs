//! Annotating scanned markdown for the woven output.
//!
//! The raw markdown of each input is replayed line by line and decorated
//! before it is handed to the HTML renderer:
//!
//! - section headings get a number and an anchor,
//! - each file starts with an anchor for its opening section,
//! - code fences get the chunk name above them and a language tag,
//! - closing fences are followed by "Added to in" / "Used in" links,
//! - links to other chapters point at their generated pages.

use std::borrow::Cow;
use std::path::Path;

use crate::interface::Document;
use crate::io::paths::{parent_dir, relative_to, resolve_link, to_link};
use crate::model::{language_tag, Lattice, Section};
use crate::readers::{fence_backticks, parse_heading, rewrite_links};

use super::crossref;

/// Produces the annotated markdown of scanned files.
#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    doc: &'a Document,
    lattice: &'a Lattice,
    chunk_name_marker: &'a str,
}

impl<'a> Annotator<'a> {
    pub fn new(doc: &'a Document, lattice: &'a Lattice) -> Self {
        Self {
            doc,
            lattice,
            chunk_name_marker: "",
        }
    }

    /// Sets the text written before each chunk name.
    pub fn with_chunk_name_marker(mut self, marker: &'a str) -> Self {
        self.chunk_name_marker = marker;
        self
    }

    /// Returns the annotated markdown of `file`, or an empty string if it
    /// was never scanned.
    pub fn annotate(&self, file: &Path) -> String {
        let Some(markdown) = self.doc.markdown_of(file) else {
            return String::new();
        };
        let section_starts = self.doc.section_starts.get(file);
        let chunk_starts = self.doc.chunk_starts.get(file);
        let chunk_refs = self.doc.chunk_refs.get(file);

        let mut out = String::with_capacity(markdown.len() * 2);
        let mut in_chunk = false;

        for (index, line) in markdown.lines().enumerate() {
            let number = index + 1;
            let chunk_start = chunk_starts.and_then(|m| m.get(&number));

            let mut text: Cow<'_, str> = if in_chunk || chunk_start.is_some() {
                Cow::Borrowed(line)
            } else {
                self.rewrite_chapter_links(file, line)
            };

            if let Some(section) = section_starts.and_then(|m| m.get(&number)) {
                match heading_with_anchor(&text, section) {
                    Some(heading) if !in_chunk && chunk_start.is_none() => {
                        text = Cow::Owned(heading);
                    }
                    _ => {
                        out.push_str(&format!("<a name=\"{}\"></a>\n", section.anchor()));
                    }
                }
            }

            if let Some(name) = chunk_start {
                out.push_str(self.chunk_name_marker);
                out.push_str(name.as_str());
                out.push_str("\n\n");
                text = Cow::Owned(self.tagged_fence(line, name.as_str()));
                in_chunk = true;
            }

            out.push_str(&text);
            out.push('\n');

            if let Some(post) = chunk_refs.and_then(|m| m.get(&number)) {
                in_chunk = false;
                out.push_str(&crossref::added_to(self.doc, file, post));
                out.push_str(&crossref::used_in(self.doc, self.lattice, file, post));
            }
        }

        out
    }

    /// Keeps the fence's backticks and tags it with the language of the
    /// file the chunk ends up in.
    fn tagged_fence(&self, line: &str, name: &str) -> String {
        let top = self.lattice.top_of(name);
        let tag = language_tag(top).unwrap_or("");
        format!("{}{}", fence_backticks(line), tag)
    }

    /// Points links to scanned `.md` files at their HTML pages.
    fn rewrite_chapter_links<'l>(&self, file: &Path, line: &'l str) -> Cow<'l, str> {
        let Some(from) = self.doc.output_for(file) else {
            return Cow::Borrowed(line);
        };
        rewrite_links(line, |link| {
            if link.is_external() {
                return None;
            }
            let target = resolve_link(file, link.path);
            let output = self.doc.output_for(&target)?;
            Some(to_link(&relative_to(parent_dir(from), output)))
        })
    }
}

/// `## <a name="section-1.2"></a>1.2 Text` for a heading line.
fn heading_with_anchor(line: &str, section: &Section) -> Option<String> {
    let (level, text) = parse_heading(line)?;
    Some(format!(
        "{} <a name=\"{}\"></a>{} {}",
        "#".repeat(level),
        section.anchor(),
        section.number_label(),
        text
    ))
}
