//! "Added to in" and "Used in" back-links.
//!
//! After each closing fence the woven document says where else the same
//! chunk is continued, and which chunks pull it in. Sections are rendered
//! as links to the anchor of the section in the generated page.

use std::path::Path;

use crate::interface::Document;
use crate::io::paths::{parent_dir, relative_to, to_link};
use crate::model::{Lattice, PostChunkRef, Section};

/// Renders a section as `[2.1](page.html#section-2.1)`.
///
/// Falls back to the bare number when either page has no known output.
pub fn section_link(doc: &Document, current: &Path, section: &Section) -> String {
    let label = section.number_label();
    let from = doc.output_for(current);
    let to = doc.output_for(section.file());
    match (from, to) {
        (Some(from), Some(to)) => {
            let rel = to_link(&relative_to(parent_dir(from), to));
            format!("[{}]({}#{})", label, rel, section.anchor())
        }
        _ => label,
    }
}

/// `section X`, `sections X and Y`, `sections X, Y and Z`.
pub fn sections_as_english(links: &[String]) -> String {
    match links {
        [] => String::new(),
        [only] => format!("section {}", only),
        [init @ .., last] => format!("sections {} and {}", init.join(", "), last),
    }
}

/// Other sections that add to the chunk closed at `post`.
///
/// The section of the current occurrence is left out once; further
/// occurrences in the same section are listed.
pub fn added_to_sections(doc: &Document, post: &PostChunkRef) -> Vec<Section> {
    let Some(chunk) = doc.chunks.get(post.name.as_str()) else {
        return Vec::new();
    };
    let mut sections: Vec<Section> = chunk.definitions.iter().map(|d| d.section.clone()).collect();
    if let Some(pos) = sections.iter().position(|s| *s == post.section) {
        sections.remove(pos);
    }
    sections
}

/// Sections whose chunks reference the chunk closed at `post`, in section order.
///
/// Each reference counts once, attributed to the nearest preceding
/// occurrence of the referencing chunk in the same file.
pub fn used_in_sections(doc: &Document, lattice: &Lattice, post: &PostChunkRef) -> Vec<Section> {
    let mut sections = Vec::new();
    for parent in lattice.parents(post.name.as_str()) {
        let Some(chunk) = doc.chunks.get(parent.as_str()) else {
            continue;
        };
        for line in &chunk.lines {
            if line.reference() != Some(post.name.as_str()) {
                continue;
            }
            let section = chunk
                .definition_before(&line.location)
                .map(|def| def.section.clone())
                .unwrap_or_default();
            sections.push(section);
        }
    }
    sections.sort_by(|a, b| a.number_order(b));
    sections
}

fn paragraph(doc: &Document, current: &Path, intro: &str, sections: &[Section]) -> String {
    if sections.is_empty() {
        return String::new();
    }
    let links: Vec<String> = sections
        .iter()
        .map(|section| section_link(doc, current, section))
        .collect();
    format!("\n{} {}.\n\n", intro, sections_as_english(&links))
}

/// The "Added to in" paragraph, or nothing.
pub fn added_to(doc: &Document, current: &Path, post: &PostChunkRef) -> String {
    paragraph(doc, current, "Added to in", &added_to_sections(doc, post))
}

/// The "Used in" paragraph, or nothing.
pub fn used_in(doc: &Document, lattice: &Lattice, current: &Path, post: &PostChunkRef) -> String {
    paragraph(doc, current, "Used in", &used_in_sections(doc, lattice, post))
}
