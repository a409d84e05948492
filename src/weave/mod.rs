//! Weaving: annotated HTML documentation for every scanned input.

mod annotate;
pub mod crossref;
mod render;

use std::io::Write;
use std::path::PathBuf;

pub use annotate::Annotator;
pub use render::{CmarkRenderer, MarkdownRenderer};

use crate::errors::{LitweaveError, Result};
use crate::interface::Document;
use crate::io::FileSystem;
use crate::model::VerifiedLattice;

/// Writes the HTML page of every input to its assigned output.
///
/// Outputs must have been assigned with [`Document::assign_outputs`].
/// Returns the written paths in scan order.
pub fn write_all_markdown(
    doc: &Document,
    lattice: &VerifiedLattice<'_>,
    fs: &mut dyn FileSystem,
    renderer: &dyn MarkdownRenderer,
    chunk_name_marker: &str,
) -> Result<Vec<PathBuf>> {
    let annotator = Annotator::new(doc, lattice).with_chunk_name_marker(chunk_name_marker);
    let mut written = Vec::new();

    for input in doc.inputs() {
        let output = doc.output_for(input).ok_or_else(|| {
            LitweaveError::Other(format!("No output assigned for {}", input.display()))
        })?;
        tracing::debug!("Weaving {} -> {}", input.display(), output.display());

        let html = renderer.render(&annotator.annotate(input));
        let mut sink = fs.create(output)?;
        sink.write_all(html.as_bytes())?;
        sink.flush()?;
        written.push(output.to_path_buf());
    }

    Ok(written)
}
