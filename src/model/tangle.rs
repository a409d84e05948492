//! Tangling: expanding chunk references into source files.

use std::io::{BufWriter, Write};
use std::path::Path;

use super::chunk::ChunkTable;
use super::chunk_name::ChunkName;
use super::validate::VerifiedLattice;
use crate::config::LineDirective;
use crate::errors::{LitweaveError, Result, ValidationError, ValidationErrors};
use crate::io::FileSystem;
use crate::readers::leading_whitespace;

/// The chain of references a tangle is inside, from the root chunk inwards.
///
/// A name may only appear once on the path. Re-entering one fails with the
/// same cycle error the lattice validator reports.
#[derive(Debug, Clone, Default)]
pub struct ExpansionPath<'a> {
    names: Vec<&'a str>,
}

impl<'a> ExpansionPath<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descends into `name`.
    pub fn push(&mut self, name: &'a str) -> Result<()> {
        if let Some(start) = self.names.iter().position(|open| *open == name) {
            let cycle = self.names[start..]
                .iter()
                .chain(std::iter::once(&name))
                .map(|n| ChunkName::new(*n))
                .collect();
            return Err(ValidationErrors(vec![ValidationError::Cycle(cycle)]).into());
        }
        self.names.push(name);
        Ok(())
    }

    /// Returns from the innermost chunk.
    pub fn pop(&mut self) -> Option<&'a str> {
        self.names.pop()
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }
}

/// Writes the expansion of chunk `name` to `out`.
///
/// Reference lines are replaced by the referenced chunk, indented by the
/// whitespace before the `@` on top of `indent`. Every other line is written
/// as `directive + indent + text`.
pub fn write_chunk<'a, W: Write + ?Sized>(
    chunks: &'a ChunkTable,
    name: &'a str,
    out: &mut W,
    directive: &LineDirective,
    indent: &str,
    path: &mut ExpansionPath<'a>,
) -> Result<()> {
    path.push(name)?;

    if let Some(chunk) = chunks.get(name) {
        for line in &chunk.lines {
            if let Some((local_indent, child)) = line.reference_with_indent() {
                let nested = format!("{}{}", local_indent, indent);
                write_chunk(chunks, child, out, directive, &nested, path)?;
            } else {
                let line_indent = format!("{}{}", indent, leading_whitespace(&line.text));
                let file = line.location.filename.to_string_lossy();
                let prefix = directive.format(&line_indent, &file, line.location.line);
                writeln!(out, "{}{}{}", prefix, indent, line.text)?;
            }
        }
    }

    path.pop();
    Ok(())
}

/// Expands a chunk into a string.
pub fn tangle_to_string(
    chunks: &ChunkTable,
    lattice: &VerifiedLattice<'_>,
    name: &str,
    directive: &LineDirective,
) -> Result<String> {
    if !lattice.names().any(|n| n.as_str() == name) {
        return Err(LitweaveError::Other(format!("Unknown chunk: {}", name)));
    }
    let mut out = Vec::new();
    write_chunk(chunks, name, &mut out, directive, "", &mut ExpansionPath::new())?;
    String::from_utf8(out).map_err(|e| LitweaveError::Other(e.to_string()))
}

/// Tangles every root chunk into the file named after it.
///
/// Returns the written paths in lattice order.
pub fn write_chunks(
    chunks: &ChunkTable,
    lattice: &VerifiedLattice<'_>,
    fs: &mut dyn FileSystem,
    directive: &LineDirective,
) -> Result<Vec<ChunkName>> {
    let mut written = Vec::new();
    for root in lattice.roots() {
        tracing::debug!("Tangling {}", root);
        let sink = fs.create(Path::new(root.as_str()))?;
        let mut out = BufWriter::new(sink);
        write_chunk(chunks, root.as_str(), &mut out, directive, "", &mut ExpansionPath::new())?;
        out.flush()?;
        written.push(root.clone());
    }
    Ok(written)
}
