//! The document set of one run.
//!
//! A [`Document`] owns everything the scan produces: the chunk table, the
//! raw markdown of each input, and per-file indexes of where chunks open,
//! close, and where sections start. It is filled once by [`Document::scan`]
//! and only read afterwards by lattice building, tangling, and weaving.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use crate::errors::{LitweaveError, Result};
use crate::io::{normalize, output_name, FileSystem};
use crate::io::paths::parent_dir;
use crate::model::{ChunkName, ChunkTable, Lattice, PostChunkRef, Section};
use crate::readers::{Scanner, Warning};

/// Scan results for a root document and its chapters.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Every chunk across all inputs.
    pub chunks: ChunkTable,
    /// Raw markdown of each input, one `\n`-terminated line per source line.
    pub markdown: IndexMap<PathBuf, String>,
    /// Line of each chunk-opening fence, per file.
    pub chunk_starts: HashMap<PathBuf, BTreeMap<usize, ChunkName>>,
    /// Line of each chunk-closing fence, per file.
    pub chunk_refs: HashMap<PathBuf, BTreeMap<usize, PostChunkRef>>,
    /// Lines where a new section begins, per file.
    pub section_starts: HashMap<PathBuf, BTreeMap<usize, Section>>,
    /// Non-fatal problems, in scan order.
    pub warnings: Vec<Warning>,
    inputs: IndexSet<PathBuf>,
    outputs: HashMap<PathBuf, PathBuf>,
}

impl Document {
    /// Creates an empty document set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `root` and, in book mode, the chapters it links to.
    ///
    /// Files are scanned in discovery order. A file ending inside a chunk
    /// stops the scan.
    pub fn scan(&mut self, fs: &dyn FileSystem, root: &Path, book: bool) -> Result<()> {
        let root = normalize(root);
        self.schedule(root.clone());
        let mut scanner = Scanner::new(&root);

        let mut index = 0;
        while let Some(file) = self.inputs.get_index(index).cloned() {
            scanner.start_file(&file, book && index == 0);
            tracing::debug!("Scanning {}", file.display());

            let content = fs.read(&file).map_err(|source| LitweaveError::Read {
                path: file.clone(),
                source,
            })?;
            scanner.process_content(self, &content);

            if scanner.in_chunk() {
                return Err(LitweaveError::UnclosedChunk {
                    location: scanner.location(),
                    chunk: scanner.chunk_name().clone(),
                });
            }
            index += 1;
        }

        tracing::debug!(
            "Scanned {} file(s), {} chunk(s)",
            self.inputs.len(),
            self.chunks.len()
        );
        Ok(())
    }

    /// Queues a file for scanning. Returns false if it was already queued.
    pub fn schedule(&mut self, path: PathBuf) -> bool {
        let added = self.inputs.insert(path);
        if added {
            tracing::debug!("Scheduled {}", self.inputs[self.inputs.len() - 1].display());
        }
        added
    }

    /// Scanned files in discovery order; the first one is the root.
    pub fn inputs(&self) -> &IndexSet<PathBuf> {
        &self.inputs
    }

    pub fn root(&self) -> Option<&Path> {
        self.inputs.first().map(PathBuf::as_path)
    }

    pub fn record_section_start(&mut self, file: &Path, line: usize, section: Section) {
        self.section_starts
            .entry(file.to_path_buf())
            .or_default()
            .insert(line, section);
    }

    pub fn record_chunk_start(&mut self, file: &Path, line: usize, name: ChunkName) {
        self.chunk_starts
            .entry(file.to_path_buf())
            .or_default()
            .insert(line, name);
    }

    pub fn record_chunk_close(&mut self, file: &Path, line: usize, name: ChunkName, section: Section) {
        self.chunk_refs
            .entry(file.to_path_buf())
            .or_default()
            .insert(line, PostChunkRef { name, section });
    }

    pub fn append_markdown(&mut self, file: &Path, line: &str) {
        let buffer = self.markdown.entry(file.to_path_buf()).or_default();
        buffer.push_str(line);
        buffer.push('\n');
    }

    pub fn markdown_of(&self, file: &Path) -> Option<&str> {
        self.markdown.get(file).map(String::as_str)
    }

    /// Maps every input to its HTML output under `out_dir`.
    ///
    /// Paths below the root document's directory are mirrored.
    pub fn assign_outputs(&mut self, out_dir: &Path) {
        let root_dir = self
            .root()
            .map(|root| parent_dir(root).to_path_buf())
            .unwrap_or_default();
        self.outputs = self
            .inputs
            .iter()
            .map(|input| (input.clone(), output_name(input, &root_dir, out_dir)))
            .collect();
    }

    /// HTML output path of a scanned input.
    pub fn output_for(&self, input: &Path) -> Option<&Path> {
        self.outputs.get(input).map(PathBuf::as_path)
    }

    /// Builds the reference lattice over all chunks.
    pub fn compile_lattice(&self) -> Lattice {
        Lattice::compile(&self.chunks)
    }

    /// Logs collected warnings.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }
}
