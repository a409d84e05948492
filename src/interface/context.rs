//! Execution context and the scan / check / generate pipeline.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::document::Document;
use crate::config::Config;
use crate::errors::Result;
use crate::io::{FileSystem, RealFS};
use crate::model::{verify, write_chunks, ChunkName};
use crate::readers::Warning;
use crate::weave::{write_all_markdown, CmarkRenderer, MarkdownRenderer};

/// Which outputs a run produces after scanning and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stages {
    pub tangle: bool,
    pub weave: bool,
}

impl Stages {
    /// Scan and validate only.
    pub const CHECK: Stages = Stages {
        tangle: false,
        weave: false,
    };
    pub const TANGLE: Stages = Stages {
        tangle: true,
        weave: false,
    };
    pub const WEAVE: Stages = Stages {
        tangle: false,
        weave: true,
    };
    pub const BUILD: Stages = Stages {
        tangle: true,
        weave: true,
    };
}

/// What a run scanned and wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Scanned documents, root first.
    pub inputs: Vec<PathBuf>,
    /// Number of distinct chunk names.
    pub chunks: usize,
    /// Root chunks, i.e. the files a tangle writes.
    pub roots: Vec<ChunkName>,
    pub warnings: Vec<Warning>,
    /// Root chunks written by the tangle stage.
    pub tangled: Vec<ChunkName>,
    /// HTML pages written by the weave stage.
    pub woven: Vec<PathBuf>,
}

/// Runs one document set through the pipeline.
///
/// Scanning reads from `fs`, the lattice is validated, and then the selected
/// stages write through `fs`. Nothing is written unless validation passes.
pub fn run_pipeline(
    fs: &mut dyn FileSystem,
    renderer: &dyn MarkdownRenderer,
    config: &Config,
    root: &Path,
    stages: Stages,
) -> Result<BuildReport> {
    let mut doc = Document::new();
    let scanned = doc.scan(&*fs, root, config.book);
    doc.log_warnings();
    scanned?;
    if stages.weave {
        doc.assign_outputs(&config.doc_out_dir_for(root));
    }

    let lattice = doc.compile_lattice();
    let verified = verify(&lattice, &doc.chunks)?;

    let mut report = BuildReport {
        inputs: doc.inputs().iter().cloned().collect(),
        chunks: doc.chunks.len(),
        roots: lattice.roots().into_iter().cloned().collect(),
        warnings: doc.warnings.clone(),
        ..Default::default()
    };
    tracing::debug!(
        "Checked {} chunk(s) in {} file(s)",
        report.chunks,
        report.inputs.len()
    );

    if stages.tangle {
        report.tangled = write_chunks(&doc.chunks, &verified, fs, &config.line_directive)?;
        tracing::debug!("Tangled {} file(s)", report.tangled.len());
    }
    if stages.weave {
        report.woven =
            write_all_markdown(&doc, &verified, fs, renderer, &config.chunk_name_marker)?;
        tracing::debug!("Wove {} page(s)", report.woven.len());
    }

    Ok(report)
}

/// Context for litweave operations.
///
/// Holds the configuration and the file system and renderer a run goes
/// through.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub fs: Box<dyn FileSystem>,
    pub renderer: Box<dyn MarkdownRenderer>,
    /// Base directory for relative paths.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a context that works on disk below `base_dir`.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self {
            config,
            fs: Box::new(RealFS::new(base_dir.clone())),
            renderer: Box::new(CmarkRenderer::new()),
            base_dir,
        }
    }

    /// Creates a context over any file system, e.g. a [`VirtualFS`](crate::io::VirtualFS).
    pub fn with_fs(config: Config, fs: Box<dyn FileSystem>) -> Self {
        Self {
            config,
            fs,
            renderer: Box::new(CmarkRenderer::new()),
            base_dir: PathBuf::new(),
        }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context for the current directory, reading its config file.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Runs the pipeline on `root` with this context's configuration.
    pub fn run(&mut self, root: &Path, stages: Stages) -> Result<BuildReport> {
        let config = self.config.clone();
        self.run_with(&config, root, stages)
    }

    /// Runs the pipeline on `root` with an explicit configuration.
    pub fn run_with(&mut self, config: &Config, root: &Path, stages: Stages) -> Result<BuildReport> {
        run_pipeline(self.fs.as_mut(), self.renderer.as_ref(), config, root, stages)
    }
}
