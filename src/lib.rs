//! Litweave - Literate Programming Compiler
//!
//! This library reads Markdown documents containing named code chunks and
//! turns them into two products: the source files assembled from those
//! chunks (tangling), and cross-referenced HTML documentation (weaving).
//!
//! # Features
//!
//! - **Scan**: Collect named fenced chunks, section numbers, and chapter links
//! - **Check**: Validate the chunk reference graph before anything is written
//! - **Tangle**: Expand `@{name}` references into root files, with optional line directives
//! - **Weave**: Render numbered, anchored HTML with "Added to in" / "Used in" links
//! - **Book mode**: Follow links from a root document to its chapters
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use litweave::interface::{Context, Stages};
//!
//! let mut ctx = Context::from_current_dir().unwrap();
//! let report = ctx.run(Path::new("book.md"), Stages::BUILD).unwrap();
//! println!("{} files tangled", report.tangled.len());
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;
pub mod weave;

// Re-export commonly used types
pub use config::Config;
pub use errors::{LitweaveError, Result};
pub use interface::{BuildReport, Context, Document, Stages};
pub use model::{ChunkName, ChunkTable, Lattice, Section};

// Re-export command options
pub use commands::{BuildOptions, CheckOptions};
