//! High-level interface for litweave runs.

mod context;
mod document;

pub use context::{run_pipeline, BuildReport, Context, Stages};
pub use document::Document;
