//! Check command implementation.

use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{Context, Stages};

/// Options for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Root markdown document; `-` reads standard input.
    pub input: PathBuf,
    /// Follow links from the root document to chapter documents.
    pub book: bool,
    /// Print the report as JSON.
    pub json: bool,
}

/// Scans and validates a document set without writing anything.
pub fn check(ctx: &mut Context, options: CheckOptions) -> Result<()> {
    tracing::info!("Checking {}...", options.input.display());

    let mut config = ctx.config.clone();
    config.book |= options.book;
    let report = ctx.run_with(&config, &options.input, Stages::CHECK)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} chunks in {} files, {} warnings.",
        report.chunks,
        report.inputs.len(),
        report.warnings.len()
    );
    for root in &report.roots {
        println!("  {}", root);
    }
    Ok(())
}
