//! Build, tangle and weave command implementations.

use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::errors::Result;
use crate::interface::{BuildReport, Context, Stages};

/// Options shared by the generating commands.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Root markdown document; `-` reads standard input.
    pub input: PathBuf,
    /// Command-line settings that win over the config file.
    pub overrides: ConfigOverrides,
}

fn run(ctx: &mut Context, options: &BuildOptions, stages: Stages) -> Result<BuildReport> {
    let mut config = ctx.config.clone();
    config.apply(&options.overrides);
    ctx.run_with(&config, &options.input, stages)
}

fn print_report(report: &BuildReport) {
    if !report.tangled.is_empty() {
        println!("Tangled {} files.", report.tangled.len());
        for name in &report.tangled {
            println!("  {}", name);
        }
    }
    if !report.woven.is_empty() {
        println!("Wove {} pages.", report.woven.len());
        for page in &report.woven {
            println!("  {}", page.display());
        }
    }
    if report.tangled.is_empty() && report.woven.is_empty() {
        println!("Nothing to write.");
    }
}

/// Tangles every root chunk and weaves every document.
pub fn build(ctx: &mut Context, options: BuildOptions) -> Result<()> {
    tracing::info!("Building {}...", options.input.display());
    let report = run(ctx, &options, Stages::BUILD)?;
    print_report(&report);
    Ok(())
}

/// Writes every root chunk to the file it names.
pub fn tangle(ctx: &mut Context, options: BuildOptions) -> Result<()> {
    tracing::info!("Tangling {}...", options.input.display());
    let report = run(ctx, &options, Stages::TANGLE)?;
    print_report(&report);
    Ok(())
}

/// Writes the HTML page of every document.
pub fn weave(ctx: &mut Context, options: BuildOptions) -> Result<()> {
    tracing::info!("Weaving {}...", options.input.display());
    let report = run(ctx, &options, Stages::WEAVE)?;
    print_report(&report);
    Ok(())
}
