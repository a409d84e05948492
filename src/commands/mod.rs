//! Command implementations for the litweave CLI.

mod build;
mod check;

pub use build::{build, tangle, weave, BuildOptions};
pub use check::{check, CheckOptions};
