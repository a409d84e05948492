//! Readers for literate markdown documents.

mod line_kind;
mod links;
mod scanner;

pub use line_kind::{
    fence_backticks, leading_whitespace, parse_fence_open, parse_heading, parse_reference,
    LineKind, FENCE,
};
pub use links::{chapter_links, rewrite_links, ChapterLink};
pub use scanner::{Scanner, Warning, WarningKind};
