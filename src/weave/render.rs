//! Markdown to HTML.

use std::fmt::Debug;

use pulldown_cmark::{html, Options, Parser};

/// Turns annotated markdown into an HTML fragment.
pub trait MarkdownRenderer: Debug {
    fn render(&self, markdown: &str) -> String;
}

/// CommonMark renderer backed by pulldown-cmark.
///
/// Raw HTML such as the section anchors passes through unchanged, and a
/// fence info string becomes the `language-*` class of the code block.
#[derive(Debug, Clone, Copy)]
pub struct CmarkRenderer {
    options: Options,
}

impl CmarkRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self { options }
    }
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
