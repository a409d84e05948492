//! Markdown links to other `.md` documents.
//!
//! In book mode the root document's links to `.md` files name its chapters,
//! and when weaving, links to known chapters are pointed at the generated
//! HTML pages instead.

use std::borrow::Cow;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `](path.md#fragment "title")` with optional fragment and title.
static CHAPTER_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\]\((?P<path>[^)#]+\.md)(?P<fragment>#[-\w.]*)?(?P<title>\s+"[^"]*")?\)"#)
        .unwrap()
});

/// A link to a Markdown document found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLink<'a> {
    /// The link target without fragment or title.
    pub path: &'a str,
    /// The `#fragment`, including the `#`.
    pub fragment: Option<&'a str>,
    /// Byte range of `path` within the line.
    pub span: Range<usize>,
}

impl ChapterLink<'_> {
    /// Links with a URL scheme point outside the book.
    pub fn is_external(&self) -> bool {
        self.path.contains("://")
    }
}

fn to_link<'a>(caps: &Captures<'a>) -> Option<ChapterLink<'a>> {
    let path = caps.name("path")?;
    Some(ChapterLink {
        path: path.as_str(),
        fragment: caps.name("fragment").map(|m| m.as_str()),
        span: path.range(),
    })
}

/// Finds every link to a `.md` document on `line`.
pub fn chapter_links(line: &str) -> Vec<ChapterLink<'_>> {
    CHAPTER_LINK
        .captures_iter(line)
        .filter_map(|caps| to_link(&caps))
        .collect()
}

/// Replaces link targets for which `replace` returns a new path.
///
/// Fragments and titles are kept; links `replace` declines are unchanged.
pub fn rewrite_links<'a, F>(line: &'a str, mut replace: F) -> Cow<'a, str>
where
    F: FnMut(&ChapterLink<'_>) -> Option<String>,
{
    let mut out = String::new();
    let mut last = 0;
    for link in chapter_links(line) {
        if let Some(new_path) = replace(&link) {
            out.push_str(&line[last..link.span.start]);
            out.push_str(&new_path);
            last = link.span.end;
        }
    }
    if last == 0 {
        return Cow::Borrowed(line);
    }
    out.push_str(&line[last..]);
    Cow::Owned(out)
}
