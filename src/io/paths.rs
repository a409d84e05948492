//! Lexical path helpers.
//!
//! Chapter links and output names are computed without touching the disk:
//! paths are normalized textually and made relative to each other the same
//! way a browser resolves relative links.

use std::path::{Component, Path, PathBuf};

/// Name that stands for standard input.
pub const STDIN_NAME: &str = "-";

/// Output name used when the input has no usable name.
const DEFAULT_OUTPUT: &str = "out.html";

/// Removes `.` components and folds `dir/..` pairs.
///
/// Leading `..` components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Directory part of `path`; empty for a bare file name.
pub fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// Path of `to` as seen from directory `from_dir`.
pub fn relative_to(from_dir: &Path, to: &Path) -> PathBuf {
    let from = normalize(from_dir);
    let to = normalize(to);
    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from_parts.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part);
    }
    rel
}

/// Renders a relative path as a URL path, always with `/` separators.
pub fn to_link(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves a link target written in `current` against its directory.
pub fn resolve_link(current: &Path, target: &str) -> PathBuf {
    normalize(&parent_dir(current).join(target))
}

/// HTML output path for `input`.
///
/// The input's position below `root_dir` is mirrored under `out_dir` and the
/// extension becomes `.html`. Standard input and empty names map to
/// `out.html`.
pub fn output_name(input: &Path, root_dir: &Path, out_dir: &Path) -> PathBuf {
    if input.as_os_str().is_empty() || input == Path::new(STDIN_NAME) {
        return normalize(&out_dir.join(DEFAULT_OUTPUT));
    }
    let rel = relative_to(root_dir, input);
    normalize(&out_dir.join(rel).with_extension("html"))
}
