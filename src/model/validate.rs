//! Lattice validation.
//!
//! Three independent checks run over a compiled lattice: every root must be
//! named like a file, there must be no reference cycles, and every referenced
//! chunk must be defined. All failures are reported together.

use std::collections::{HashSet, VecDeque};
use std::ops::Deref;

use super::chunk::ChunkTable;
use super::chunk_name::ChunkName;
use super::lattice::Lattice;
use crate::errors::{ValidationError, ValidationErrors};

/// A lattice that passed every check.
///
/// Only [`verify`] constructs one, so code holding it may assume the
/// lattice is acyclic and fully defined.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedLattice<'a> {
    lattice: &'a Lattice,
}

impl Deref for VerifiedLattice<'_> {
    type Target = Lattice;

    fn deref(&self) -> &Lattice {
        self.lattice
    }
}

/// Runs every check and returns the lattice as verified if all pass.
pub fn verify<'a>(
    lattice: &'a Lattice,
    chunks: &ChunkTable,
) -> Result<VerifiedLattice<'a>, ValidationErrors> {
    let errors = validate(lattice, chunks);
    if errors.is_empty() {
        Ok(VerifiedLattice { lattice })
    } else {
        Err(errors)
    }
}

/// Runs every check and collects the failures.
pub fn validate(lattice: &Lattice, chunks: &ChunkTable) -> ValidationErrors {
    let errors = [
        check_roots_are_filenames(lattice),
        check_acyclic(lattice),
        check_all_defined(lattice, chunks),
    ];
    ValidationErrors(errors.into_iter().flatten().collect())
}

/// Every root chunk is written to a file, so its name must look like one.
pub fn check_roots_are_filenames(lattice: &Lattice) -> Option<ValidationError> {
    let bad: Vec<ChunkName> = lattice
        .roots()
        .into_iter()
        .filter(|name| !name.is_filename())
        .cloned()
        .collect();
    (!bad.is_empty()).then_some(ValidationError::NonFilenameRoots(bad))
}

/// Reports the shortest reference path that revisits a chunk.
///
/// Paths are grown breadth first from the roots. Names no root can reach
/// are searched in a second pass.
pub fn check_acyclic(lattice: &Lattice) -> Option<ValidationError> {
    let mut reached = HashSet::new();
    let roots: Vec<&str> = lattice.roots().into_iter().map(ChunkName::as_str).collect();
    if let Some(cycle) = find_cycle(lattice, &roots, &mut reached) {
        return Some(ValidationError::Cycle(cycle));
    }

    let unreached: Vec<&str> = lattice
        .names()
        .map(ChunkName::as_str)
        .filter(|name| !reached.contains(name))
        .collect();
    find_cycle(lattice, &unreached, &mut reached).map(ValidationError::Cycle)
}

fn find_cycle<'a>(
    lattice: &'a Lattice,
    seeds: &[&'a str],
    reached: &mut HashSet<&'a str>,
) -> Option<Vec<ChunkName>> {
    let mut paths: VecDeque<Vec<&str>> = seeds.iter().map(|seed| vec![*seed]).collect();
    reached.extend(seeds.iter().copied());

    while let Some(path) = paths.pop_front() {
        let Some(&last) = path.last() else {
            continue;
        };
        for child in lattice.children(last) {
            let child = child.as_str();
            if let Some(start) = path.iter().position(|name| *name == child) {
                let mut cycle: Vec<ChunkName> =
                    path[start..].iter().map(|name| ChunkName::new(*name)).collect();
                cycle.push(ChunkName::new(child));
                return Some(cycle);
            }
            reached.insert(child);
            let mut extended = path.clone();
            extended.push(child);
            paths.push_back(extended);
        }
    }
    None
}

/// Every name in the lattice must have at least one definition.
pub fn check_all_defined(lattice: &Lattice, chunks: &ChunkTable) -> Option<ValidationError> {
    let missing: Vec<ChunkName> = lattice
        .names()
        .filter(|name| !chunks.contains(name.as_str()))
        .cloned()
        .collect();
    (!missing.is_empty()).then_some(ValidationError::Undefined(missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use crate::text_location::TextLocation;

    fn lattice(edges: &[(&str, &str)]) -> Lattice {
        let mut lattice = Lattice::new();
        for (parent, child) in edges {
            lattice.add_edge(parent, child);
        }
        lattice
    }

    fn defined(names: &[&str]) -> ChunkTable {
        let mut table = ChunkTable::new();
        for name in names {
            table.add_definition(name, TextLocation::new("t.md", 1), Section::root("t.md"));
        }
        table
    }

    #[test]
    fn test_roots_must_be_filenames() {
        let ok = lattice(&[("main.go", "A"), (".gitignore", "B")]);
        assert_eq!(check_roots_are_filenames(&ok), None);

        let one = lattice(&[("main", "A")]);
        assert_eq!(
            check_roots_are_filenames(&one).unwrap().to_string(),
            "Found top level chunk which isn't a filename: main"
        );

        let two = lattice(&[("aa", "x"), ("a.", "y"), ("ok.txt", "z")]);
        assert_eq!(
            check_roots_are_filenames(&two).unwrap().to_string(),
            "Found top level chunks which aren't filenames: aa, a."
        );
    }

    #[test]
    fn test_cycle_reports_repeating_segment() {
        let lat = lattice(&[
            ("aa.txt", "bb"),
            ("bb", "cc"),
            ("bb", "dd"),
            ("dd", "ee"),
            ("ee", "ff"),
            ("ff", "dd"),
            ("dd", "gg"),
            ("gg", "ee"),
        ]);
        let err = check_acyclic(&lat).unwrap();
        assert!(
            err.to_string().contains("dd -> ee -> ff -> dd"),
            "{err}"
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let lat = lattice(&[("x.txt", "loop"), ("loop", "loop")]);
        assert_eq!(
            check_acyclic(&lat).unwrap().to_string(),
            "Found cyclic chunks: loop -> loop"
        );
    }

    #[test]
    fn test_cycle_unreachable_from_roots() {
        let lat = lattice(&[("x.txt", "leaf"), ("a", "b"), ("b", "a")]);
        let err = check_acyclic(&lat).unwrap().to_string();
        assert!(err.contains("a -> b -> a") || err.contains("b -> a -> b"), "{err}");
    }

    #[test]
    fn test_acyclic_lattices_pass() {
        assert_eq!(check_acyclic(&Lattice::new()), None);
        let diamond = lattice(&[
            ("top.c", "left"),
            ("top.c", "right"),
            ("left", "bottom"),
            ("right", "bottom"),
        ]);
        assert_eq!(check_acyclic(&diamond), None);
    }

    #[test]
    fn test_undefined_chunks() {
        let lat = lattice(&[("main.go", "A"), ("main.go", "B"), ("A", "C")]);
        let chunks = defined(&["main.go", "A"]);
        assert_eq!(
            check_all_defined(&lat, &chunks).unwrap().to_string(),
            "Chunks not defined: B, C"
        );
        let all = defined(&["main.go", "A", "B", "C"]);
        assert_eq!(check_all_defined(&lat, &all), None);
    }

    #[test]
    fn test_verify_collects_every_failure() {
        let lat = lattice(&[("main", "x"), ("x", "y"), ("y", "x")]);
        let chunks = defined(&["main", "x"]);
        let errors = verify(&lat, &chunks).unwrap_err();
        assert_eq!(errors.0.len(), 3);
        let text = errors.to_string();
        assert!(text.contains("isn't a filename: main"));
        assert!(text.contains("x -> y -> x"));
        assert!(text.contains("Chunk not defined: y"));
    }

    #[test]
    fn test_verify_passes_valid_lattice() {
        let lat = lattice(&[("main.go", "A")]);
        let chunks = defined(&["main.go", "A"]);
        let verified = verify(&lat, &chunks).unwrap();
        assert_eq!(verified.roots().len(), 1);
    }
}
