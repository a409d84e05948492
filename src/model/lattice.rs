//! The chunk lattice: who references whom.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::chunk::ChunkTable;
use super::chunk_name::ChunkName;

/// Parent/child graph over chunk names.
///
/// Every name that is defined or referenced has an entry in both maps,
/// possibly with an empty set, and `b ∈ children_of[a]` exactly when
/// `a ∈ parents_of[b]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lattice {
    children_of: IndexMap<ChunkName, IndexSet<ChunkName>>,
    parents_of: IndexMap<ChunkName, IndexSet<ChunkName>>,
}

impl Lattice {
    /// Creates a new empty lattice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the lattice from every reference line in the chunk table.
    pub fn compile(chunks: &ChunkTable) -> Self {
        let mut lattice = Self::new();
        for (name, chunk) in chunks.iter() {
            lattice.add_name(name.as_str());
            for child in chunk.references() {
                lattice.add_edge(name.as_str(), child);
            }
        }
        lattice
    }

    /// Ensures `name` has an entry in both maps.
    pub fn add_name(&mut self, name: &str) {
        if !self.children_of.contains_key(name) {
            self.children_of.insert(ChunkName::new(name), IndexSet::new());
        }
        if !self.parents_of.contains_key(name) {
            self.parents_of.insert(ChunkName::new(name), IndexSet::new());
        }
    }

    /// Records that `parent` references `child`.
    pub fn add_edge(&mut self, parent: &str, child: &str) {
        self.add_name(parent);
        self.add_name(child);
        if let Some(children) = self.children_of.get_mut(parent) {
            children.insert(ChunkName::new(child));
        }
        if let Some(parents) = self.parents_of.get_mut(child) {
            parents.insert(ChunkName::new(parent));
        }
    }

    /// Iterates over every name in the lattice.
    pub fn names(&self) -> impl Iterator<Item = &ChunkName> {
        self.children_of.keys()
    }

    pub fn children(&self, name: &str) -> impl Iterator<Item = &ChunkName> {
        self.children_of.get(name).into_iter().flatten()
    }

    pub fn parents(&self, name: &str) -> impl Iterator<Item = &ChunkName> {
        self.parents_of.get(name).into_iter().flatten()
    }

    pub fn has_children(&self, name: &str) -> bool {
        self.children_of.get(name).is_some_and(|c| !c.is_empty())
    }

    /// Names nobody references. Each one becomes an output file.
    pub fn roots(&self) -> Vec<&ChunkName> {
        self.parents_of
            .iter()
            .filter(|(_, parents)| parents.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Walks up through first parents until a root is reached.
    ///
    /// A cycle stops the walk at the first repeated name.
    pub fn top_of<'a>(&'a self, name: &'a str) -> &'a str {
        let mut current = name;
        let mut visited = HashSet::new();
        while visited.insert(current) {
            match self.parents(current).next() {
                Some(parent) => current = parent.as_str(),
                None => break,
            }
        }
        current
    }

    pub fn len(&self) -> usize {
        self.children_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children_of.is_empty()
    }
}
