//! Core model types for litweave.

mod chunk;
mod chunk_name;
mod lattice;
mod section;
mod tangle;
mod validate;

pub use chunk::{Chunk, ChunkDefinition, ChunkLine, ChunkTable, PostChunkRef};
pub use chunk_name::{language_tag, ChunkName};
pub use lattice::Lattice;
pub use section::Section;
pub use tangle::{tangle_to_string, write_chunk, write_chunks, ExpansionPath};
pub use validate::{
    check_acyclic, check_all_defined, check_roots_are_filenames, validate, verify, VerifiedLattice,
};
