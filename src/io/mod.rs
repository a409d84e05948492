//! I/O operations for litweave.

mod file_system;
pub mod paths;

pub use file_system::{FileSystem, RealFS, VirtualFS};
pub use paths::{normalize, output_name, relative_to, STDIN_NAME};
