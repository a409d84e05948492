//! File system abstraction for testability.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use super::paths::STDIN_NAME;

/// Source of input documents and sink for generated files.
pub trait FileSystem: std::fmt::Debug {
    /// Reads the contents of a document; `-` reads standard input.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Opens `path` for writing, creating parent directories as needed.
    fn create(&mut self, path: &Path) -> io::Result<Box<dyn Write + '_>>;
}

/// Real file system implementation.
#[derive(Debug, Clone, Default)]
pub struct RealFS {
    /// Base directory for relative paths.
    pub base_dir: PathBuf,
}

impl RealFS {
    /// Creates a new RealFS with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl FileSystem for RealFS {
    fn read(&self, path: &Path) -> io::Result<String> {
        if path == Path::new(STDIN_NAME) {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            return Ok(content);
        }
        fs::read_to_string(self.resolve(path))
    }

    fn create(&mut self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Box::new(fs::File::create(full)?))
    }
}

/// Virtual file system for testing.
#[derive(Debug, Clone, Default)]
pub struct VirtualFS {
    /// Files stored in memory.
    files: HashMap<PathBuf, Vec<u8>>,
}

impl VirtualFS {
    /// Creates a new empty virtual file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to the virtual file system.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into().into_bytes());
    }

    /// Returns the content of a file, if it exists and is valid UTF-8.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files
            .get(path.as_ref())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Lists all files, sorted by path.
    pub fn list_files(&self) -> Vec<&PathBuf> {
        let mut files: Vec<&PathBuf> = self.files.keys().collect();
        files.sort();
        files
    }
}

impl FileSystem for VirtualFS {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.contents(path).map(str::to_string).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }

    fn create(&mut self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        let buffer = self.files.entry(path.to_path_buf()).or_default();
        buffer.clear();
        Ok(Box::new(buffer))
    }
}
