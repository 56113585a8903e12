//! Read-only asset sources.
//!
//! Every resource the resolver touches is addressed by a `/`-separated path
//! relative to the root of an [`AssetSource`]. Three implementations are
//! provided:
//!
//! - [`DirectorySource`]: files under a base directory on disk
//! - [`EmbeddedSource`]: a tree embedded at compile time with `include_dir!`
//! - [`MemorySource`]: an in-memory map, handy for generated assets and tests
//!
//! # Example
//!
//! ```ignore
//! use include_dir::{include_dir, Dir};
//! use horizon_lattice_resources::source::{AssetSource, EmbeddedSource};
//!
//! static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");
//!
//! let source = EmbeddedSource::new(&ASSETS);
//! if source.exists("theme/dark/values/color.xml") {
//!     let xml = source.read_text("theme/dark/values/color.xml")?;
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use include_dir::{Dir, DirEntry};

use crate::error::{Error, Result};

/// A virtual read-only filesystem.
pub trait AssetSource: Send + Sync + fmt::Debug {
    /// Returns true if a file exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Reads the full contents of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Reads the file at `path` as UTF-8 text.
    fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            Error::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }
}

/// Normalizes a virtual path: strips leading separators and rejects `..`.
fn normalize(path: &str) -> Option<&str> {
    let trimmed = path.trim_start_matches('/');
    let escapes = Path::new(trimmed)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    (!trimmed.is_empty() && !escapes).then_some(trimmed)
}

// ============================================================================
// DirectorySource
// ============================================================================

/// Assets stored under a base directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The base directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> Option<PathBuf> {
        normalize(path).map(|p| self.root.join(p))
    }
}

impl AssetSource for DirectorySource {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_some_and(|p| p.is_file())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.full_path(path).ok_or_else(|| Error::not_found(path))?;
        fs::read(&full).map_err(|e| Error::io(path, e))
    }
}

// ============================================================================
// EmbeddedSource
// ============================================================================

/// Assets embedded in the binary with `include_dir!`.
#[derive(Clone, Copy)]
pub struct EmbeddedSource {
    dir: &'static Dir<'static>,
}

impl EmbeddedSource {
    /// Wrap an embedded directory.
    pub const fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// Lists all embedded file paths (recursively).
    pub fn list_files(&self) -> Vec<&'static str> {
        let mut paths = Vec::new();
        collect_files(self.dir, &mut paths);
        paths
    }
}

fn collect_files(dir: &'static Dir<'static>, paths: &mut Vec<&'static str>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(subdir) => collect_files(subdir, paths),
            DirEntry::File(file) => {
                if let Some(path) = file.path().to_str() {
                    paths.push(path);
                }
            }
        }
    }
}

impl AssetSource for EmbeddedSource {
    fn exists(&self, path: &str) -> bool {
        normalize(path).is_some_and(|p| self.dir.get_file(p).is_some())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        normalize(path)
            .and_then(|p| self.dir.get_file(p))
            .map(|f| f.contents().to_vec())
            .ok_or_else(|| Error::not_found(path))
    }
}

impl fmt::Debug for EmbeddedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedSource")
            .field("file_count", &self.list_files().len())
            .finish()
    }
}

// ============================================================================
// MemorySource
// ============================================================================

/// Assets held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        let path = path.into();
        let key = normalize(&path).unwrap_or(&path).to_string();
        self.files.insert(key, contents.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the source holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetSource for MemorySource {
    fn exists(&self, path: &str) -> bool {
        normalize(path).is_some_and(|p| self.files.contains_key(p))
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        normalize(path)
            .and_then(|p| self.files.get(p))
            .cloned()
            .ok_or_else(|| Error::not_found(path))
    }
}
