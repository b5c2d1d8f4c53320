//! Storage for normalized cells, keyed by source file name and cell size.

use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Identity of a normalized cell: `(file_name, width, height)`.
///
/// The source's directory is not part of the key, so two sources with the same file
/// name in different folders share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl CacheKey {
    pub fn new(file_name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            file_name: file_name.into(),
            width,
            height,
        }
    }

    /// Key for `source` at the given cell size, using the path's final component.
    pub fn for_source(source: &Path, width: u32, height: u32) -> Self {
        let file_name = source
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(file_name, width, height)
    }

    /// Artifact name, e.g. `photo.png-200x200.jpg`.
    pub fn artifact_name(&self) -> String {
        format!("{}-{}x{}.jpg", self.file_name, self.width, self.height)
    }
}

/// A byte store for encoded cells.
///
/// Entries are either fully present or absent; a store never hands back partial data.
pub trait CacheStore {
    fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>>;
    fn put(&mut self, key: &CacheKey, bytes: &[u8]) -> Result<()>;
}

/// Cells stored as JPEG files in one directory.
///
/// Entries are never invalidated: editing a source image keeps serving the old cell until
/// its artifact is deleted by hand.
#[derive(Debug, Clone)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    /// The directory is created lazily on the first `put`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.artifact_name())
    }
}

impl CacheStore for DirCache {
    fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn put(&mut self, key: &CacheKey, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), bytes)?;
        Ok(())
    }
}

/// In-memory store, useful for tests and throwaway runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: HashMap<CacheKey, Vec<u8>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &CacheKey, bytes: &[u8]) -> Result<()> {
        self.entries.insert(key.clone(), bytes.to_vec());
        Ok(())
    }
}
