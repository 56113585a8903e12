//! Texture asset cache.
//!
//! Textures are cached by their resolved path, so the same logical image can
//! be cached once per theme. Decoding is left to the renderer; a [`Texture`]
//! only carries the undecoded file contents.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::error::Result;
use crate::source::AssetSource;

/// An undecoded image loaded from an asset source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    path: String,
    bytes: Arc<[u8]>,
}

impl Texture {
    /// The resolved path this texture was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that read the asset source.
    pub misses: u64,
    /// Number of times the cache was cleared.
    pub clears: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, Texture>,
    stats: CacheStats,
}

/// Path-keyed texture cache with an entry limit.
#[derive(Debug)]
pub struct TextureCache {
    inner: Mutex<CacheInner>,
    limit: usize,
}

impl TextureCache {
    /// Default maximum number of cached textures.
    pub const DEFAULT_LIMIT: usize = 256;

    /// Create a cache with the default limit.
    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    /// Create a cache holding at most `limit` textures. Loads past the limit
    /// are returned but not cached.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            limit,
        }
    }

    /// Return the cached texture for `path`, reading it from `source` on a miss.
    pub fn load(&self, source: &dyn AssetSource, path: &str) -> Result<Texture> {
        {
            let mut inner = self.inner.lock();
            if let Some(texture) = inner.entries.get(path).cloned() {
                inner.stats.hits += 1;
                trace!(target: "horizon_lattice_resources::texture", path, "cache hit");
                return Ok(texture);
            }
        }

        let bytes = source.read(path)?;
        let texture = Texture {
            path: path.to_string(),
            bytes: bytes.into(),
        };

        let mut inner = self.inner.lock();
        inner.stats.misses += 1;
        if inner.entries.len() < self.limit {
            inner.entries.insert(path.to_string(), texture.clone());
        }
        Ok(texture)
    }

    /// Drop every cached texture.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.stats.clears += 1;
    }

    /// Returns true if `path` is cached.
    pub fn contains(&self, path: &str) -> bool {
        self.inner.lock().entries.contains_key(path)
    }

    /// Number of cached textures.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}
