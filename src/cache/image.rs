use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::images::{ResizeParams, TransformedImage};

/// Identifies one transformation of one source image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(src: &str, params: &ResizeParams) -> Self {
        CacheKey(format!(
            "{}:{}:{}:{}",
            src, params.width, params.height, params.quality
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Transformed images kept in memory, least recently used evicted first
pub struct ImageCache {
    images: Mutex<LruCache<CacheKey, TransformedImage>>,
}

impl ImageCache {
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self {
            images: Mutex::new(LruCache::new(max_entries)),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<TransformedImage> {
        let mut images = self.images.lock();
        images.get(key).cloned()
    }

    pub fn set(&self, key: CacheKey, image: TransformedImage) {
        let mut images = self.images.lock();
        // push hands back either the overwritten entry or the evicted one
        if let Some((old, _)) = images.push(key, image) {
            if !images.contains(&old) {
                log::debug!("Evicted {} from image cache", old);
            }
        }
    }

    pub fn entry_count(&self) -> usize {
        self.images.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.images.lock().cap().get()
    }
}
