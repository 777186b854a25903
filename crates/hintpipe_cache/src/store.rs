//! In-memory result cache.

use std::collections::HashMap;

use tracing::debug;

use crate::CacheEntry;

/// Manages cached lint results for all files in a build session.
///
/// Entries are keyed by relative path. There is no eviction beyond path
/// replacement; the cache is bounded by the number of distinct paths seen.
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    enabled: bool,
}

impl ResultCache {
    /// Creates a new, enabled cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            enabled: true,
        }
    }

    /// Disables caching: every lookup misses and nothing is stored.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Returns whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Computes the BLAKE3 fingerprint of content.
    pub fn hash_content(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Gets a cached entry when both fingerprints match exactly.
    pub fn get(&self, path: &str, content_hash: &str, config_hash: &str) -> Option<&CacheEntry> {
        if !self.enabled {
            return None;
        }
        match self.entries.get(path) {
            Some(entry) if entry.is_valid(content_hash, config_hash) => {
                debug!("cache hit for {}", path);
                Some(entry)
            }
            _ => None,
        }
    }

    /// Stores an entry, replacing any previous one for the path.
    pub fn set(&mut self, path: impl Into<String>, entry: CacheEntry) {
        if self.enabled {
            self.entries.insert(path.into(), entry);
        }
    }

    /// Removes an entry.
    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
