//! Cache entry types.

use hintpipe_engine::Diagnostic;
use serde::{Deserialize, Serialize};

/// A cache entry for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Fingerprint of the file content.
    pub content_hash: String,

    /// Fingerprint of the effective (cascaded) configuration.
    pub config_hash: String,

    /// Cached diagnostics, in engine emission order.
    pub diagnostics: Vec<Diagnostic>,
}

impl CacheEntry {
    /// Creates a new cache entry.
    pub fn new(
        content_hash: String,
        config_hash: String,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            content_hash,
            config_hash,
            diagnostics,
        }
    }

    /// Checks if this entry is valid for the given fingerprints.
    ///
    /// A hit requires exact equality of both; any difference is a miss.
    pub fn is_valid(&self, content_hash: &str, config_hash: &str) -> bool {
        self.content_hash == content_hash && self.config_hash == config_hash
    }
}
