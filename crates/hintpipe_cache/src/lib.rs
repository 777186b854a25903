//! # hintpipe_cache
//!
//! Incremental result cache for hintpipe.
//!
//! The cache is keyed by relative file path; a hit requires exact equality
//! of both the content fingerprint and the effective-config fingerprint.
//! It lives for the process lifetime only and is never written to disk.

mod entry;
mod store;

pub use entry::CacheEntry;
pub use store::ResultCache;
