//! Tree snapshot: materializes the input directory into source files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use hintpipe_cache::ResultCache;

use crate::PipelineError;

/// One source file from the input tree.
///
/// Identity is the path relative to the tree root (forward slashes).
/// Content is read once per build and never mutated.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the tree root.
    pub rel: String,

    /// Raw content.
    pub content: String,

    /// BLAKE3 content fingerprint.
    pub fingerprint: String,
}

impl SourceFile {
    /// The directory portion of the relative path ("." at the top level).
    pub fn dirname(&self) -> &str {
        match self.rel.rsplit_once('/') {
            Some((dir, _)) => dir,
            None => ".",
        }
    }
}

fn normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Collects lintable files under `root`, sorted by relative path.
pub fn collect(root: &Path, extensions: &[String]) -> Result<Vec<SourceFile>, PipelineError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !extensions.iter().any(|e| e == ext) {
            continue;
        }

        let rel: PathBuf = path
            .strip_prefix(root)
            .map_err(|_| PipelineError::file(format!("{} escapes the tree root", path.display())))?
            .to_path_buf();

        let content = fs::read_to_string(path)
            .map_err(|e| PipelineError::file(format!("Failed to read {}: {}", path.display(), e)))?;
        let fingerprint = ResultCache::hash_content(&content);

        files.push(SourceFile {
            rel: normalize(&rel),
            content,
            fingerprint,
        });
    }

    files.sort_by(|a, b| a.rel.cmp(&b.rel));

    info!("snapshot: {} lintable files under {}", files.len(), root.display());
    Ok(files)
}
