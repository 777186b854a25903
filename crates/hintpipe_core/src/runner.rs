//! Lint runner: drives the engine per file and tracks the global error count.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use hintpipe_engine::{Diagnostic, LintEngine};

use crate::resolver::EffectiveConfig;
use crate::snapshot::SourceFile;
use crate::PipelineError;

/// Per-file lint classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintStatus {
    Clean,
    HasErrors,
}

/// Result of linting one file. Immutable once produced.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Path relative to the tree root.
    pub path: String,

    /// Diagnostics in engine emission order.
    pub diagnostics: Vec<Diagnostic>,

    /// Whether the result was served from the cache.
    pub from_cache: bool,
}

impl FileOutcome {
    /// Creates a fresh outcome.
    pub fn new(path: String, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path,
            diagnostics,
            from_cache: false,
        }
    }

    /// Creates an outcome served from the cache.
    pub fn cached(path: String, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path,
            diagnostics,
            from_cache: true,
        }
    }

    /// Clean iff there are zero diagnostics; any diagnostic count means
    /// errors (the count only matters for the global ceiling).
    pub fn status(&self) -> LintStatus {
        if self.diagnostics.is_empty() {
            LintStatus::Clean
        } else {
            LintStatus::HasErrors
        }
    }

    pub fn has_errors(&self) -> bool {
        self.status() == LintStatus::HasErrors
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Cross-file running error counter for one build.
///
/// Updated from parallel lint tasks; reads are only meaningful after all
/// tasks complete.
#[derive(Debug, Default)]
pub struct ErrorCounter(AtomicUsize);

impl ErrorCounter {
    pub fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    pub fn add(&self, n: usize) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn total(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    /// Whether the ceiling has been exceeded.
    pub fn exceeds(&self, ceiling: usize) -> bool {
        self.total() > ceiling
    }
}

/// Invokes the lint engine per eligible file.
pub struct LintRunner<'a> {
    engine: &'a dyn LintEngine,
    counter: &'a ErrorCounter,
}

impl<'a> LintRunner<'a> {
    pub fn new(engine: &'a dyn LintEngine, counter: &'a ErrorCounter) -> Self {
        Self { engine, counter }
    }

    /// Lints one file with its effective config. The engine's diagnostic
    /// order is preserved verbatim.
    pub fn run(
        &self,
        file: &SourceFile,
        config: &EffectiveConfig,
    ) -> Result<FileOutcome, PipelineError> {
        debug!("linting {}", file.rel);
        let diagnostics = self
            .engine
            .lint(&file.content, &config.options, &config.globals)?;

        self.counter.add(diagnostics.len());
        Ok(FileOutcome::new(file.rel.clone(), diagnostics))
    }

    /// Records an already-counted result served from the cache.
    pub fn record_cached(&self, path: String, diagnostics: Vec<Diagnostic>) -> FileOutcome {
        self.counter.add(diagnostics.len());
        FileOutcome::cached(path, diagnostics)
    }
}
