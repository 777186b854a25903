//! Build orchestration.
//!
//! One `build` call takes an input tree snapshot and produces a report plus
//! generated test artifacts in the destination directory. The result cache
//! lives on the `Pipeline` value, so repeated builds within one process are
//! incremental.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::{debug, info};

use hintpipe_cache::{CacheEntry, ResultCache};
use hintpipe_engine::LintEngine;

use crate::report::Reporter;
use crate::resolver::ConfigResolver;
use crate::runner::{ErrorCounter, FileOutcome, LintRunner};
use crate::snapshot;
use crate::testgen::TestGenerator;
use crate::{PipelineError, PipelineOptions};

/// Aggregate result of one completed build.
#[derive(Debug, Clone, Copy)]
pub struct BuildOutcome {
    /// Files linted or served from cache (ignored files excluded).
    pub files_checked: usize,

    /// Files whose result came from the cache.
    pub files_from_cache: usize,

    /// Total diagnostic count across the build.
    pub total_errors: usize,

    /// Whether the cross-file error ceiling tripped.
    pub too_many_errors: bool,

    /// Generated test files written to the destination.
    pub artifacts_written: usize,
}

/// The lint stage: composes resolution, caching, linting, reporting and
/// artifact generation per build invocation.
pub struct Pipeline {
    engine: Box<dyn LintEngine>,
    options: PipelineOptions,
    cache: Mutex<ResultCache>,
}

impl Pipeline {
    pub fn new(engine: Box<dyn LintEngine>, options: PipelineOptions) -> Self {
        let mut cache = ResultCache::new();
        if !options.persist {
            cache.disable();
        }

        Self {
            engine,
            options,
            cache: Mutex::new(cache),
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs one build: lints every eligible file under `input_dir`, emits
    /// the report, and writes generated tests under `output_dir`.
    ///
    /// Fails fatally (nothing committed to `output_dir`) on configuration
    /// errors, or when `fail_on_any_error` is set and any diagnostic exists.
    pub fn build(&self, input_dir: &Path, output_dir: &Path) -> Result<BuildOutcome, PipelineError> {
        let resolved = ConfigResolver::resolve(input_dir, &self.options)?;
        let files = snapshot::collect(input_dir, &self.options.extensions)?;

        // Ignored files are dropped entirely: not linted, cached, reported,
        // or given an artifact.
        let eligible: Vec<_> = files
            .into_iter()
            .filter(|file| {
                let ignored = resolved.is_ignored(&file.rel);
                if ignored {
                    debug!("ignoring {}", file.rel);
                }
                !ignored
            })
            .collect();

        // Effective configs are resolved up front; the resolver memoizes
        // per directory. A malformed config aborts here.
        let mut jobs = Vec::with_capacity(eligible.len());
        for file in &eligible {
            let config = resolved.config_for(&file.rel)?;
            jobs.push((file, config));
        }

        let counter = ErrorCounter::new();
        let runner = LintRunner::new(self.engine.as_ref(), &counter);

        let lint_results: Vec<Result<(FileOutcome, Option<CacheEntry>), PipelineError>> = jobs
            .par_iter()
            .map(|(file, config)| {
                let hit = {
                    let cache = self.cache.lock().map_err(|_| {
                        PipelineError::Internal("Cache mutex poisoned".to_string())
                    })?;
                    cache
                        .get(&file.rel, &file.fingerprint, &config.fingerprint)
                        .map(|entry| entry.diagnostics.clone())
                };

                match hit {
                    Some(diagnostics) => {
                        Ok((runner.record_cached(file.rel.clone(), diagnostics), None))
                    }
                    None => {
                        let outcome = runner.run(file, config)?;
                        // Entries are committed only after the lint
                        // completes; an aborted build leaves no partial
                        // state behind.
                        let entry = CacheEntry::new(
                            file.fingerprint.clone(),
                            config.fingerprint.clone(),
                            outcome.diagnostics.clone(),
                        );
                        Ok((outcome, Some(entry)))
                    }
                }
            })
            .collect();

        let mut outcomes = Vec::with_capacity(lint_results.len());
        {
            let mut cache = self
                .cache
                .lock()
                .map_err(|_| PipelineError::Internal("Cache mutex poisoned".to_string()))?;
            for result in lint_results {
                let (outcome, entry) = result?;
                if let Some(entry) = entry {
                    cache.set(outcome.path.clone(), entry);
                }
                outcomes.push(outcome);
            }
        }

        // Wall-clock completion order is not a correctness signal; re-sort
        // to the canonical path order.
        outcomes.sort_by(|a, b| a.path.cmp(&b.path));

        let total_errors = counter.total();
        let too_many_errors = counter.exceeds(self.options.max_errors);

        Reporter::new(&self.options.sink, self.options.log).emit(
            &outcomes,
            total_errors,
            too_many_errors,
        );

        if self.options.fail_on_any_error && total_errors > 0 {
            return Err(PipelineError::Failed(total_errors));
        }

        let mut artifacts_written = 0;
        if !self.options.disable_test_generator {
            let generator = TestGenerator::new(
                self.options.dest_file.as_deref(),
                self.options.escape_error_string.as_ref(),
            );
            for (rel, content) in generator.generate(&outcomes) {
                let target = output_dir.join(&rel);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, content)?;
                artifacts_written += 1;
            }
        }

        let files_from_cache = outcomes.iter().filter(|o| o.from_cache).count();
        info!(
            "build complete: {} files ({} from cache), {} errors",
            outcomes.len(),
            files_from_cache,
            total_errors
        );

        Ok(BuildOutcome {
            files_checked: outcomes.len(),
            files_from_cache,
            total_errors,
            too_many_errors,
            artifacts_written,
        })
    }
}
