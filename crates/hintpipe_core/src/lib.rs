//! # hintpipe_core
//!
//! Incremental JSHint build stage for tree-based pipelines.
//!
//! This crate provides:
//! - The `Pipeline` orchestrator (snapshot, lint, report, artifacts)
//! - `.jshintrc` cascade and `.jshintignore` resolution
//! - An incremental result cache keyed on content and config fingerprints
//! - QUnit test artifact generation
//!
//! ## Example
//!
//! ```rust,ignore
//! use hintpipe_core::{Pipeline, PipelineOptions};
//! use hintpipe_engine::BasicEngine;
//!
//! let pipeline = Pipeline::new(Box::new(BasicEngine::new()), PipelineOptions::default());
//! let outcome = pipeline.build("src".as_ref(), "dist".as_ref())?;
//! println!("{} files checked, {} errors", outcome.files_checked, outcome.total_errors);
//! ```

mod error;
mod options;
mod pipeline;
pub mod report;
pub mod resolver;
mod runner;
pub mod snapshot;
pub mod testgen;

pub use error::PipelineError;
pub use options::{ConsoleLike, EscapeFn, LogCallback, PipelineOptions, Sink};
pub use pipeline::{BuildOutcome, Pipeline};
pub use report::{TOO_MANY_ERRORS, format_outcome, format_summary};
pub use resolver::{ConfigResolver, EffectiveConfig, ResolvedConfig};
pub use runner::{ErrorCounter, FileOutcome, LintRunner, LintStatus};
pub use snapshot::SourceFile;
pub use testgen::{TestGenerator, escape_error_string};

pub use hintpipe_cache::{CacheEntry, ResultCache};
pub use hintpipe_engine::{BasicEngine, Diagnostic, EngineError, FnEngine, LintEngine};
