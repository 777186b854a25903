//! # hintpipe_engine
//!
//! The lint-engine boundary for hintpipe.
//!
//! The pipeline treats diagnostic generation as a black box: anything that
//! can turn `(source, config, globals)` into an ordered list of diagnostics
//! implements [`LintEngine`]. A closure adapter ([`FnEngine`]) and a small
//! reference engine ([`BasicEngine`]) are provided so the pipeline can be
//! exercised without an external engine.

mod basic;
mod diagnostic;

pub use basic::BasicEngine;
pub use diagnostic::Diagnostic;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised by a lint engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not process the source at all.
    #[error("Engine failure: {0}")]
    Failure(String),
}

impl EngineError {
    /// Creates an engine failure.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }
}

/// A lint engine: produces diagnostics for one source file.
///
/// `config` is the effective (cascaded) configuration for the file and
/// `globals` the merged `globals` mapping. Diagnostic order is significant
/// and is preserved verbatim by the pipeline.
pub trait LintEngine: Send + Sync {
    fn lint(
        &self,
        source: &str,
        config: &Map<String, Value>,
        globals: &Map<String, Value>,
    ) -> Result<Vec<Diagnostic>, EngineError>;
}

/// Adapts a plain function or closure into a [`LintEngine`].
pub struct FnEngine<F>(F);

impl<F> FnEngine<F>
where
    F: Fn(&str, &Map<String, Value>, &Map<String, Value>) -> Result<Vec<Diagnostic>, EngineError>
        + Send
        + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> LintEngine for FnEngine<F>
where
    F: Fn(&str, &Map<String, Value>, &Map<String, Value>) -> Result<Vec<Diagnostic>, EngineError>
        + Send
        + Sync,
{
    fn lint(
        &self,
        source: &str,
        config: &Map<String, Value>,
        globals: &Map<String, Value>,
    ) -> Result<Vec<Diagnostic>, EngineError> {
        (self.0)(source, config, globals)
    }
}
