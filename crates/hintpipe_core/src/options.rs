//! Build options and report sinks.

use std::path::PathBuf;

/// A console-like object exposing a `log` method, usable as a report sink.
pub trait ConsoleLike: Send + Sync {
    fn log(&self, text: &str);
}

/// Custom per-message sink function (`logError`).
pub type LogCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Override for the test-generator escaping step.
pub type EscapeFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Where formatted report messages go.
///
/// One capability, selected at configuration time. The callback variant
/// receives plain text; the console variant receives color-annotated text.
pub enum Sink {
    /// The process logging surface. Default.
    Log,

    /// Custom function, invoked once per file message block.
    Callback(LogCallback),

    /// Console-like object; receives the combined report and the summary.
    Console(Box<dyn ConsoleLike>),
}

impl Default for Sink {
    fn default() -> Self {
        Self::Log
    }
}

/// Options recognized by the pipeline.
pub struct PipelineOptions {
    /// Concatenate all generated tests into this one output path.
    pub dest_file: Option<String>,

    /// Directory (relative to the tree root) anchoring `.jshintrc` and
    /// `.jshintignore` discovery. Defaults to the tree root.
    pub jshintrc_root: Option<PathBuf>,

    /// Explicit `.jshintrc` override, used instead of the directory walk.
    pub jshintrc_path: Option<PathBuf>,

    /// Enable the incremental result cache. When false every file is
    /// re-linted on every build.
    pub persist: bool,

    /// Turn any diagnostic into a fatal build failure.
    pub fail_on_any_error: bool,

    /// Skip test artifact generation entirely.
    pub disable_test_generator: bool,

    /// Global output switch; false suppresses all output through every sink.
    pub log: bool,

    /// Cross-file error ceiling; exceeding it collapses the report to a
    /// single "Too many errors." message.
    pub max_errors: usize,

    /// Report sink.
    pub sink: Sink,

    /// Override for escaping diagnostic text embedded in generated tests.
    pub escape_error_string: Option<EscapeFn>,

    /// File extensions considered lintable.
    pub extensions: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            dest_file: None,
            jshintrc_root: None,
            jshintrc_path: None,
            persist: true,
            fail_on_any_error: false,
            disable_test_generator: false,
            log: true,
            max_errors: 50,
            sink: Sink::default(),
            escape_error_string: None,
            extensions: vec!["js".to_string()],
        }
    }
}
