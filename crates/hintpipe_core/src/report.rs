//! Report formatting and sink dispatch.

use colored::Colorize;
use tracing::error;

use crate::options::Sink;
use crate::runner::FileOutcome;

/// Message that replaces the whole report once the error ceiling trips.
pub const TOO_MANY_ERRORS: &str = "Too many errors.";

/// Renders one file's message block, or `None` for a clean file.
///
/// Shape: one `"<path>: line <L>, col <C>, <message>"` line per diagnostic,
/// a blank line, then the error count.
pub fn format_outcome(outcome: &FileOutcome) -> Option<String> {
    if outcome.diagnostics.is_empty() {
        return None;
    }

    let lines: Vec<String> = outcome
        .diagnostics
        .iter()
        .map(|d| {
            format!(
                "{}: line {}, col {}, {}",
                outcome.path, d.line, d.column, d.message
            )
        })
        .collect();

    let n = outcome.diagnostics.len();
    Some(format!(
        "{}\n\n{} error{}",
        lines.join("\n"),
        n,
        if n == 1 { "" } else { "s" }
    ))
}

/// Renders the build summary line.
pub fn format_summary(total: usize) -> String {
    format!("===== {} JSHint Errors\n", total)
}

/// Dispatches formatted messages to the configured sink.
///
/// The callback sink receives plain text, one call per file block; the
/// console sink receives one combined color-annotated message plus the
/// colored summary. Sink panics propagate; nothing is suppressed here.
pub struct Reporter<'a> {
    sink: &'a Sink,
    log: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a Sink, log: bool) -> Self {
        Self { sink, log }
    }

    /// Emits the report for one build.
    ///
    /// `too_many` collapses the whole report into the single
    /// "Too many errors." message, bounding output on pathological inputs.
    pub fn emit(&self, outcomes: &[FileOutcome], total: usize, too_many: bool) {
        if !self.log {
            return;
        }

        let messages: Vec<String> = if too_many {
            vec![TOO_MANY_ERRORS.to_string()]
        } else {
            outcomes.iter().filter_map(format_outcome).collect()
        };

        match self.sink {
            Sink::Callback(callback) => {
                for message in &messages {
                    callback(message);
                }
                if total > 0 {
                    error!("{}", format_summary(total));
                }
            }
            Sink::Console(console) => {
                if !messages.is_empty() {
                    let blocks: Vec<String> =
                        messages.iter().map(|m| m.red().to_string()).collect();
                    console.log(&format!("\n{}\n", blocks.join("\n\n")));
                }
                if total > 0 {
                    console.log(&format_summary(total).yellow().to_string());
                }
            }
            Sink::Log => {
                for message in &messages {
                    error!("{}", message);
                }
                if total > 0 {
                    error!("{}", format_summary(total));
                }
            }
        }
    }
}
