//! Generated-test artifacts.
//!
//! Each linted file gets a companion QUnit test asserting "no errors", or
//! embedding the escaped diagnostic text as a failing assertion.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::options::EscapeFn;
use crate::report;
use crate::runner::FileOutcome;

/// Extension given to generated test files.
const LINT_EXTENSION: &str = "lint.js";

/// Escapes diagnostic text for a single-quoted JS string context.
pub fn escape_error_string(text: &str) -> String {
    text.replace('\n', "\\n").replace('\'', "\\'")
}

/// Renders one generated test block.
///
/// `errors` is the already-escaped diagnostic text for a dirty file, absent
/// for a clean one.
fn render_block(rel_path: &str, dirname: &str, passed: bool, errors: Option<&str>) -> String {
    let errors = match errors {
        Some(text) if !text.is_empty() => format!("\\n{}", text),
        _ => String::new(),
    };

    format!(
        "module('JSHint - {dirname}');\n\
         test('{rel_path} should pass jshint', function() {{ \n\
         \x20 ok({passed}, '{rel_path} should pass jshint.{errors}'); \n\
         }});\n"
    )
}

/// Derives the generated-test path for a source file: the extension is
/// replaced with `.lint.js`, the relative directory is preserved.
fn lint_path(rel_path: &str) -> PathBuf {
    Path::new(rel_path).with_extension(LINT_EXTENSION)
}

/// Generates test artifacts for one build.
pub struct TestGenerator<'a> {
    dest_file: Option<&'a str>,
    escape: Option<&'a EscapeFn>,
}

impl<'a> TestGenerator<'a> {
    pub fn new(dest_file: Option<&'a str>, escape: Option<&'a EscapeFn>) -> Self {
        Self { dest_file, escape }
    }

    /// Produces output path → content. Blocks are ordered by source path so
    /// the artifact set is stable across builds regardless of lint order.
    ///
    /// The escape override, when present, is invoked exactly once per dirty
    /// file with the raw formatted report text; its return value is embedded
    /// verbatim.
    pub fn generate(&self, outcomes: &[FileOutcome]) -> BTreeMap<PathBuf, String> {
        let mut sorted: Vec<&FileOutcome> = outcomes.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));

        let mut artifacts = BTreeMap::new();
        let mut concatenated = String::new();

        for outcome in sorted {
            let errors = report::format_outcome(outcome).map(|raw| match self.escape {
                Some(custom) => custom(&raw),
                None => escape_error_string(&raw),
            });

            let dirname = match outcome.path.rsplit_once('/') {
                Some((dir, _)) => dir,
                None => ".",
            };
            let block = render_block(
                &outcome.path,
                dirname,
                !outcome.has_errors(),
                errors.as_deref(),
            );

            match self.dest_file {
                Some(_) => concatenated.push_str(&block),
                None => {
                    artifacts.insert(lint_path(&outcome.path), block);
                }
            }
        }

        if let Some(dest) = self.dest_file {
            artifacts.insert(PathBuf::from(dest), concatenated);
        }

        artifacts
    }
}
