//! A small reference lint engine.
//!
//! `BasicEngine` implements just enough of a JavaScript style checker to
//! exercise the pipeline end to end: a line-based missing-semicolon check
//! (suppressed by the `asi` option) and an opt-in `eqeqeq` check. Real
//! deployments plug in their own [`LintEngine`](crate::LintEngine).

use serde_json::{Map, Value};

use crate::{Diagnostic, EngineError, LintEngine};

/// Characters that terminate or continue a statement; a line ending in one
/// of these never needs a semicolon.
const NO_SEMICOLON_NEEDED: &[char] = &[
    ';', '{', '}', ':', ',', '(', '[', '+', '-', '*', '/', '%', '&', '|', '=', '<', '>', '?', '.',
    '!',
];

/// Line-based reference engine.
#[derive(Debug, Default)]
pub struct BasicEngine;

impl BasicEngine {
    pub fn new() -> Self {
        Self
    }

    fn wants(config: &Map<String, Value>, key: &str) -> bool {
        config.get(key).and_then(Value::as_bool) == Some(true)
    }

    fn check_semicolon(line_no: u32, line: &str, out: &mut Vec<Diagnostic>) {
        let trimmed = line.trim_end();
        if trimmed.trim_start().is_empty() || trimmed.trim_start().starts_with("//") {
            return;
        }
        let Some(last) = trimmed.chars().last() else {
            return;
        };
        if !NO_SEMICOLON_NEEDED.contains(&last) {
            let column = trimmed.chars().count() as u32 + 1;
            out.push(Diagnostic::with_raw(
                line_no,
                column,
                "Missing semicolon.",
                serde_json::json!({ "code": "W033" }),
            ));
        }
    }

    fn check_eqeqeq(line_no: u32, line: &str, out: &mut Vec<Diagnostic>) {
        let bytes = line.as_bytes();
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == b'=' && bytes[i + 1] == b'=' {
                let strict = i + 2 < bytes.len() && bytes[i + 2] == b'=';
                let negated = i > 0 && bytes[i - 1] == b'!';
                if !strict && !negated {
                    out.push(Diagnostic::with_raw(
                        line_no,
                        i as u32 + 1,
                        "Expected '===' and instead saw '=='.",
                        serde_json::json!({ "code": "W116" }),
                    ));
                }
                i += if strict { 3 } else { 2 };
            } else {
                i += 1;
            }
        }
    }
}

impl LintEngine for BasicEngine {
    fn lint(
        &self,
        source: &str,
        config: &Map<String, Value>,
        _globals: &Map<String, Value>,
    ) -> Result<Vec<Diagnostic>, EngineError> {
        let check_semi = !Self::wants(config, "asi");
        let check_eq = Self::wants(config, "eqeqeq");

        let mut diagnostics = Vec::new();
        let mut in_block_comment = false;

        for (idx, line) in source.lines().enumerate() {
            let line_no = idx as u32 + 1;

            if in_block_comment {
                if line.contains("*/") {
                    in_block_comment = false;
                }
                continue;
            }
            if line.trim_start().starts_with("/*") && !line.contains("*/") {
                in_block_comment = true;
                continue;
            }

            if check_semi {
                Self::check_semicolon(line_no, line, &mut diagnostics);
            }
            if check_eq {
                Self::check_eqeqeq(line_no, line, &mut diagnostics);
            }
        }

        Ok(diagnostics)
    }
}
