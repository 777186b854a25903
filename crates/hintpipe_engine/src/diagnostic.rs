//! Diagnostic types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One reported issue from a lint engine.
///
/// Lines and columns are 1-based. `raw` carries the engine's underlying
/// error record when one exists; the formatter only uses the rendered
/// `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line.
    pub line: u32,

    /// 1-based column.
    pub column: u32,

    /// Message text.
    pub message: String,

    /// Raw underlying error record, if the engine supplies one.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub raw: Value,
}

impl Diagnostic {
    /// Creates a diagnostic without a raw record.
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            raw: Value::Null,
        }
    }

    /// Creates a diagnostic carrying the engine's raw error record.
    pub fn with_raw(line: u32, column: u32, message: impl Into<String>, raw: Value) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            raw,
        }
    }
}
