// ============================================================
// IMPORT REPORT TYPES
// ============================================================
// Result of ingesting one CSV document

use serde::{Deserialize, Serialize};

use super::inventory::InventoryRecord;

/// A rejected data line with its position and the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number; the header is line 1.
    #[serde(rename = "lineNumber")]
    pub line_number: usize,

    /// Raw line content, truncated for display.
    pub content: String,

    /// Human-readable rejection reason.
    pub reason: String,
}

/// Outcome of parsing one CSV document. Per-row problems never abort the
/// import; each rejected line is reported here instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Accepted records, in input order.
    pub items: Vec<InventoryRecord>,

    /// Line count of the document, header included. Newlines inside quoted
    /// fields do not start a new line.
    #[serde(rename = "totalLines")]
    pub total_lines: usize,

    /// Rejected data lines, in input order.
    #[serde(rename = "skippedLines")]
    pub skipped_lines: Vec<SkippedLine>,
}
