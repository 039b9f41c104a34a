//! prooflog-report: renderers for parsed records and comparison tables.
//!
//! CSV output goes through the `csv` crate, JSON lines through `serde_json`,
//! and the human-readable summaries are plain formatted text.

pub mod csv_out;
pub mod json;
pub mod summary;

pub use csv_out::{write_comparison, write_records};
pub use json::write_json_lines;
pub use summary::{render_summary, render_top};

use prooflog_core::Value;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv output failed")]
    Csv(#[from] csv::Error),
    #[error("json output failed")]
    Json(#[from] serde_json::Error),
    #[error("write failed")]
    Io(#[from] std::io::Error),
}

/// A table cell: the value, or empty when absent.
pub(crate) fn cell(value: Option<Value>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
