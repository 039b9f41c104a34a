//! Human-readable summaries printed to stdout.

use crate::cell;
use prooflog_core::stats::Summary;
use prooflog_core::{Field, TransactionRecord};
use std::fmt::Write;

fn fixed(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

/// Means with `precision` decimals; ratios as percentages with two.
pub fn render_summary(summary: &Summary, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rows compared: {}", summary.rows);
    for (column, mean) in &summary.delta_means {
        let _ = writeln!(out, "Mean {column}: {}", fixed(*mean, precision));
    }
    for (column, mean) in &summary.metric_means {
        let _ = writeln!(out, "Mean {column}: {}", fixed(*mean, precision));
    }
    for (caption, percent) in &summary.ratios {
        let shown = percent.map_or_else(|| "n/a".to_string(), |p| format!("{p:.2}%"));
        let _ = writeln!(out, "{caption}: {shown}");
    }
    out
}

/// A two-column table of the highest values of `field`.
pub fn render_top(field: Field, records: &[&TransactionRecord]) -> String {
    const TX: &str = "transaction";
    let values: Vec<String> = records.iter().map(|r| cell(r.get(field))).collect();
    let width = values
        .iter()
        .map(String::len)
        .chain([field.name().len()])
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "Top {} transactions by {field}:", records.len());
    let _ = writeln!(out, "{TX:>11}  {:>width$}", field.name());
    for (record, value) in records.iter().zip(&values) {
        let _ = writeln!(out, "{:>11}  {value:>width$}", record.transaction);
    }
    out
}
