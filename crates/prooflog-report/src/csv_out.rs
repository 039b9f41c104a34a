//! CSV rendering for record sets and comparison tables.

use crate::{cell, ReportError};
use prooflog_core::compare::ComparisonTable;
use prooflog_core::RecordSet;
use std::io::Write;

/// Header row of a comparison CSV: `transaction`, shared fields, one
/// `{metric}_{label}` column per input per metric, then the deltas.
pub fn comparison_header(table: &ComparisonTable) -> Vec<String> {
    let mut header = vec!["transaction".to_string()];
    header.extend(table.shared.iter().map(|f| f.name().to_string()));
    for metric in &table.metrics {
        header.extend(table.labels.iter().map(|label| format!("{metric}_{label}")));
    }
    header.extend(table.deltas.iter().map(|d| d.column_name()));
    header
}

pub fn write_comparison<W: Write>(table: &ComparisonTable, out: W) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(comparison_header(table))?;

    for row in &table.rows {
        let mut record = vec![row.transaction.to_string()];
        record.extend(row.shared.iter().copied().map(cell));
        for per_input in &row.values {
            record.extend(per_input.iter().copied().map(cell));
        }
        record.extend(row.deltas.iter().copied().map(cell));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    tracing::debug!(rows = table.rows.len(), "comparison csv written");
    Ok(())
}

/// One row per record with every field that occurs anywhere in the set.
pub fn write_records<W: Write>(set: &RecordSet, out: W) -> Result<(), ReportError> {
    let fields = set.fields_present();
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["transaction"];
    header.extend(fields.iter().map(|f| f.name()));
    writer.write_record(&header)?;

    for record in set {
        let mut row = vec![record.transaction.to_string()];
        row.extend(fields.iter().map(|f| cell(record.get(*f))));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
