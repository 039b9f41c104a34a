//! JSON lines rendering: one object per record.

use crate::ReportError;
use prooflog_core::RecordSet;
use std::io::Write;

pub fn write_json_lines<W: Write>(set: &RecordSet, mut out: W) -> Result<(), ReportError> {
    for record in set {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
