//! Test builders: ergonomic constructors for records and record sets.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use prooflog_core::{Field, RecordSet, TransactionRecord, Value};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`TransactionRecord`] fixtures.
///
/// ```rust
/// let record = RecordBuilder::new(3)
///     .int(Field::CpuCycles, 1200)
///     .float(Field::ProvingTime, 0.52)
///     .build();
/// ```
pub struct RecordBuilder {
    record: TransactionRecord,
}

impl RecordBuilder {
    pub fn new(transaction: u64) -> Self {
        Self {
            record: TransactionRecord::new(transaction),
        }
    }

    pub fn int(mut self, field: Field, value: i64) -> Self {
        self.record.set(field, Value::Int(value));
        self
    }

    pub fn float(mut self, field: Field, value: f64) -> Self {
        self.record.set(field, Value::Float(value));
        self
    }

    pub fn build(self) -> TransactionRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A record set holding only proving times.
pub fn proving_times(rows: &[(u64, f64)]) -> RecordSet {
    rows.iter()
        .map(|(tx, t)| RecordBuilder::new(*tx).float(Field::ProvingTime, *t).build())
        .collect()
}

/// Transaction indices of a record set, in order.
pub fn transactions(set: &RecordSet) -> Vec<u64> {
    set.iter().map(|r| r.transaction).collect()
}
