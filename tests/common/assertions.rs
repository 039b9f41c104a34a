//! Domain-specific assertion macros for prooflog harnesses.
//!
//! These add context-rich failure messages that make it clear which record
//! and which field broke.

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a record has a field with the expected value.
///
/// ```rust
/// assert_field!(record, Field::CpuCycles, Value::Int(1200));
/// ```
#[macro_export]
macro_rules! assert_field {
    ($record:expr, $field:expr, $value:expr) => {{
        let record = &$record;
        let record: &prooflog_core::TransactionRecord = record;
        let field: prooflog_core::Field = $field;
        let expected: prooflog_core::Value = $value;
        match record.get(field) {
            Some(actual) if actual == expected => {}
            Some(actual) => panic!(
                "assert_field! failed:\n  transaction {} field {}\n  expected: {:?}\n  actual:   {:?}",
                record.transaction, field, expected, actual
            ),
            None => panic!(
                "assert_field! failed: field {} missing on transaction {}.\n  Present: {:?}",
                field,
                record.transaction,
                record.fields.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a record does NOT carry a field (absent, not zero).
#[macro_export]
macro_rules! assert_field_absent {
    ($record:expr, $field:expr) => {{
        let record = &$record;
        let record: &prooflog_core::TransactionRecord = record;
        let field: prooflog_core::Field = $field;
        if let Some(actual) = record.get(field) {
            panic!(
                "assert_field_absent! failed: transaction {} has {} = {:?}",
                record.transaction, field, actual
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Record set assertions
// ---------------------------------------------------------------------------

/// Fetch a record by transaction or panic with the indices that exist.
#[macro_export]
macro_rules! record {
    ($set:expr, $tx:expr) => {{
        let set: &prooflog_core::RecordSet = &$set;
        let tx: u64 = $tx;
        set.get(tx).unwrap_or_else(|| {
            panic!(
                "record! failed: no transaction {} in set.\n  Present: {:?}",
                tx,
                set.iter().map(|r| r.transaction).collect::<Vec<_>>()
            )
        })
    }};
}
