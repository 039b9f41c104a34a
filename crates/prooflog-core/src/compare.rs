//! Comparison layer: joins labelled [`RecordSet`]s on `transaction` and
//! derives per-row deltas.

use crate::types::{Field, RecordSet, TransactionRecord, Value};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Which transactions make it into a [`ComparisonTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// Transactions present in every input.
    #[default]
    Inner,
    /// Every transaction of the first input.
    Left,
    /// Transactions present in any input.
    Outer,
}

impl JoinPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinPolicy::Inner => "inner",
            JoinPolicy::Left => "left",
            JoinPolicy::Outer => "outer",
        }
    }
}

impl std::fmt::Display for JoinPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JoinPolicy {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inner" => Ok(JoinPolicy::Inner),
            "left" => Ok(JoinPolicy::Left),
            "outer" => Ok(JoinPolicy::Outer),
            other => Err(CompareError::UnknownJoin(other.to_string())),
        }
    }
}

/// `to - from` for one metric, computed per row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Delta {
    pub metric: Field,
    pub from: String,
    pub to: String,
    /// Output column name; defaults to `{metric}_diff`.
    #[serde(default)]
    pub column: Option<String>,
}

impl Delta {
    pub fn new(metric: Field, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            metric,
            from: from.into(),
            to: to.into(),
            column: None,
        }
    }

    pub fn named(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn column_name(&self) -> String {
        self.column
            .clone()
            .unwrap_or_else(|| format!("{}_diff", self.metric))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("a comparison needs at least one input")]
    NoInputs,
    #[error("input label {0:?} is used more than once")]
    DuplicateLabel(String),
    #[error("{context} refers to unknown input {label:?}")]
    UnknownLabel { context: String, label: String },
    #[error("{context} refers to {field}, which is not a metric of this comparison")]
    UnknownMetric { context: String, field: Field },
    #[error("{context} refers to unknown delta column {column:?}")]
    UnknownDelta { context: String, column: String },
    #[error("unknown join policy {0:?}; expected inner, left or outer")]
    UnknownJoin(String),
}

// ---------------------------------------------------------------------------
// Comparison builder
// ---------------------------------------------------------------------------

/// A pending join of labelled record sets.
///
/// ```
/// use prooflog_core::compare::{Comparison, Delta, JoinPolicy};
/// use prooflog_core::{Field, RecordSet};
///
/// let table = Comparison::new(JoinPolicy::Inner)
///     .input("keccak", RecordSet::new())
///     .input("poseidon", RecordSet::new())
///     .metric(Field::ProvingTime)
///     .delta(Delta::new(Field::ProvingTime, "poseidon", "keccak"))
///     .run()
///     .unwrap();
/// assert!(table.rows.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    join: JoinPolicy,
    inputs: Vec<(String, RecordSet)>,
    shared: Vec<Field>,
    metrics: Vec<Field>,
    deltas: Vec<Delta>,
    require: Vec<Field>,
}

impl Comparison {
    pub fn new(join: JoinPolicy) -> Self {
        Self {
            join,
            ..Self::default()
        }
    }

    pub fn join(mut self, join: JoinPolicy) -> Self {
        self.join = join;
        self
    }

    pub fn input(mut self, label: impl Into<String>, set: RecordSet) -> Self {
        self.inputs.push((label.into(), set));
        self
    }

    /// Fields that are identical across inputs and reported once per row,
    /// taken from the first input that has the transaction.
    pub fn shared(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.shared.extend(fields);
        self
    }

    /// A field reported once per input.
    pub fn metric(mut self, field: Field) -> Self {
        self.metrics.push(field);
        self
    }

    pub fn metrics(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.metrics.extend(fields);
        self
    }

    pub fn delta(mut self, delta: Delta) -> Self {
        self.deltas.push(delta);
        self
    }

    pub fn deltas(mut self, deltas: impl IntoIterator<Item = Delta>) -> Self {
        self.deltas.extend(deltas);
        self
    }

    /// Drop rows where any input lacks `field`.
    pub fn require(mut self, field: Field) -> Self {
        self.require.push(field);
        self
    }

    pub fn requires(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.require.extend(fields);
        self
    }

    fn label_index(&self, label: &str, context: impl FnOnce() -> String) -> Result<usize, CompareError> {
        self.inputs
            .iter()
            .position(|(l, _)| l == label)
            .ok_or_else(|| CompareError::UnknownLabel {
                context: context(),
                label: label.to_string(),
            })
    }

    fn validate(&self) -> Result<Vec<(usize, usize)>, CompareError> {
        if self.inputs.is_empty() {
            return Err(CompareError::NoInputs);
        }
        let mut seen = BTreeSet::new();
        for (label, _) in &self.inputs {
            if !seen.insert(label.as_str()) {
                return Err(CompareError::DuplicateLabel(label.clone()));
            }
        }
        self.deltas
            .iter()
            .map(|d| {
                let ctx = || format!("delta {:?}", d.column_name());
                Ok((self.label_index(&d.from, ctx)?, self.label_index(&d.to, ctx)?))
            })
            .collect()
    }

    fn keys(&self) -> BTreeSet<u64> {
        let key_set = |set: &RecordSet| set.iter().map(|r| r.transaction).collect::<BTreeSet<_>>();
        let mut sets = self.inputs.iter().map(|(_, s)| key_set(s));
        let first = sets.next().unwrap_or_default();
        match self.join {
            JoinPolicy::Left => first,
            JoinPolicy::Inner => sets.fold(first, |acc, s| &acc & &s),
            JoinPolicy::Outer => sets.fold(first, |acc, s| &acc | &s),
        }
    }

    /// Join the inputs. Rows are sorted by ascending transaction.
    pub fn run(&self) -> Result<ComparisonTable, CompareError> {
        let delta_inputs = self.validate()?;
        let mut rows = Vec::new();

        for tx in self.keys() {
            let records: Vec<Option<&TransactionRecord>> =
                self.inputs.iter().map(|(_, s)| s.get(tx)).collect();

            let missing_required = self.require.iter().any(|f| {
                records
                    .iter()
                    .any(|r| r.and_then(|r| r.get(*f)).is_none())
            });
            if missing_required {
                tracing::debug!(transaction = tx, "row dropped: required field missing");
                continue;
            }

            let shared = self
                .shared
                .iter()
                .map(|f| records.iter().flatten().next().and_then(|r| r.get(*f)))
                .collect();
            let values = self
                .metrics
                .iter()
                .map(|f| records.iter().map(|r| r.and_then(|r| r.get(*f))).collect())
                .collect();
            let deltas = self
                .deltas
                .iter()
                .zip(&delta_inputs)
                .map(|(d, (from, to))| {
                    let to = records[*to]?.get(d.metric)?;
                    let from = records[*from]?.get(d.metric)?;
                    to.checked_sub(from)
                })
                .collect();

            rows.push(ComparisonRow {
                transaction: tx,
                shared,
                values,
                deltas,
            });
        }

        tracing::info!(join = %self.join, rows = rows.len(), "comparison joined");
        Ok(ComparisonTable {
            labels: self.inputs.iter().map(|(l, _)| l.clone()).collect(),
            shared: self.shared.clone(),
            metrics: self.metrics.clone(),
            deltas: self.deltas.clone(),
            rows,
        })
    }
}

// ---------------------------------------------------------------------------
// Result table
// ---------------------------------------------------------------------------

/// One joined transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub transaction: u64,
    /// Parallel to [`ComparisonTable::shared`].
    pub shared: Vec<Option<Value>>,
    /// `values[metric][input]`, parallel to [`ComparisonTable::metrics`] and
    /// [`ComparisonTable::labels`].
    pub values: Vec<Vec<Option<Value>>>,
    /// Parallel to [`ComparisonTable::deltas`]; absent when either side is
    /// missing.
    pub deltas: Vec<Option<Value>>,
}

/// The result of [`Comparison::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub labels: Vec<String>,
    pub shared: Vec<Field>,
    pub metrics: Vec<Field>,
    pub deltas: Vec<Delta>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn metric_index(&self, field: Field) -> Option<usize> {
        self.metrics.iter().position(|f| *f == field)
    }

    pub fn delta_index(&self, column: &str) -> Option<usize> {
        self.deltas.iter().position(|d| d.column_name() == column)
    }

    /// Column values of one metric for one input, row by row.
    pub fn metric_column(
        &self,
        label: &str,
        field: Field,
    ) -> impl Iterator<Item = Option<Value>> + '_ {
        let coords = self.label_index(label).zip(self.metric_index(field));
        self.rows
            .iter()
            .filter_map(move |row| coords.map(|(input, metric)| row.values[metric][input]))
    }

    pub fn delta_column(&self, index: usize) -> impl Iterator<Item = Option<Value>> + '_ {
        self.rows.iter().map(move |row| row.deltas[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(rows: &[(u64, f64)]) -> RecordSet {
        rows.iter()
            .map(|(tx, t)| TransactionRecord::new(*tx).with(Field::ProvingTime, Value::Float(*t)))
            .collect()
    }

    fn example(join: JoinPolicy) -> ComparisonTable {
        Comparison::new(join)
            .input("a", set(&[(1, 1.0)]))
            .input("b", set(&[(1, 1.5), (2, 2.0)]))
            .metric(Field::ProvingTime)
            .delta(Delta::new(Field::ProvingTime, "a", "b"))
            .run()
            .unwrap()
    }

    #[test]
    fn inner_join_keeps_common_rows() {
        let table = example(JoinPolicy::Inner);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].transaction, 1);
        assert_eq!(table.rows[0].deltas, vec![Some(Value::Float(0.5))]);
    }

    #[test]
    fn outer_join_keeps_all_rows_with_empty_delta() {
        let table = example(JoinPolicy::Outer);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].transaction, 2);
        assert_eq!(table.rows[1].deltas, vec![None]);
        assert_eq!(
            table.rows[1].values,
            vec![vec![None, Some(Value::Float(2.0))]]
        );
    }

    #[test]
    fn left_join_follows_first_input() {
        let table = Comparison::new(JoinPolicy::Left)
            .input("b", set(&[(1, 1.5), (2, 2.0)]))
            .input("a", set(&[(1, 1.0), (3, 3.0)]))
            .run()
            .unwrap();
        let txs: Vec<u64> = table.rows.iter().map(|r| r.transaction).collect();
        assert_eq!(txs, vec![1, 2]);
    }

    #[test]
    fn required_field_drops_rows() {
        let mut b = set(&[(1, 1.5)]);
        b.push(TransactionRecord::new(2).with(Field::CpuCycles, Value::Int(7)));
        let table = Comparison::new(JoinPolicy::Outer)
            .input("a", set(&[(1, 1.0), (2, 2.0)]))
            .input("b", b)
            .require(Field::ProvingTime)
            .run()
            .unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn shared_fields_come_from_first_available_input() {
        let a = RecordSet::new();
        let b: RecordSet = [TransactionRecord::new(5).with(Field::CpuCycles, Value::Int(42))]
            .into_iter()
            .collect();
        let table = Comparison::new(JoinPolicy::Outer)
            .input("a", a)
            .input("b", b)
            .shared([Field::CpuCycles])
            .run()
            .unwrap();
        assert_eq!(table.rows[0].shared, vec![Some(Value::Int(42))]);
    }

    #[test]
    fn integer_deltas_can_be_negative() {
        let size = |kb| -> RecordSet {
            [TransactionRecord::new(0).with(Field::ProofSize, Value::Int(kb))]
                .into_iter()
                .collect()
        };
        let table = Comparison::new(JoinPolicy::Inner)
            .input("fast", size(300))
            .input("small", size(200))
            .delta(Delta::new(Field::ProofSize, "fast", "small"))
            .run()
            .unwrap();
        assert_eq!(table.rows[0].deltas, vec![Some(Value::Int(-100))]);
    }

    #[test]
    fn validation_errors() {
        assert_eq!(Comparison::new(JoinPolicy::Inner).run(), Err(CompareError::NoInputs));
        assert_eq!(
            Comparison::new(JoinPolicy::Inner)
                .input("a", RecordSet::new())
                .input("a", RecordSet::new())
                .run(),
            Err(CompareError::DuplicateLabel("a".to_string()))
        );
        let err = Comparison::new(JoinPolicy::Inner)
            .input("a", RecordSet::new())
            .delta(Delta::new(Field::ProvingTime, "a", "z"))
            .run()
            .unwrap_err();
        assert!(matches!(err, CompareError::UnknownLabel { ref label, .. } if label == "z"));
    }

    #[test]
    fn join_policy_parses() {
        assert_eq!("outer".parse::<JoinPolicy>(), Ok(JoinPolicy::Outer));
        assert!("cross".parse::<JoinPolicy>().is_err());
    }
}
