//! Aggregate statistics over comparison tables and record sets.

use crate::compare::{CompareError, ComparisonTable};
use crate::types::{Field, RecordSet, TransactionRecord, Value};
use serde::Deserialize;

/// Mean of the present values; `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<Value>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v.as_f64(), n + 1));
    (count > 0).then(|| sum / count as f64)
}

impl ComparisonTable {
    /// Mean of one input's metric column; `None` for an unknown column.
    pub fn mean_metric(&self, label: &str, field: Field) -> Option<f64> {
        mean(self.metric_column(label, field))
    }

    pub fn mean_delta(&self, index: usize) -> Option<f64> {
        mean(self.delta_column(index))
    }
}

/// Mean of a delta column relative to the mean of a reference metric,
/// expressed as a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ratio {
    /// Column name of the delta.
    pub delta: String,
    pub reference_label: String,
    pub reference_field: Field,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Ratio {
    pub fn new(delta: impl Into<String>, reference_label: impl Into<String>, reference_field: Field) -> Self {
        Self {
            delta: delta.into(),
            reference_label: reference_label.into(),
            reference_field,
            caption: None,
        }
    }

    pub fn caption(&self) -> String {
        self.caption.clone().unwrap_or_else(|| {
            format!(
                "Ratio of mean {} to mean {} for {}",
                self.delta, self.reference_field, self.reference_label
            )
        })
    }
}

/// Means and ratios computed from a [`ComparisonTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    /// `(column, mean)` for every delta.
    pub delta_means: Vec<(String, Option<f64>)>,
    /// `(column, mean)` for every metric of every input.
    pub metric_means: Vec<(String, Option<f64>)>,
    /// `(caption, percent)` for every requested ratio.
    pub ratios: Vec<(String, Option<f64>)>,
}

impl Summary {
    pub fn of(table: &ComparisonTable, ratios: &[Ratio]) -> Result<Self, CompareError> {
        let delta_means = table
            .deltas
            .iter()
            .enumerate()
            .map(|(i, d)| (d.column_name(), table.mean_delta(i)))
            .collect();

        let metric_means = table
            .metrics
            .iter()
            .flat_map(|field| {
                table.labels.iter().map(move |label| {
                    (
                        format!("{field}_{label}"),
                        table.mean_metric(label, *field),
                    )
                })
            })
            .collect();

        let ratios = ratios
            .iter()
            .map(|ratio| {
                let context = || format!("ratio {:?}", ratio.caption());
                let delta = table
                    .delta_index(&ratio.delta)
                    .ok_or_else(|| CompareError::UnknownDelta {
                        context: context(),
                        column: ratio.delta.clone(),
                    })?;
                if table.label_index(&ratio.reference_label).is_none() {
                    return Err(CompareError::UnknownLabel {
                        context: context(),
                        label: ratio.reference_label.clone(),
                    });
                }
                if table.metric_index(ratio.reference_field).is_none() {
                    return Err(CompareError::UnknownMetric {
                        context: context(),
                        field: ratio.reference_field,
                    });
                }
                let numerator = table.mean_delta(delta);
                let denominator = table.mean_metric(&ratio.reference_label, ratio.reference_field);
                let percent = match (numerator, denominator) {
                    (Some(n), Some(d)) if d != 0.0 => Some(n / d * 100.0),
                    _ => None,
                };
                Ok((ratio.caption(), percent))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            rows: table.rows.len(),
            delta_means,
            metric_means,
            ratios,
        })
    }
}

/// The `n` records with the largest `field`, largest first. Records without
/// the field are skipped; ties keep their input order.
pub fn top_n(set: &RecordSet, field: Field, n: usize) -> Vec<&TransactionRecord> {
    let mut ranked: Vec<(&TransactionRecord, f64)> = set
        .iter()
        .filter_map(|r| r.get(field).map(|v| (r, v.as_f64())))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).map(|(r, _)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{Comparison, Delta, JoinPolicy};
    use pretty_assertions::assert_eq;

    fn times(rows: &[(u64, f64)]) -> RecordSet {
        rows.iter()
            .map(|(tx, t)| TransactionRecord::new(*tx).with(Field::ProvingTime, Value::Float(*t)))
            .collect()
    }

    #[test]
    fn mean_ignores_missing() {
        assert_eq!(mean([Some(Value::Int(1)), None, Some(Value::Float(2.0))]), Some(1.5));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::new()), None);
    }

    #[test]
    fn summary_ratio_is_percent_of_reference() {
        let table = Comparison::new(JoinPolicy::Inner)
            .input("keccak", times(&[(0, 3.0), (1, 5.0)]))
            .input("poseidon", times(&[(0, 2.0), (1, 2.0)]))
            .metric(Field::ProvingTime)
            .delta(Delta::new(Field::ProvingTime, "poseidon", "keccak"))
            .run()
            .unwrap();
        let summary = Summary::of(
            &table,
            &[Ratio::new("proving_time_diff", "poseidon", Field::ProvingTime)],
        )
        .unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.delta_means, vec![("proving_time_diff".to_string(), Some(2.0))]);
        assert_eq!(
            summary.metric_means,
            vec![
                ("proving_time_keccak".to_string(), Some(4.0)),
                ("proving_time_poseidon".to_string(), Some(2.0)),
            ]
        );
        assert_eq!(summary.ratios[0].1, Some(100.0));
    }

    #[test]
    fn table_means_cover_unknown_columns() {
        let table = Comparison::new(JoinPolicy::Outer)
            .input("a", times(&[(0, 1.0), (1, 3.0)]))
            .input("b", times(&[(1, 4.0)]))
            .metric(Field::ProvingTime)
            .delta(Delta::new(Field::ProvingTime, "a", "b"))
            .run()
            .unwrap();
        assert_eq!(table.mean_metric("a", Field::ProvingTime), Some(2.0));
        assert_eq!(table.mean_metric("b", Field::ProvingTime), Some(4.0));
        assert_eq!(table.mean_metric("c", Field::ProvingTime), None);
        assert_eq!(table.mean_metric("a", Field::CpuCycles), None);
        assert_eq!(table.mean_delta(0), Some(1.0));
    }

    #[test]
    fn ratio_with_zero_reference_is_absent() {
        let table = Comparison::new(JoinPolicy::Inner)
            .input("a", times(&[(0, 0.0)]))
            .input("b", times(&[(0, 1.0)]))
            .metric(Field::ProvingTime)
            .delta(Delta::new(Field::ProvingTime, "a", "b"))
            .run()
            .unwrap();
        let summary =
            Summary::of(&table, &[Ratio::new("proving_time_diff", "a", Field::ProvingTime)]).unwrap();
        assert_eq!(summary.ratios[0].1, None);
    }

    #[test]
    fn ratio_must_reference_known_columns() {
        let table = Comparison::new(JoinPolicy::Inner)
            .input("a", RecordSet::new())
            .run()
            .unwrap();
        let err = Summary::of(&table, &[Ratio::new("nope", "a", Field::ProvingTime)]).unwrap_err();
        assert!(matches!(err, CompareError::UnknownDelta { .. }));
    }

    #[test]
    fn top_n_orders_descending_and_skips_missing() {
        let mut set = times(&[(0, 1.0), (1, 4.0), (2, 4.0), (3, 2.0)]);
        set.push(TransactionRecord::new(4));
        let top: Vec<u64> = top_n(&set, Field::ProvingTime, 3)
            .into_iter()
            .map(|r| r.transaction)
            .collect();
        assert_eq!(top, vec![1, 2, 3]);
        assert!(top_n(&set, Field::CpuCycles, 5).is_empty());
    }
}
