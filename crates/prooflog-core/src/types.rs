//! Core types for prooflog-core.
//!
//! This module defines the data structures shared across all layers: the
//! closed [`Field`] vocabulary, numeric [`Value`]s, the per-transaction
//! [`TransactionRecord`], and the ordered [`RecordSet`] produced for one log.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Field vocabulary
// ---------------------------------------------------------------------------

/// A numeric field extracted from a benchmark log.
///
/// Declaration order is the canonical column order used by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Field {
    CpuCycles,
    CpuTraceLen,
    ProvingTime,
    VerifyingTime,
    ProofSize,
    ArithmeticLen,
    BytePackingLen,
    CpuLen,
    KeccakLen,
    KeccakSpongeLen,
    LogicLen,
    MemoryLen,
}

/// How a captured substring is converted into a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Float,
}

static FIELD_NAMES: phf::Map<&'static str, Field> = phf::phf_map! {
    "cpu_cycles" => Field::CpuCycles,
    "cpu_trace_len" => Field::CpuTraceLen,
    "proving_time" => Field::ProvingTime,
    "verifying_time" => Field::VerifyingTime,
    "proof_size" => Field::ProofSize,
    "arithmetic_len" => Field::ArithmeticLen,
    "byte_packing_len" => Field::BytePackingLen,
    "cpu_len" => Field::CpuLen,
    "keccak_len" => Field::KeccakLen,
    "keccak_sponge_len" => Field::KeccakSpongeLen,
    "logic_len" => Field::LogicLen,
    "memory_len" => Field::MemoryLen,
};

impl Field {
    pub const ALL: [Field; 12] = [
        Field::CpuCycles,
        Field::CpuTraceLen,
        Field::ProvingTime,
        Field::VerifyingTime,
        Field::ProofSize,
        Field::ArithmeticLen,
        Field::BytePackingLen,
        Field::CpuLen,
        Field::KeccakLen,
        Field::KeccakSpongeLen,
        Field::LogicLen,
        Field::MemoryLen,
    ];

    /// The seven per-table trace lengths reported by a `TraceCheckpoint`.
    pub const TRACE_LENGTHS: [Field; 7] = [
        Field::ArithmeticLen,
        Field::BytePackingLen,
        Field::CpuLen,
        Field::KeccakLen,
        Field::KeccakSpongeLen,
        Field::LogicLen,
        Field::MemoryLen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::CpuCycles => "cpu_cycles",
            Field::CpuTraceLen => "cpu_trace_len",
            Field::ProvingTime => "proving_time",
            Field::VerifyingTime => "verifying_time",
            Field::ProofSize => "proof_size",
            Field::ArithmeticLen => "arithmetic_len",
            Field::BytePackingLen => "byte_packing_len",
            Field::CpuLen => "cpu_len",
            Field::KeccakLen => "keccak_len",
            Field::KeccakSpongeLen => "keccak_sponge_len",
            Field::LogicLen => "logic_len",
            Field::MemoryLen => "memory_len",
        }
    }

    pub fn kind(self) -> NumberKind {
        match self {
            Field::ProvingTime | Field::VerifyingTime => NumberKind::Float,
            _ => NumberKind::Int,
        }
    }

    /// Look up a field by its snake_case name.
    pub fn from_name(name: &str) -> Option<Field> {
        FIELD_NAMES.get(name).copied()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field {0:?}")]
pub struct UnknownField(pub String);

impl std::str::FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s).ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl TryFrom<String> for Field {
    type Error = UnknownField;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A numeric field value. Integers are signed so that deltas between two
/// counters can go negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// Parse `text` according to `kind`. Returns `None` when the text is not
    /// a valid number of that kind (including integer overflow).
    pub fn parse(kind: NumberKind, text: &str) -> Option<Value> {
        match kind {
            NumberKind::Int => text.parse().ok().map(Value::Int),
            NumberKind::Float => text.parse().ok().map(Value::Float),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(v) => v as f64,
            Value::Float(v) => v,
        }
    }

    /// `self - rhs`. Integer on both sides stays integer; anything else is
    /// computed in floating point. `None` on integer overflow.
    pub fn checked_sub(self, rhs: Value) -> Option<Value> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => a.checked_sub(b).map(Value::Int),
            (a, b) => Some(Value::Float(a.as_f64() - b.as_f64())),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            // Whole floats keep a trailing `.0` so a column never mixes
            // `1` and `1.5` for the same field.
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Every field matched inside one transaction block of a log.
///
/// Fields that were never matched are absent from `fields`; they are not
/// zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Explicit index from a header line, or an implicit counter for
    /// headerless formats.
    pub transaction: u64,
    pub fields: BTreeMap<Field, Value>,
}

impl TransactionRecord {
    pub fn new(transaction: u64) -> Self {
        Self {
            transaction,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: Field) -> Option<Value> {
        self.fields.get(&field).copied()
    }

    /// Store `value`, returning the value it replaced.
    pub fn set(&mut self, field: Field, value: Value) -> Option<Value> {
        self.fields.insert(field, value)
    }

    pub fn with(mut self, field: Field, value: Value) -> Self {
        self.set(field, value);
        self
    }
}

impl Serialize for TransactionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("transaction", &self.transaction)?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

/// The records of one log, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<TransactionRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The record for `transaction`. When a log repeats an index, the last
    /// sealed record wins.
    pub fn get(&self, transaction: u64) -> Option<&TransactionRecord> {
        self.records
            .iter()
            .rev()
            .find(|r| r.transaction == transaction)
    }

    /// Every field that appears in at least one record, in vocabulary order.
    pub fn fields_present(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.records.iter().any(|r| r.fields.contains_key(f)))
            .collect()
    }
}

impl FromIterator<TransactionRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordSet {
    type Item = TransactionRecord;
    type IntoIter = std::vec::IntoIter<TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
