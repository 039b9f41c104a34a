//! Log Record Parser: turns the lines of one benchmark log into a
//! [`RecordSet`].
//!
//! The parser makes a single forward pass. Each line is first checked
//! against the format's delimiter (which may seal the current record and
//! open a new one), then against every extractor. Values overwrite earlier
//! values for the same field inside a block, so the last matching line wins.
//! Lines that match nothing are ignored.

use crate::extract::{Extracted, Extractor};
use crate::format::{Delimiter, FormatSpec, LogFormat};
use crate::payload;
use crate::types::{Field, RecordSet, TransactionRecord, Value};
use serde::Deserialize;

/// What to do when a captured number cannot be converted (for example an
/// integer that overflows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidNumberPolicy {
    /// Abort the parse with [`ParseError`].
    #[default]
    Fail,
    /// Drop the value, log a warning, and keep going.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: cannot parse {text:?} as {field}")]
    InvalidNumber {
        line: usize,
        field: Field,
        text: String,
    },
    #[error("line {line}: cannot parse transaction index {text:?}")]
    InvalidIndex { line: usize, text: String },
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// A configured parser for one log grammar.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    spec: &'a FormatSpec,
    policy: InvalidNumberPolicy,
}

impl Parser<'static> {
    pub fn for_format(format: LogFormat) -> Self {
        Parser::new(format.spec())
    }
}

impl<'a> Parser<'a> {
    pub fn new(spec: &'a FormatSpec) -> Self {
        Self {
            spec,
            policy: InvalidNumberPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: InvalidNumberPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse `lines` in order. An empty input yields an empty set.
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<RecordSet, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut acc = Accumulator::default();

        for (idx, line) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let line = line.as_ref().trim_end();

            if let Delimiter::Header {
                pattern,
                whole_line,
            } = &self.spec.delimiter
            {
                let candidate = if *whole_line { line.trim() } else { line };
                if let Some(text) = pattern
                    .captures(candidate)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str())
                {
                    match text.parse::<u64>() {
                        Ok(tx) => acc.begin(tx),
                        Err(_) => {
                            self.reject(ParseError::InvalidIndex {
                                line: line_no,
                                text: text.to_string(),
                            })?;
                            // The header still ends the previous block; its own
                            // lines have no record to land in.
                            acc.seal();
                        }
                    }
                }
            }

            for extractor in &self.spec.extractors {
                self.apply(extractor, line, line_no, &mut acc)?;
            }
        }

        let set = acc.finish();
        tracing::debug!(records = set.len(), "parse complete");
        Ok(set)
    }

    fn apply(
        &self,
        extractor: &Extractor,
        line: &str,
        line_no: usize,
        acc: &mut Accumulator,
    ) -> Result<(), ParseError> {
        match extractor.extract(line) {
            None => Ok(()),
            Some(Extracted::Scalar(field, text)) => {
                if matches!(self.spec.delimiter, Delimiter::Counter(f) if f == field) {
                    acc.begin_implicit();
                }
                self.store(acc, field, text, line_no)
            }
            Some(Extracted::Checkpoint(body)) => {
                for (key, text) in payload::parse_pairs(body) {
                    match Field::from_name(key) {
                        Some(field) => self.store(acc, field, text, line_no)?,
                        None => tracing::debug!(line = line_no, key, "ignoring unknown checkpoint key"),
                    }
                }
                Ok(())
            }
        }
    }

    fn store(
        &self,
        acc: &mut Accumulator,
        field: Field,
        text: &str,
        line_no: usize,
    ) -> Result<(), ParseError> {
        match Value::parse(field.kind(), text) {
            Some(value) => {
                acc.set(field, value, line_no);
                Ok(())
            }
            None => self.reject(ParseError::InvalidNumber {
                line: line_no,
                field,
                text: text.to_string(),
            }),
        }
    }

    fn reject(&self, err: ParseError) -> Result<(), ParseError> {
        match self.policy {
            InvalidNumberPolicy::Fail => Err(err),
            InvalidNumberPolicy::Skip => {
                tracing::warn!(error = %err, "skipping unparseable value");
                Ok(())
            }
        }
    }
}

/// Parse `input` with the built-in grammar for `format` and the default
/// policy.
pub fn parse_str(format: LogFormat, input: &str) -> Result<RecordSet, ParseError> {
    Parser::for_format(format).parse_lines(input.lines())
}

// ---------------------------------------------------------------------------
// Block accumulator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Accumulating(TransactionRecord),
}

#[derive(Debug, Default)]
struct Accumulator {
    state: State,
    sealed: RecordSet,
    next_implicit: u64,
}

impl Accumulator {
    fn seal(&mut self) {
        if let State::Accumulating(record) = std::mem::take(&mut self.state) {
            tracing::debug!(
                transaction = record.transaction,
                fields = record.fields.len(),
                "sealed record"
            );
            self.sealed.push(record);
        }
    }

    fn begin(&mut self, transaction: u64) {
        self.seal();
        self.state = State::Accumulating(TransactionRecord::new(transaction));
    }

    fn begin_implicit(&mut self) {
        let tx = self.next_implicit;
        self.next_implicit += 1;
        self.begin(tx);
    }

    fn set(&mut self, field: Field, value: Value, line_no: usize) {
        match &mut self.state {
            State::Accumulating(record) => {
                record.set(field, value);
            }
            State::Idle => {
                tracing::debug!(line = line_no, %field, "value before first transaction dropped");
            }
        }
    }

    fn finish(mut self) -> RecordSet {
        self.seal();
        self.sealed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
