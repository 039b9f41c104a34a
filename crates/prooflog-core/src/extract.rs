//! Field extractors: pattern-to-field mappings applied to every log line.

use crate::types::Field;
use regex::Regex;

/// What an extractor stores when one of its patterns matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Capture group 1 is the value of this field.
    Scalar(Field),
    /// Capture group 1 is a `key: value, ...` payload; every known key
    /// becomes its own field.
    Checkpoint,
}

/// A match produced by [`Extractor::extract`], borrowing from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extracted<'a> {
    Scalar(Field, &'a str),
    Checkpoint(&'a str),
}

/// One or more alternative patterns feeding a single [`Capture`].
///
/// Patterns are tried in order and the first one that matches wins.
#[derive(Debug, Clone)]
pub struct Extractor {
    patterns: Vec<Regex>,
    capture: Capture,
}

impl Extractor {
    pub fn try_new(patterns: &[&str], capture: Capture) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns, capture })
    }

    /// Built-in extractor with a single pattern.
    ///
    /// Panics on an invalid pattern; only use with literal patterns.
    pub fn scalar(field: Field, pattern: &str) -> Self {
        Self::scalar_any(field, &[pattern])
    }

    /// Built-in extractor with alternative phrasings of the same field.
    pub fn scalar_any(field: Field, patterns: &[&str]) -> Self {
        Self::try_new(patterns, Capture::Scalar(field))
            .expect("built-in extractor pattern must be a valid regex")
    }

    pub fn checkpoint(pattern: &str) -> Self {
        Self::try_new(&[pattern], Capture::Checkpoint)
            .expect("built-in checkpoint pattern must be a valid regex")
    }

    pub fn extract<'a>(&self, line: &'a str) -> Option<Extracted<'a>> {
        let text = self
            .patterns
            .iter()
            .find_map(|re| re.captures(line))
            .and_then(|caps| caps.get(1))?
            .as_str();

        Some(match self.capture {
            Capture::Scalar(field) => Extracted::Scalar(field, text),
            Capture::Checkpoint => Extracted::Checkpoint(text),
        })
    }
}
