//! Stdin source: a log piped into the process.

use crate::{split_lines, LogSource, SourceError};
use std::io::Read;

#[derive(Debug, Clone, Default)]
pub struct StdinSource;

impl LogSource for StdinSource {
    fn label(&self) -> &str {
        "stdin"
    }

    fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        let mut bytes = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(SourceError::Stdin)?;
        Ok(split_lines(&bytes))
    }
}
