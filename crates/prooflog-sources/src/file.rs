//! File source: one benchmark log on disk.

use crate::{split_lines, LogSource, SourceError};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Prefix written by the benchmark runner, e.g.
/// `2024-09-18_10-45-03_poseidon_fast_prover_bench_1.log`.
const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const RUN_TIMESTAMP_LEN: usize = "2024-09-18_10-45-03".len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    /// The label defaults to the file stem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, label }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start time of the benchmark run, when the file name carries one.
    pub fn run_started_at(&self) -> Option<NaiveDateTime> {
        let name = self.path.file_name()?.to_str()?;
        let prefix = name.get(..RUN_TIMESTAMP_LEN)?;
        NaiveDateTime::parse_from_str(prefix, RUN_TIMESTAMP_FORMAT).ok()
    }
}

impl LogSource for FileSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        let bytes = std::fs::read(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let lines = split_lines(&bytes);
        tracing::info!(path = %self.path.display(), lines = lines.len(), "read log file");
        Ok(lines)
    }
}
