//! prooflog-sources: log source adapters for prooflog.
//!
//! Each source reads a benchmark log fully into memory and hands its lines to
//! the parser. Non-UTF-8 bytes are lossily converted.

pub mod file;
pub mod scan;
pub mod stdin;

pub use file::FileSource;
pub use scan::scan_dir;
pub use stdin::StdinSource;

use std::path::PathBuf;

/// Trait implemented by each log source.
pub trait LogSource {
    /// Human-readable name used in summaries and as the default input label.
    fn label(&self) -> &str;

    /// Read every line of the source, in order, without line terminators.
    fn read_lines(&self) -> Result<Vec<String>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read log file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot scan directory {}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read standard input")]
    Stdin(#[source] std::io::Error),
}

/// Split raw bytes into owned lines, replacing invalid UTF-8.
pub(crate) fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
