//! Directory scan: every log in a folder whose name ends with a suffix.

use crate::{FileSource, SourceError};
use std::path::Path;

/// Files in `dir` (not recursive) whose name ends with `suffix`, ordered by
/// run timestamp (undated files first) and then by name.
pub fn scan_dir(dir: &Path, suffix: &str) -> Result<Vec<FileSource>, SourceError> {
    let scan_err = |source| SourceError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        if !entry.file_type().map_err(scan_err)?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(suffix) {
            sources.push(FileSource::new(entry.path()));
        }
    }

    sources.sort_by(|a, b| {
        a.run_started_at()
            .cmp(&b.run_started_at())
            .then_with(|| a.path().cmp(b.path()))
    });
    tracing::debug!(dir = %dir.display(), suffix, found = sources.len(), "scanned directory");
    Ok(sources)
}
