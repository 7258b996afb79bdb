//! Directory scanner for record discovery.
//!
//! Walks the data root depth-first and collects every file whose name
//! ends with the record suffix. Unreadable directories are logged and
//! skipped; the walk never aborts.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::entry::FileEntry;
use crate::Result;

/// Scan statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub files_found: u64,
    pub files_skipped: u64,
    pub errors: u64,
}

/// Entries collected by one scan plus its statistics.
#[derive(Debug, Default, Clone)]
pub struct ScanOutcome {
    pub entries: Vec<FileEntry>,
    pub stats: ScanStats,
}

impl ScanOutcome {
    /// Fold one walk result into the outcome.
    ///
    /// Walk errors are logged and counted; they never stop the scan.
    fn record(&mut self, root: &Path, suffix: &str, entry: walkdir::Result<DirEntry>) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    path = ?e.path(),
                    error = %e,
                    "Error reading directory, skipping"
                );
                self.stats.errors += 1;
                return;
            }
        };

        if entry.file_type().is_dir() {
            return;
        }

        self.stats.files_found += 1;

        if !entry.file_name().to_string_lossy().ends_with(suffix) {
            self.stats.files_skipped += 1;
            return;
        }

        match FileEntry::from_path(root, entry.path()) {
            Some(file) => self.entries.push(file),
            None => {
                tracing::warn!(path = %entry.path().display(), "Entry outside data root");
                self.stats.errors += 1;
            }
        }
    }
}

/// Scan `root` for files ending in `suffix`.
///
/// Sibling order follows the directory listing; nothing is sorted. A
/// missing root yields an empty outcome.
pub fn scan_directory(root: &Path, suffix: &str) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    if !root.is_dir() {
        tracing::debug!(path = %root.display(), "Data root missing, nothing to scan");
        return outcome;
    }

    tracing::debug!(path = %root.display(), "Starting directory scan");

    for entry in WalkDir::new(root).min_depth(1) {
        outcome.record(root, suffix, entry);
    }

    tracing::debug!(
        path = %root.display(),
        found = outcome.stats.files_found,
        records = outcome.entries.len(),
        skipped = outcome.stats.files_skipped,
        errors = outcome.stats.errors,
        "Directory scan complete"
    );

    outcome
}

/// Async version of directory scan.
///
/// Runs the walk on the blocking pool so it does not stall the runtime.
pub async fn scan_directory_async(root: &Path, suffix: &str) -> Result<ScanOutcome> {
    let root = root.to_path_buf();
    let suffix = suffix.to_string();

    tokio::task::spawn_blocking(move || scan_directory(&root, &suffix))
        .await
        .map_err(|e| crate::Error::internal(format!("Scan task failed: {e}")))
}
