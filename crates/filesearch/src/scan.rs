//! Recursive folder scan.
//!
//! The scan runs synchronously on the calling thread and visits regular
//! files only. Per-entry read failures are skipped and counted rather than
//! aborting the scan, so a single unreadable subtree cannot discard results
//! already collected. Only a missing or unreadable base folder fails the
//! whole call.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{FileSearchError, Result};
use crate::matcher::{ExtensionFilter, NameMatcher};

/// Maximum number of paths carried in [`ScanOutcome::shown`]. The true
/// match count keeps growing past this cap.
pub const MAX_DISPLAYED: usize = 500;

/// Result of a folder scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Matching paths, capped at [`MAX_DISPLAYED`] entries.
    pub shown: Vec<PathBuf>,
    /// Total number of matches, uncapped.
    pub total: usize,
    /// Directories or entries that could not be read and were skipped.
    pub skipped: usize,
}

impl ScanOutcome {
    /// Returns true if more matches exist than are carried in `shown`.
    pub fn truncated(&self) -> bool {
        self.total > self.shown.len()
    }
}

/// Scans `base` recursively for regular files whose names satisfy `matcher`
/// and whose extensions pass `filter`.
pub fn scan_folder(
    base: &Path,
    matcher: &NameMatcher,
    filter: &ExtensionFilter,
) -> Result<ScanOutcome> {
    if base.as_os_str().is_empty() {
        return Err(FileSearchError::NoBaseFolder);
    }
    if !base.is_dir() {
        return Err(FileSearchError::FolderNotFound(base.to_path_buf()));
    }

    let mut outcome = ScanOutcome::default();
    // The base folder itself must be readable; everything below is
    // best-effort.
    let entries = fs::read_dir(base)?;
    scan_entries(entries, matcher, filter, &mut outcome);

    debug!(
        "scanned {}: {} matches, {} skipped",
        base.display(),
        outcome.total,
        outcome.skipped
    );
    Ok(outcome)
}

fn scan_entries(
    entries: fs::ReadDir,
    matcher: &NameMatcher,
    filter: &ExtensionFilter,
    outcome: &mut ScanOutcome,
) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                outcome.skipped += 1;
                continue;
            }
        };

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                outcome.skipped += 1;
                continue;
            }
        };

        if file_type.is_dir() {
            match fs::read_dir(&path) {
                Ok(children) => scan_entries(children, matcher, filter, outcome),
                Err(err) => {
                    warn!("skipping unreadable directory {}: {err}", path.display());
                    outcome.skipped += 1;
                }
            }
            continue;
        }

        if !file_type.is_file() {
            continue;
        }
        if !filter.matches(&path) {
            continue;
        }

        let name = entry.file_name();
        if !matcher.matches(&name.to_string_lossy()) {
            continue;
        }

        outcome.total += 1;
        if outcome.shown.len() < MAX_DISPLAYED {
            outcome.shown.push(path);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
