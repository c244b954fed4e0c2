//! Selection narrowing and phase-tagged copying.
//!
//! The copier takes the inventory, optionally narrows it to the entries named
//! in a selection file, and copies the result into a destination tree tagged
//! with a before/after phase subfolder. The relative folder structure of the
//! source is preserved under a synthetic top-level folder named after the
//! last segment of the source path.

use crate::config::{CopyConfig, read_legacy_lines};
use crate::inventory::FileEntry;
use crate::path_util::last_segment;
use serde::Serialize;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Which snapshot of a work cycle is being taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Snapshot taken before the work.
    Before,
    /// Snapshot taken after the work.
    After,
}

impl Phase {
    /// The caller-configured destination subfolder name for this phase.
    pub fn folder_name<'a>(&self, config: &'a CopyConfig) -> &'a str {
        match self {
            Phase::Before => &config.before_folder,
            Phase::After => &config.after_folder,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Before => write!(f, "before"),
            Phase::After => write!(f, "after"),
        }
    }
}

/// Errors that can occur while copying.
#[derive(Debug)]
pub enum CopyError {
    /// Failed to create a destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to copy a file to its destination.
    FileCopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the JSON run report.
    ReportWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for CopyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileCopyFailed {
                source_path,
                destination,
                source,
            } => {
                write!(
                    f,
                    "Failed to copy {} to {}: {}",
                    source_path.display(),
                    destination.display(),
                    source
                )
            }
            Self::ReportWriteFailed { path, source } => {
                write!(f, "Failed to write report {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CopyError {}

/// Result type for copy operations.
pub type CopyResult<T> = Result<T, CopyError>;

/// Summary of one copy pass.
///
/// Missing source files are skipped silently during the copy; their paths are
/// surfaced here for callers that want to track skip counts.
#[derive(Debug, Serialize)]
pub struct CopyReport {
    /// ISO 8601 timestamp of when the copy ran.
    pub timestamp: String,
    /// Which phase the copy was tagged with.
    pub phase: Phase,
    /// Root the files were copied under.
    pub phase_root: PathBuf,
    /// Number of files copied.
    pub copied: usize,
    /// Source paths that no longer existed at copy time.
    pub skipped: Vec<PathBuf>,
}

impl CopyReport {
    fn new(phase: Phase, phase_root: PathBuf) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            phase,
            phase_root,
            copied: 0,
            skipped: Vec::new(),
        }
    }

    /// Saves this report to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> CopyResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| CopyError::ReportWriteFailed {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            ),
        })?;

        fs::write(path, json).map_err(|e| CopyError::ReportWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Strips a single leading separator, when present, from a relative path.
///
/// Selection files store relative paths with a leading separator convention;
/// comparison normalizes one leading separator away on both sides.
fn normalize_key(key: &str) -> &str {
    key.strip_prefix(MAIN_SEPARATOR).unwrap_or(key)
}

/// Narrows the inventory to the entries named in the selection file.
///
/// A missing selection file yields an empty result: absence of a selection
/// list means nothing is selected, not everything. Each selection line is
/// compared against each entry's relative key with one leading separator
/// normalized away on both sides; duplicate lines produce duplicate entries.
pub fn narrow(config: &CopyConfig, inventory: &[FileEntry]) -> Vec<FileEntry> {
    let select_path = config.select_path();
    if !select_path.exists() {
        return Vec::new();
    }
    let Ok(lines) = read_legacy_lines(&select_path) else {
        return Vec::new();
    };

    let mut selected = Vec::new();
    for line in lines.iter().filter(|line| !line.is_empty()) {
        let wanted = normalize_key(line);
        for entry in inventory {
            if normalize_key(&entry.relative_key()) == wanted {
                selected.push(entry.clone());
            }
        }
    }
    selected
}

/// Copies `entries` from the source folder into the phase-tagged destination.
///
/// The phase root is `destination_root` concatenated directly with the
/// configured phase subfolder name; no separator is inserted between them, so
/// the subfolder name carries its own. Under it, every entry lands at
/// `<phase_root>/<last segment of source>/<folder_name>/<file_name>`, with
/// directories created as needed and existing destination files overwritten.
///
/// A source file that no longer exists is skipped silently and recorded in
/// the report. Filesystem failures propagate immediately; files already
/// copied stay copied (no rollback).
pub fn copy_all(
    entries: &[FileEntry],
    config: &CopyConfig,
    destination_root: &str,
    phase: Phase,
) -> CopyResult<CopyReport> {
    copy_all_with_progress(entries, config, destination_root, phase, |_| {})
}

/// Same as [`copy_all`], invoking `progress` after each entry is processed
/// (copied or skipped).
///
/// The pipeline has no observability of its own; callers that want per-file
/// progress reporting hook in here.
pub fn copy_all_with_progress<F>(
    entries: &[FileEntry],
    config: &CopyConfig,
    destination_root: &str,
    phase: Phase,
    mut progress: F,
) -> CopyResult<CopyReport>
where
    F: FnMut(&FileEntry),
{
    let source_str = config.source_folder.to_string_lossy();
    let source_tag = last_segment(&source_str).unwrap_or_default().to_string();

    let phase_root = PathBuf::from(format!("{}{}", destination_root, phase.folder_name(config)));
    fs::create_dir_all(&phase_root).map_err(|e| CopyError::DirectoryCreationFailed {
        path: phase_root.clone(),
        source: e,
    })?;

    let mut report = CopyReport::new(phase, phase_root.clone());
    let tagged_root = phase_root.join(&source_tag);

    for entry in entries {
        let dest_dir = tagged_root.join(&entry.folder_name);
        fs::create_dir_all(&dest_dir).map_err(|e| CopyError::DirectoryCreationFailed {
            path: dest_dir.clone(),
            source: e,
        })?;

        let source_path = config
            .source_folder
            .join(&entry.folder_name)
            .join(&entry.file_name);
        if !source_path.is_file() {
            report.skipped.push(source_path);
            progress(entry);
            continue;
        }

        let destination = dest_dir.join(&entry.file_name);
        fs::copy(&source_path, &destination).map_err(|e| CopyError::FileCopyFailed {
            source_path: source_path.clone(),
            destination: destination.clone(),
            source: e,
        })?;
        report.copied += 1;
        progress(entry);
    }

    Ok(report)
}
