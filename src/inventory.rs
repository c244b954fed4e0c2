//! Source-tree enumeration.
//!
//! Walks every file under a source folder, strips the source prefix to get
//! root-relative path strings, runs them through the exclusion filter, and
//! splits the survivors into [`FileEntry`] records for the copier.

use crate::exclusion::ExclusionFilter;
use crate::path_util::extension_of;
use std::io;
use std::path::{MAIN_SEPARATOR, Path};
use walkdir::WalkDir;

/// One file of the source tree, relative to the source folder.
///
/// Immutable once constructed. `folder_name` is the relative directory
/// portion without leading or trailing separator (empty for files at the
/// source root); `extension` includes the leading dot, or is empty when the
/// file name has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Base file name, e.g. `report.txt`.
    pub file_name: String,
    /// Relative directory, e.g. `sub` or `sub/nested`; empty at the root.
    pub folder_name: String,
    /// Extension including the leading dot, e.g. `.txt`; empty if none.
    pub extension: String,
}

impl FileEntry {
    /// Splits a root-relative path string into a `FileEntry`.
    fn from_relative_path(relative: &str) -> Self {
        let (folder_name, file_name) = match relative.rfind(MAIN_SEPARATOR) {
            Some(idx) => (&relative[..idx], &relative[idx + 1..]),
            None => ("", relative),
        };
        let extension = extension_of(file_name);
        Self {
            file_name: file_name.to_string(),
            folder_name: folder_name.to_string(),
            extension: extension.to_string(),
        }
    }

    /// The folder and file name joined with the platform separator.
    ///
    /// Files at the source root yield just their file name. This is the value
    /// the selection file matches against.
    pub fn relative_key(&self) -> String {
        if self.folder_name.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}{}{}", self.folder_name, MAIN_SEPARATOR, self.file_name)
        }
    }
}

/// Enumerates every file under `source_folder`, applies the exclusion
/// filter, and returns the surviving entries.
///
/// Traversal is recursive with no depth limit; symlink cycles are out of
/// scope and symlinks are not followed. The returned order follows the
/// underlying directory traversal, which is stable for a given tree but
/// otherwise unspecified.
///
/// # Errors
///
/// Returns an `io::Error` when the source folder cannot be walked (missing
/// folder, permission failure on a subdirectory, and so on).
pub fn build(source_folder: &Path, filter: &ExclusionFilter) -> io::Result<Vec<FileEntry>> {
    let mut relative_paths = Vec::new();

    for entry in WalkDir::new(source_folder) {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source_folder)
            .map_err(io::Error::other)?;
        relative_paths.push(relative.to_string_lossy().into_owned());
    }

    let survivors = filter.apply(relative_paths);
    Ok(survivors
        .iter()
        .map(|relative| FileEntry::from_relative_path(relative))
        .collect())
}
