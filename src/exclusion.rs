//! Exclusion rules loaded from a flat-text configuration file.
//!
//! The exclusion file lives in the config folder and carries one rule per
//! line in a fixed legacy format:
//! - lines starting with `*.` exclude an extension (e.g., `*.tmp`)
//! - lines starting with `$$` exclude an exact file name (e.g., `$$Thumbs.db`)
//! - every other line is ignored
//!
//! All matching is case-insensitive. Whenever the exclusion file exists, any
//! candidate whose path contains the substring `workarea` (in any case) is
//! also removed, independent of the listed rules. A missing exclusion file
//! disables filtering entirely, workarea suppression included.

use crate::config::read_legacy_lines;
use crate::path_util::{extension_of, file_name_of};
use std::collections::HashSet;
use std::path::Path;

/// Folder-name token that removes a candidate from consideration outright.
const WORKAREA_TOKEN: &str = "workarea";

/// Parsed exclusion rules.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    /// Excluded extensions, lowercase, with their leading dot.
    extensions: HashSet<String>,
    /// Excluded exact file names, lowercase.
    file_names: HashSet<String>,
}

impl ExclusionRules {
    /// Classifies rule lines into extension and exact-name sets.
    ///
    /// Lines of length 2 or less, and lines matching neither prefix, are
    /// ignored silently.
    fn parse(lines: &[String]) -> Self {
        let mut extensions = HashSet::new();
        let mut file_names = HashSet::new();

        for line in lines.iter().filter(|line| line.len() > 2) {
            if let Some(rest) = line.strip_prefix("*.") {
                // Keep the leading dot; rule files may carry trailing blanks.
                extensions.insert(format!(".{}", rest.trim_end().to_lowercase()));
            } else if let Some(rest) = line.strip_prefix("$$") {
                file_names.insert(rest.to_lowercase());
            }
        }

        Self {
            extensions,
            file_names,
        }
    }

    fn matches_extension(&self, candidate: &str) -> bool {
        self.extensions.contains(&extension_of(candidate).to_lowercase())
    }

    fn matches_file_name(&self, candidate: &str) -> bool {
        self.file_names.contains(&file_name_of(candidate).to_lowercase())
    }
}

/// Filter that removes excluded entries from a candidate path list.
///
/// Loaded once per invocation from `config_folder/<exclude_file_name>`; a
/// missing file yields a disabled filter whose [`apply`](Self::apply) is the
/// identity.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    rules: Option<ExclusionRules>,
}

impl ExclusionFilter {
    /// Loads the exclusion file from the config folder.
    ///
    /// Absence of the file is not an error; it means "exclude nothing".
    /// A file that exists but cannot be read is treated the same way.
    pub fn load(config_folder: &Path, exclude_file_name: &str) -> Self {
        let exclude_path = config_folder.join(exclude_file_name);
        if !exclude_path.exists() {
            return Self { rules: None };
        }

        let rules = match read_legacy_lines(&exclude_path) {
            Ok(lines) => ExclusionRules::parse(&lines),
            Err(_) => ExclusionRules::default(),
        };

        Self { rules: Some(rules) }
    }

    /// Builds a filter directly from rule lines, bypassing the filesystem.
    #[cfg(test)]
    fn from_lines(lines: &[&str]) -> Self {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        Self {
            rules: Some(ExclusionRules::parse(&lines)),
        }
    }

    /// Returns true when an exclusion file was found and rules are active.
    pub fn is_enabled(&self) -> bool {
        self.rules.is_some()
    }

    /// Removes excluded entries from `candidates`.
    ///
    /// An empty input, or a disabled filter, returns the input unchanged.
    /// Otherwise candidates matching an extension rule, an exact-name rule,
    /// or carrying the workarea token anywhere in their path are removed.
    /// Surviving entries keep their input order.
    pub fn apply(&self, mut candidates: Vec<String>) -> Vec<String> {
        if candidates.is_empty() {
            return candidates;
        }
        let Some(rules) = &self.rules else {
            return candidates;
        };

        candidates.retain(|c| !rules.matches_extension(c));
        candidates.retain(|c| !rules.matches_file_name(c));
        candidates.retain(|c| !c.to_lowercase().contains(WORKAREA_TOKEN));
        candidates
    }
}
