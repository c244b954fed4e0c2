//! String-level path helpers.
//!
//! The exclusion pass filters raw relative-path strings before any `FileEntry`
//! exists, so these helpers operate on `&str` rather than `Path`. All paths in
//! this crate use the platform separator as their single separator convention.

use std::path::MAIN_SEPARATOR;

/// Returns the substring after the final separator of `path`.
///
/// This value is used as a synthetic top-level folder name at the destination
/// root, so two different source trees copied to the same destination never
/// collide.
///
/// Returns `None` when `path` is empty or all whitespace. A path with no
/// separator is returned unchanged (splitting on a missing delimiter yields
/// the whole string as its only segment).
///
/// # Examples
///
/// ```
/// use phasecopy::path_util::last_segment;
/// use std::path::MAIN_SEPARATOR;
///
/// let path = format!("a{0}b{0}c", MAIN_SEPARATOR);
/// assert_eq!(last_segment(&path), Some("c"));
/// assert_eq!(last_segment(""), None);
/// assert_eq!(last_segment("noseparator"), Some("noseparator"));
/// ```
pub fn last_segment(path: &str) -> Option<&str> {
    if path.trim().is_empty() {
        return None;
    }
    path.rsplit(MAIN_SEPARATOR).next()
}

/// Returns the base file name of a relative path string.
///
/// A path without a separator is its own base name; an empty string yields an
/// empty base name.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(MAIN_SEPARATOR).next().unwrap_or(path)
}

/// Returns the extension of a path's base name, including the leading dot.
///
/// Everything after the last dot of the base name counts, so `.gitignore`
/// yields `.gitignore`. A base name without a dot yields `""`.
pub fn extension_of(path: &str) -> &str {
    let name = file_name_of(path);
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep(parts: &[&str]) -> String {
        parts.join(&MAIN_SEPARATOR.to_string())
    }

    #[test]
    fn test_last_segment_of_nested_path() {
        let path = sep(&["base", "a", "b", "c"]);
        assert_eq!(last_segment(&path), Some("c"));
    }

    #[test]
    fn test_last_segment_of_empty_is_none() {
        assert_eq!(last_segment(""), None);
        assert_eq!(last_segment("   "), None);
    }

    #[test]
    fn test_last_segment_without_separator_is_whole_string() {
        assert_eq!(last_segment("noseparator"), Some("noseparator"));
    }

    #[test]
    fn test_last_segment_trailing_separator_is_empty() {
        // The segment after a trailing separator is the empty string, same as
        // splitting the original path would produce.
        let path = format!("a{0}b{0}", MAIN_SEPARATOR);
        assert_eq!(last_segment(&path), Some(""));
    }

    #[test]
    fn test_file_name_of_nested_and_flat_paths() {
        let path = sep(&["sub", "deep", "file.txt"]);
        assert_eq!(file_name_of(&path), "file.txt");
        assert_eq!(file_name_of("file.txt"), "file.txt");
        assert_eq!(file_name_of(""), "");
    }

    #[test]
    fn test_extension_includes_leading_dot() {
        let path = sep(&["sub", "report.txt"]);
        assert_eq!(extension_of(&path), ".txt");
    }

    #[test]
    fn test_extension_of_dotless_name_is_empty() {
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(&sep(&["sub", "Makefile"])), "");
    }

    #[test]
    fn test_extension_of_dotfile_is_whole_name() {
        assert_eq!(extension_of(".gitignore"), ".gitignore");
    }

    #[test]
    fn test_extension_uses_last_dot() {
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
    }

    #[test]
    fn test_dot_in_folder_does_not_leak_into_extension() {
        let path = sep(&["v1.2", "binary"]);
        assert_eq!(extension_of(&path), "");
    }
}
