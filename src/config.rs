//! Run configuration for the copy pipeline.
//!
//! The pipeline takes an explicit, immutable [`CopyConfig`] value instead of
//! mutable settings assigned before each call, so there is no hidden ordering
//! between configuration and operations. A `CopyConfig` is built from
//! command-line arguments merged with an optional TOML settings file.
//!
//! # Settings File Format
//!
//! Settings are stored in TOML with the following structure (every key is
//! optional and falls back to a built-in default):
//!
//! ```toml
//! [files]
//! exclude = "exclude.txt"
//! select = "select.txt"
//!
//! [destination]
//! before = "/Before"
//! after = "/After"
//! ```
//!
//! The exclusion and selection files themselves are *not* TOML; they are flat
//! legacy text files read through `read_legacy_lines`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Errors that can occur while loading the settings file.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Settings file not found at the explicitly specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading the settings file.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Settings file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid settings: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading settings: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// On-disk settings, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Names of the flat-text configuration files under the config folder.
    #[serde(default)]
    pub files: FileNames,

    /// Destination phase subfolder names.
    #[serde(default)]
    pub destination: PhaseFolders,
}

/// File-name settings for the exclusion and selection lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNames {
    /// Name of the exclusion file (e.g., "exclude.txt").
    #[serde(default = "default_exclude_file")]
    pub exclude: String,

    /// Name of the selection file (e.g., "select.txt").
    #[serde(default = "default_select_file")]
    pub select: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            exclude: default_exclude_file(),
            select: default_select_file(),
        }
    }
}

/// Phase subfolder names appended to the destination root.
///
/// These are concatenated directly onto the destination root string, so they
/// carry their own leading separator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseFolders {
    /// Subfolder name for the "before" snapshot.
    #[serde(default = "default_before_folder")]
    pub before: String,

    /// Subfolder name for the "after" snapshot.
    #[serde(default = "default_after_folder")]
    pub after: String,
}

impl Default for PhaseFolders {
    fn default() -> Self {
        Self {
            before: default_before_folder(),
            after: default_after_folder(),
        }
    }
}

fn default_exclude_file() -> String {
    "exclude.txt".to_string()
}

fn default_select_file() -> String {
    "select.txt".to_string()
}

fn default_before_folder() -> String {
    format!("{}Before", MAIN_SEPARATOR)
}

fn default_after_folder() -> String {
    format!("{}After", MAIN_SEPARATOR)
}

impl Settings {
    /// Load settings from a file, with fallback to defaults.
    ///
    /// Attempts to load settings in the following order:
    /// 1. If `settings_path` is provided, load from that file
    /// 2. Look for `.phasecopyrc.toml` in the current directory
    /// 3. Look for `~/.config/phasecopy/config.toml` in the home directory
    /// 4. Fall back to the built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error only if a settings file is explicitly provided but
    /// cannot be read or parsed.
    pub fn load(settings_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = settings_path {
            return Self::load_from_file(path);
        }

        let local_settings = PathBuf::from(".phasecopyrc.toml");
        if local_settings.exists() {
            return Self::load_from_file(&local_settings);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_settings = PathBuf::from(home)
                .join(".config")
                .join("phasecopy")
                .join("config.toml");
            if home_settings.exists() {
                return Self::load_from_file(&home_settings);
            }
        }

        Ok(Self::default())
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if the file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

/// Immutable configuration for one run of the copy pipeline.
///
/// Holds the folder paths and file names every operation needs. Constructed
/// once per invocation and passed by reference; nothing in the pipeline
/// mutates it.
#[derive(Debug, Clone)]
pub struct CopyConfig {
    /// Folder containing the exclusion and selection files.
    pub config_folder: PathBuf,
    /// Root of the source tree to enumerate and copy from.
    pub source_folder: PathBuf,
    /// Name of the exclusion file inside `config_folder`.
    pub exclude_file_name: String,
    /// Name of the selection file inside `config_folder`.
    pub select_file_name: String,
    /// "Before" subfolder name, concatenated onto the destination root.
    pub before_folder: String,
    /// "After" subfolder name, concatenated onto the destination root.
    pub after_folder: String,
}

impl CopyConfig {
    /// Builds a run configuration from folder paths and loaded settings.
    pub fn new(source_folder: PathBuf, config_folder: PathBuf, settings: &Settings) -> Self {
        Self {
            config_folder,
            source_folder,
            exclude_file_name: settings.files.exclude.clone(),
            select_file_name: settings.files.select.clone(),
            before_folder: settings.destination.before.clone(),
            after_folder: settings.destination.after.clone(),
        }
    }

    /// Full path of the exclusion file.
    pub fn exclude_path(&self) -> PathBuf {
        self.config_folder.join(&self.exclude_file_name)
    }

    /// Full path of the selection file.
    pub fn select_path(&self) -> PathBuf {
        self.config_folder.join(&self.select_file_name)
    }
}

/// Reads a flat-text configuration file as a sequence of lines.
///
/// The exclusion and selection files come from a legacy tool and are not
/// guaranteed to be UTF-8, so the content is read as bytes, split on `\n`
/// with trailing `\r` stripped, and each line decoded lossily. The rule
/// prefixes and path comparisons are ASCII-level, so lossy decoding never
/// changes a match.
pub(crate) fn read_legacy_lines(path: &Path) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let lines = bytes
        .split(|&b| b == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            String::from_utf8_lossy(line).into_owned()
        })
        .collect();
    Ok(lines)
}
