//! phasecopy - before/after snapshot copies of a source tree
//!
//! This library enumerates the files under a source folder, filters them
//! through a flat-text exclusion file, optionally narrows them to a
//! flat-text selection list, and copies the result into a destination tree
//! tagged with a "before" or "after" phase subfolder, preserving the
//! relative folder structure.

pub mod cli;
pub mod config;
pub mod copier;
pub mod exclusion;
pub mod inventory;
pub mod output;
pub mod path_util;

pub use config::{ConfigError, CopyConfig, Settings};
pub use copier::{CopyError, CopyReport, Phase};
pub use exclusion::ExclusionFilter;
pub use inventory::FileEntry;

pub use cli::{Cli, run_cli};
