//! Command-line interface module for phasecopy.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Settings loading and run-configuration assembly
//! - Pipeline orchestration: inventory, optional narrowing, copy
//! - Dry-run listing and report persistence

use crate::config::{CopyConfig, Settings};
use crate::copier::{self, Phase};
use crate::exclusion::ExclusionFilter;
use crate::inventory;
use crate::output::OutputFormatter;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Phase argument accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PhaseArg {
    /// Snapshot taken before the work.
    Before,
    /// Snapshot taken after the work.
    After,
}

impl From<PhaseArg> for Phase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Before => Phase::Before,
            PhaseArg::After => Phase::After,
        }
    }
}

/// Snapshot a source tree into a before/after phase-tagged destination copy.
#[derive(Debug, Parser)]
#[command(name = "phasecopy", version, about)]
pub struct Cli {
    /// Source folder to enumerate and copy from.
    pub source: PathBuf,

    /// Destination root. The phase subfolder name is appended to this string
    /// as-is, so a trailing separator here changes the layout.
    pub destination_root: String,

    /// Which phase subfolder to copy into.
    #[arg(long, value_enum, default_value_t = PhaseArg::Before)]
    pub phase: PhaseArg,

    /// Folder holding the exclusion and selection files [default: .]
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Narrow the copy to the entries named in the selection file.
    /// Without a selection file this copies nothing.
    #[arg(long)]
    pub select: bool,

    /// List the files that would be copied without copying them.
    #[arg(long)]
    pub dry_run: bool,

    /// Explicit settings file (TOML) instead of the default lookup chain.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report of the copy to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Runs the full pipeline for parsed arguments.
///
/// Builds the inventory, narrows it when `--select` is given, then either
/// lists the result (`--dry-run`) or copies it into the phase-tagged
/// destination. Errors are rendered to strings at this boundary.
pub fn run_cli(cli: &Cli) -> Result<(), String> {
    let settings = Settings::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading settings: {}", e))?;

    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let config = CopyConfig::new(cli.source.clone(), config_dir, &settings);

    OutputFormatter::info(&format!(
        "Enumerating {}",
        config.source_folder.display()
    ));

    let filter = ExclusionFilter::load(&config.config_folder, &config.exclude_file_name);
    if !filter.is_enabled() {
        OutputFormatter::plain(&format!(
            "No exclusion file ({}); copying everything.",
            config.exclude_path().display()
        ));
    }

    let entries = inventory::build(&config.source_folder, &filter)
        .map_err(|e| format!("Error enumerating {}: {}", config.source_folder.display(), e))?;
    OutputFormatter::plain(&format!("Found {} file(s).", entries.len()));

    let entries = if cli.select {
        let selected = copier::narrow(&config, &entries);
        if selected.is_empty() {
            OutputFormatter::warning(&format!(
                "Selection file {} missing or matched nothing; nothing to copy.",
                config.select_path().display()
            ));
        } else {
            OutputFormatter::plain(&format!("Selected {} file(s).", selected.len()));
        }
        selected
    } else {
        entries
    };

    if cli.dry_run {
        OutputFormatter::dry_run_notice("Files that would be copied:");
        for entry in &entries {
            OutputFormatter::plain(&format!(" - {}", entry.relative_key()));
        }
        OutputFormatter::success("Dry run complete. No files were copied.");
        return Ok(());
    }

    let phase = Phase::from(cli.phase);
    let pb = OutputFormatter::create_progress_bar(entries.len() as u64);
    pb.set_message(format!("copying ({})", phase));

    let report = copier::copy_all_with_progress(
        &entries,
        &config,
        &cli.destination_root,
        phase,
        |_| pb.inc(1),
    )
    .map_err(|e| format!("Copy failed: {}", e))?;

    pb.finish_and_clear();

    OutputFormatter::copy_summary(&report);

    if let Some(report_path) = &cli.report {
        report
            .save(report_path)
            .map_err(|e| format!("Error: {}", e))?;
        OutputFormatter::plain(&format!("Report written to {}", report_path.display()));
    }

    OutputFormatter::success("Copy complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_arg_maps_to_phase() {
        assert_eq!(Phase::from(PhaseArg::Before), Phase::Before);
        assert_eq!(Phase::from(PhaseArg::After), Phase::After);
    }

    #[test]
    fn test_cli_parses_minimal_invocation() {
        let cli = Cli::try_parse_from(["phasecopy", "/src/proj", "/dest"])
            .expect("Failed to parse args");
        assert_eq!(cli.source, PathBuf::from("/src/proj"));
        assert_eq!(cli.destination_root, "/dest");
        assert_eq!(cli.phase, PhaseArg::Before);
        assert!(!cli.select);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "phasecopy",
            "/src/proj",
            "/dest",
            "--phase",
            "after",
            "--select",
            "--dry-run",
            "--config-dir",
            "/cfg",
        ])
        .expect("Failed to parse args");
        assert_eq!(cli.phase, PhaseArg::After);
        assert!(cli.select);
        assert!(cli.dry_run);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/cfg")));
    }

    #[test]
    fn test_cli_requires_source_and_destination() {
        assert!(Cli::try_parse_from(["phasecopy"]).is_err());
        assert!(Cli::try_parse_from(["phasecopy", "/src"]).is_err());
    }
}
