//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored
//! status messages, a progress bar for the copy pass, and the end-of-run
//! summary. Keeping output here makes it easy to change formatting globally.

use crate::copier::CopyReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for the copy pass.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the end-of-run summary for a copy pass.
    pub fn copy_summary(report: &CopyReport) {
        println!("\n{}", "SUMMARY".bold());
        println!(
            "  Phase root: {}",
            report.phase_root.display().to_string().cyan()
        );
        println!(
            "  Copied: {} {}",
            report.copied.to_string().green(),
            if report.copied == 1 { "file" } else { "files" }
        );

        if !report.skipped.is_empty() {
            println!(
                "  Skipped: {} (source file no longer present)",
                report.skipped.len().to_string().yellow()
            );
            for path in &report.skipped {
                println!("    - {}", path.display());
            }
        }
    }
}
