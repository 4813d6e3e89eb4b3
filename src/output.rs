//! Output formatting and styling.
//!
//! Centralizes all line-oriented CLI output: colored status lines, the
//! progress bar shown while files are moved, and the per-category
//! summary table printed at the end of a run.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Styled CLI output helpers.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Success line, green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Error line, red with a cross, on stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Warning line, yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Info line, cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Unstyled line.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Bold section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Yellow `[DRY RUN]` notice.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Progress bar for the file move loop.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:30.green/white}] {pos}/{len} files")
                .expect("Invalid progress bar template")
                .progress_chars("=> "),
        );
        pb
    }

    /// Per-category summary, one indented line per category.
    ///
    /// Categories are sorted by name so output stays stable across runs.
    pub fn summary_table(category_counts: &HashMap<String, usize>, total_files: usize) {
        Self::header("Summary");

        let mut categories: Vec<_> = category_counts.iter().collect();
        categories.sort_by_key(|&(name, _)| name);

        let width = categories
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Total".len());

        for (category, count) in &categories {
            println!(
                "  {:<width$}  {} {}",
                category,
                count.to_string().green(),
                pluralize_files(**count),
                width = width
            );
        }

        println!("  {}", "-".repeat(width + 10));
        println!(
            "  {:<width$}  {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            pluralize_files(total_files),
            width = width
        );
    }
}

fn pluralize_files(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
