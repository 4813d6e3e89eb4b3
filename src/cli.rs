//! Command-line interface for sortdown.
//!
//! Parses arguments with clap and orchestrates a run: resolve the target
//! directory, check the fatal precondition, load configuration, scan the
//! directory once, then either move files or report what would move.

use crate::category::CategoryTable;
use crate::config::{CompiledFilters, Config};
use crate::organizer::{OrganizeError, OrganizeReport, OrganizeResult, Organizer};
use crate::output::OutputFormatter;
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sort the files in a directory into category subfolders.
#[derive(Debug, Parser)]
#[command(name = "sortdown", version)]
pub struct Cli {
    /// Directory to organize. Defaults to ~/Downloads.
    pub directory: Option<PathBuf>,

    /// Show what would move without changing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a TOML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// The default target when no directory argument is given: the
/// Downloads folder under the user's home directory.
pub fn default_target() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join("Downloads"))
}

/// Runs one organization pass (or dry run) for the parsed arguments.
///
/// The precondition on the target directory is checked before any other
/// work; a failure there means nothing was created or moved.
pub fn run(cli: &Cli) -> Result<(), String> {
    let target = match &cli.directory {
        Some(dir) => dir.clone(),
        None => default_target()
            .ok_or_else(|| "No directory given and HOME is not set".to_string())?,
    };

    Organizer::check_target(&target).map_err(|e| e.to_string())?;

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile_filters()
        .map_err(|e| format!("Error compiling filters: {}", e))?;
    let table = config.category_table();

    let files = scan_files(&target, &filters).map_err(|e| e.to_string())?;

    if cli.dry_run {
        dry_run_pass(&target, &table, &files);
    } else {
        organize_pass(&target, &table, &files);
    }

    Ok(())
}

/// Lists the direct children of `target` that are regular files and pass
/// the filters. Entries that vanish mid-listing are silently skipped.
fn scan_files(target: &Path, filters: &CompiledFilters) -> OrganizeResult<Vec<PathBuf>> {
    let entries = fs::read_dir(target).map_err(|e| OrganizeError::ReadDirFailed {
        path: target.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
        {
            let path = entry.path();
            if filters.should_include(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Moves every scanned file into its category folder, tolerating
/// per-file failures, then prints the summary.
fn organize_pass(target: &Path, table: &CategoryTable, files: &[PathBuf]) {
    OutputFormatter::info(&format!("Organizing contents of: {}", target.display()));

    if files.is_empty() {
        OutputFormatter::plain("No files found to organize.");
        return;
    }

    let pb = OutputFormatter::create_progress_bar(files.len() as u64);
    let mut report = OrganizeReport::default();

    for path in files {
        let category_dir = table.dir_name_for(path);

        match Organizer::move_to_category(target, path, category_dir) {
            Ok(_) => {
                pb.println(format!(" - {} -> {}/", file_name_of(path), category_dir));
                report.record_move(category_dir);
            }
            Err(e) if e.is_vanished_file() => {
                pb.println(format!(
                    " - {} vanished before it could be moved, skipping",
                    file_name_of(path)
                ));
                report.skipped.push(path.clone());
            }
            Err(e) => {
                OutputFormatter::error(&e.to_string());
                report.failed.push((path.clone(), e.to_string()));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    OutputFormatter::summary_table(&report.moved, report.total_moved());

    if !report.skipped.is_empty() {
        OutputFormatter::warning(&format!(
            "Skipped {} file(s) that vanished during the run.",
            report.skipped.len()
        ));
    }
    if report.failed.is_empty() {
        OutputFormatter::success("Organization complete!");
    } else {
        OutputFormatter::warning(&format!(
            "Organization finished, but {} file(s) could not be moved:",
            report.failed.len()
        ));
        for (path, reason) in &report.failed {
            OutputFormatter::error(&format!("  {}: {}", path.display(), reason));
        }
    }
}

/// Same scan and classification as [`organize_pass`], without touching
/// the filesystem.
fn dry_run_pass(target: &Path, table: &CategoryTable, files: &[PathBuf]) {
    OutputFormatter::dry_run_notice(&format!("Analyzing contents of: {}", target.display()));

    if files.is_empty() {
        OutputFormatter::plain("No files found to organize.");
        return;
    }

    let mut category_counts: HashMap<String, usize> = HashMap::new();
    for path in files {
        let category_dir = table.dir_name_for(path);
        OutputFormatter::plain(&format!(
            " - {} -> would move to {}/",
            file_name_of(path),
            category_dir
        ));
        *category_counts.entry(category_dir.to_string()).or_insert(0) += 1;
    }

    OutputFormatter::summary_table(&category_counts, files.len());
    OutputFormatter::success("Dry run complete. No files were modified.");
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
