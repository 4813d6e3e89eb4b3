//! Moving files into category subdirectories.
//!
//! This module provides the move primitive used by a single organization
//! pass, the precondition check on the target directory, and the report
//! type summarizing what a pass did. One failed move never aborts the
//! batch; the caller records it in the report and moves on.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while organizing a directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target path does not exist or is not a directory. Fatal:
    /// checked before any file is touched.
    NotADirectory { path: PathBuf },
    /// Failed to list the target directory.
    ReadDirFailed { path: PathBuf, source: io::Error },
    /// Failed to create a category subdirectory.
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    /// Failed to move one file. Per-file and recoverable.
    FileMoveFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

impl OrganizeError {
    /// True when the failure means the file disappeared between the
    /// directory listing and the move (e.g. a download manager finished
    /// and relocated it). Treated as a skip, not an error.
    pub fn is_vanished_file(&self) -> bool {
        matches!(
            self,
            Self::FileMoveFailed { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADirectory { path } => {
                write!(f, "Target path is not a directory: {}", path.display())
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotADirectory { .. } => None,
            Self::ReadDirFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::FileMoveFailed { source, .. } => Some(source),
        }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Summary of one organization pass.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// Number of files moved into each category directory.
    pub moved: HashMap<String, usize>,
    /// Files that vanished before they could be moved.
    pub skipped: Vec<PathBuf>,
    /// Files whose move failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl OrganizeReport {
    /// Records a successful move into `category_dir`.
    pub fn record_move(&mut self, category_dir: &str) {
        *self.moved.entry(category_dir.to_string()).or_insert(0) += 1;
    }

    /// Total number of files moved across all categories.
    pub fn total_moved(&self) -> usize {
        self.moved.values().sum()
    }

    /// True when every scanned file was moved.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// The move primitive behind an organization pass.
pub struct Organizer;

impl Organizer {
    /// Fatal precondition: the target must be an existing directory.
    ///
    /// Called once before any work; a failure here means nothing was
    /// created or moved.
    pub fn check_target(target: &Path) -> OrganizeResult<()> {
        if target.is_dir() {
            Ok(())
        } else {
            Err(OrganizeError::NotADirectory {
                path: target.to_path_buf(),
            })
        }
    }

    /// Moves `file_path` into `<base>/<category_dir>/`, creating the
    /// category directory if needed (idempotent), and returns the
    /// destination path.
    ///
    /// The move is a same-filesystem `rename`; whatever atomicity and
    /// overwrite behavior the platform gives `rename` is what callers
    /// get. Errors are per-file and should be tolerated by the caller.
    pub fn move_to_category(
        base: &Path,
        file_path: &Path,
        category_dir: &str,
    ) -> OrganizeResult<PathBuf> {
        let category_path = base.join(category_dir);

        fs::create_dir_all(&category_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: category_path.clone(),
            source: e,
        })?;

        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailed {
                from: file_path.to_path_buf(),
                to: category_path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "file has no name component"),
            })?;

        let destination = category_path.join(file_name);

        fs::rename(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailed {
            from: file_path.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;

        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_target_accepts_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(Organizer::check_target(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_check_target_rejects_missing_path() {
        let result = Organizer::check_target(Path::new("/non/existent/path"));
        assert!(matches!(result, Err(OrganizeError::NotADirectory { .. })));
    }

    #[test]
    fn test_check_target_rejects_regular_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("a-file.txt");
        fs::write(&file_path, "not a directory").expect("Failed to write test file");

        assert!(Organizer::check_target(&file_path).is_err());
    }

    #[test]
    fn test_move_creates_category_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let file_path = base.join("report.pdf");
        fs::write(&file_path, "pdf data").expect("Failed to write test file");

        let destination = Organizer::move_to_category(base, &file_path, "Documents")
            .expect("Failed to move file");

        assert!(base.join("Documents").is_dir());
        assert!(!file_path.exists());
        assert_eq!(destination, base.join("Documents").join("report.pdf"));
        assert!(destination.exists());
    }

    #[test]
    fn test_move_uses_existing_category_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).expect("Failed to create category directory");

        let file_path = base.join("photo.png");
        fs::write(&file_path, "png data").expect("Failed to write test file");

        Organizer::move_to_category(base, &file_path, "Images").expect("Failed to move file");

        assert!(base.join("Images").join("photo.png").exists());
    }

    #[test]
    fn test_move_of_vanished_file_is_detectable() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let gone = base.join("already-gone.txt");

        let err = Organizer::move_to_category(base, &gone, "Documents")
            .expect_err("Moving a missing file should fail");

        assert!(err.is_vanished_file());
    }

    #[test]
    fn test_report_counts_moves_per_category() {
        let mut report = OrganizeReport::default();
        report.record_move("Images");
        report.record_move("Images");
        report.record_move("Other");

        assert_eq!(report.moved.get("Images"), Some(&2));
        assert_eq!(report.moved.get("Other"), Some(&1));
        assert_eq!(report.total_moved(), 3);
        assert!(report.is_clean());
    }
}
