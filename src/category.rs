//! Extension-based file categorization.
//!
//! A [`CategoryTable`] is an ordered rulebook mapping file extensions to
//! named categories. Order matters: when the same extension appears under
//! two categories, the earlier category wins, so classification stays
//! deterministic no matter how the table was assembled.
//!
//! # Examples
//!
//! ```
//! use sortdown::category::CategoryTable;
//! use std::path::Path;
//!
//! let table = CategoryTable::default();
//! assert_eq!(table.classify(Path::new("photo.JPG")), Some("Images"));
//! assert_eq!(table.classify(Path::new("notes.xyz")), None);
//! assert_eq!(table.dir_name_for(Path::new("notes.xyz")), "Other");
//! ```

use std::path::Path;

/// Destination directory for files matching no category.
pub const FALLBACK_DIR: &str = "Other";

/// A named bucket of related file extensions.
///
/// Extensions are normalized on construction: lowercase, with a leading
/// dot, so `"PDF"`, `".pdf"` and `"pdf"` all describe the same rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    extensions: Vec<String>,
}

impl Category {
    /// Creates a category from a name and any iterable of extensions.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            extensions: extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
        }
    }

    /// The category name, used verbatim as the subdirectory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized extensions this category claims.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn matches(&self, normalized_ext: &str) -> bool {
        self.extensions.iter().any(|e| e == normalized_ext)
    }
}

/// Lowercases an extension and ensures the leading dot.
fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

/// An ordered list of categories with first-match extension lookup.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Creates a table from an already ordered list of categories.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The categories in lookup order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns the name of the first category claiming the extension of
    /// `path`, or `None` when nothing matches.
    ///
    /// Matching is case-insensitive. Files without an extension (including
    /// dotfiles like `.gitignore`) never match.
    pub fn classify(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?;
        let needle = format!(".{}", ext.to_string_lossy().to_lowercase());
        self.categories
            .iter()
            .find(|c| c.matches(&needle))
            .map(|c| c.name())
    }

    /// The destination directory name for `path`: the matching category,
    /// or [`FALLBACK_DIR`] when nothing matches.
    pub fn dir_name_for(&self, path: &Path) -> &str {
        self.classify(path).unwrap_or(FALLBACK_DIR)
    }
}

impl Default for CategoryTable {
    /// The built-in rulebook.
    fn default() -> Self {
        Self::new(vec![
            Category::new(
                "Images",
                [".jpeg", ".jpg", ".png", ".gif", ".bmp", ".svg", ".tiff"],
            ),
            Category::new(
                "Documents",
                [
                    ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt",
                    ".pptx",
                ],
            ),
            Category::new("Archives", [".zip", ".rar", ".7z", ".tar", ".gz"]),
            Category::new("Audio", [".mp3", ".wav", ".aac", ".flac", ".ogg"]),
            Category::new("Video", [".mp4", ".mov", ".avi", ".mkv", ".webm"]),
            Category::new("Scripts", [".py", ".js", ".html", ".css", ".sh", ".bat"]),
            Category::new("Executables", [".exe", ".msi", ".dmg"]),
        ])
    }
}
