//! TOML configuration: category table overrides and file filtering.
//!
//! Configuration is optional; with no file present the built-in category
//! table is used and only hidden files are filtered out.
//!
//! # Configuration File Format
//!
//! ```toml
//! [[categories]]
//! name = "Images"
//! extensions = [".jpg", ".png"]
//!
//! [[categories]]
//! name = "Documents"
//! extensions = [".pdf", ".txt"]
//!
//! [filters]
//! include_hidden_files = false
//!
//! [filters.exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["crdownload"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//! ```
//!
//! When `[[categories]]` entries are present they replace the built-in
//! table entirely, in file order, keeping first-match lookup
//! deterministic.

use crate::category::{Category, CategoryTable};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or compiling configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist.
    NotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    Malformed(String),
    /// A glob pattern failed to compile.
    BadGlobPattern(String),
    /// A regex pattern failed to compile.
    BadRegexPattern { pattern: String, reason: String },
    /// IO error while reading the file.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Malformed(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::BadGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::BadRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Category table override. Empty means "use the built-in table".
    #[serde(default)]
    pub categories: Vec<CategorySpec>,

    /// File filtering rules.
    #[serde(default)]
    pub filters: FilterRules,
}

/// One category entry in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Rules deciding which files an organization pass may touch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether dotfiles are organized too. Off by default so the
    /// configuration file itself is never swept into a category folder.
    /// Set to `true` to have hidden files classified and moved like any
    /// other file (dotfiles without a recognized extension then land in
    /// `Other`).
    #[serde(default)]
    pub include_hidden_files: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,

    #[serde(default)]
    pub include: IncludeRules,
}

/// Exclusion rules: any match keeps the file in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames (e.g. ".DS_Store").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns (e.g. "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions without the dot (e.g. "crdownload"), case-insensitive.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the filename.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Whitelist rules that override every exclusion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Config {
    /// Loads configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, when given (missing file is then an error)
    /// 2. `.sortdownrc.toml` in the current directory
    /// 3. `~/.config/sortdown/config.toml`
    /// 4. built-in defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local = PathBuf::from(".sortdownrc.toml");
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sortdown")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Builds the category table: the configured one when `[[categories]]`
    /// entries exist, the built-in rulebook otherwise.
    pub fn category_table(&self) -> CategoryTable {
        if self.categories.is_empty() {
            CategoryTable::default()
        } else {
            CategoryTable::new(
                self.categories
                    .iter()
                    .map(|spec| Category::new(&spec.name, &spec.extensions))
                    .collect(),
            )
        }
    }

    /// Compiles the filter rules into matchers.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex pattern is invalid.
    pub fn compile_filters(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(&self.filters)
    }
}

/// Filter rules pre-compiled into matchers so each file is checked
/// without reparsing patterns.
pub struct CompiledFilters {
    include_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: &FilterRules) -> Result<Self, ConfigError> {
        let compile_globs = |patterns: &[String]| -> Result<Vec<Pattern>, ConfigError> {
            patterns
                .iter()
                .map(|p| Pattern::new(p).map_err(|_| ConfigError::BadGlobPattern(p.clone())))
                .collect()
        };

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::BadRegexPattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_hidden_files: rules.include_hidden_files,
            exclude_filenames: rules.exclude.filenames.iter().cloned().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns: compile_globs(&rules.exclude.patterns)?,
            exclude_regexes,
            include_patterns: compile_globs(&rules.include.patterns)?,
        })
    }

    /// Whether an organization pass may touch this file.
    ///
    /// Include patterns win over everything; then hidden files, exact
    /// filenames, extensions, globs and regexes exclude in that order.
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self
            .include_patterns
            .iter()
            .any(|p| p.matches_path(file_path))
        {
            return true;
        }

        if !self.include_hidden_files && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self
            .exclude_patterns
            .iter()
            .any(|p| p.matches_path(file_path))
        {
            return false;
        }

        if self.exclude_regexes.iter().any(|r| r.is_match(&file_name)) {
            return false;
        }

        true
    }
}
