//! sortdown - organize a directory's files into category subfolders.
//!
//! Classification is a single-pass, first-match lookup of each file's
//! extension against an ordered category table; anything unmatched lands
//! in the "Other" folder. One failed move never aborts the batch.

pub mod category;
pub mod cli;
pub mod config;
pub mod organizer;
pub mod output;

pub use category::{Category, CategoryTable, FALLBACK_DIR};
pub use config::{CompiledFilters, Config, ConfigError};
pub use organizer::{OrganizeError, OrganizeReport, Organizer};

pub use cli::{Cli, run};
