//! Folder file-name search.
//!
//! This crate provides the file-search half of the plugin: a recursive scan
//! of a base folder matching file names against keyword tokens, with an
//! optional extension allow-list and a display cap on results.
//!
//! Matching is a raw substring test over the file name — deliberately
//! case-sensitive, unlike the attribute search. See [`matcher`] for the
//! exact rules.

pub mod error;
pub mod matcher;
pub mod scan;

// Re-export main types
pub use error::{FileSearchError, Result};
pub use matcher::{ExtensionFilter, NameMatcher, TokenJoin};
pub use scan::{scan_folder, ScanOutcome, MAX_DISPLAYED};
