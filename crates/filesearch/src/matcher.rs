//! Token and extension matching for file names.

use std::path::Path;

use crate::error::{FileSearchError, Result};

// ---------------------------------------------------------------------------
// Token join
// ---------------------------------------------------------------------------

/// How multiple keyword tokens combine when matching a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenJoin {
    /// Every token must appear in the name.
    #[default]
    All,
    /// At least one token must appear in the name.
    Any,
}

// ---------------------------------------------------------------------------
// Extension allow-list
// ---------------------------------------------------------------------------

/// Case-insensitive extension allow-list.
///
/// An empty filter matches every file. Extensions are stored normalized:
/// trimmed, lowercased, leading dot stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Parses a free-text, comma-separated extension list.
    ///
    /// Entries are trimmed, lowercased, and stripped of a leading dot.
    /// Empty entries are dropped and duplicates removed, keeping first
    /// occurrence order.
    pub fn parse(raw: &str) -> Self {
        let mut extensions: Vec<String> = Vec::new();
        for part in raw.split(',') {
            let normalized = part.trim().to_lowercase();
            let normalized = normalized.trim_start_matches('.');
            if normalized.is_empty() || extensions.iter().any(|e| e.as_str() == normalized) {
                continue;
            }
            extensions.push(normalized.to_string());
        }
        Self { extensions }
    }

    /// Returns true if no extensions are configured (match everything).
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Returns the normalized extension list.
    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if the path's extension is allowed.
    ///
    /// The comparison is case-insensitive. A file without an extension only
    /// matches an empty filter.
    pub fn matches(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Name matcher
// ---------------------------------------------------------------------------

/// File-name matcher over one or more keyword tokens.
///
/// Matching is a raw, case-sensitive substring test over the file name.
/// The attribute search lowercases both sides before comparing; this one
/// intentionally does not.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    tokens: Vec<String>,
    join: TokenJoin,
}

impl NameMatcher {
    /// Builds a matcher from raw keyword tokens.
    ///
    /// Tokens are trimmed and empty ones dropped; an empty remainder is
    /// rejected with [`FileSearchError::NoKeywordProvided`].
    pub fn new<I, S>(tokens: I, join: TokenJoin) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Err(FileSearchError::NoKeywordProvided);
        }

        Ok(Self { tokens, join })
    }

    /// Returns the tokens this matcher looks for.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns true if the file name satisfies the token set under the
    /// configured join.
    pub fn matches(&self, name: &str) -> bool {
        match self.join {
            TokenJoin::All => self.tokens.iter().all(|t| name.contains(t.as_str())),
            TokenJoin::Any => self.tokens.iter().any(|t| name.contains(t.as_str())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_filter_normalizes_entries() {
        let filter = ExtensionFilter::parse(" PDF, .png , jpg,, pdf ,TIFF");
        assert_eq!(filter.as_slice(), ["pdf", "png", "jpg", "tiff"]);
    }

    #[test]
    fn empty_extension_filter_matches_everything() {
        let filter = ExtensionFilter::parse("  ,  ");
        assert!(filter.is_empty());
        assert!(filter.matches(&PathBuf::from("anything.xyz")));
        assert!(filter.matches(&PathBuf::from("no_extension")));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let filter = ExtensionFilter::parse("pdf");
        assert!(filter.matches(&PathBuf::from("report.PDF")));
        assert!(filter.matches(&PathBuf::from("report.pdf")));
        assert!(!filter.matches(&PathBuf::from("report.txt")));
        assert!(!filter.matches(&PathBuf::from("report")));
    }

    #[test]
    fn single_token_substring() {
        let matcher = NameMatcher::new(["park"], TokenJoin::All).unwrap();
        assert!(matcher.matches("parklist.pdf"));
        assert!(!matcher.matches("central.pdf"));
    }

    #[test]
    fn two_tokens_all_requires_both() {
        let matcher = NameMatcher::new(["park", "2024"], TokenJoin::All).unwrap();
        assert!(matcher.matches("park-2024-map.pdf"));
        assert!(!matcher.matches("park-map.pdf"));
        assert!(!matcher.matches("2024-map.pdf"));
    }

    #[test]
    fn two_tokens_any_requires_one() {
        let matcher = NameMatcher::new(["park", "2024"], TokenJoin::Any).unwrap();
        assert!(matcher.matches("park-map.pdf"));
        assert!(matcher.matches("2024-map.pdf"));
        assert!(!matcher.matches("river-map.pdf"));
    }

    /// File-name matching is case-sensitive, unlike the attribute search.
    /// This asymmetry mirrors the observed behavior of the plugin and is
    /// kept deliberately.
    #[test]
    fn file_match_is_case_sensitive() {
        let matcher = NameMatcher::new(["Park"], TokenJoin::All).unwrap();
        assert!(matcher.matches("Parklist.pdf"));
        assert!(!matcher.matches("parklist.pdf"));
    }

    #[test]
    fn blank_tokens_are_rejected() {
        let err = NameMatcher::new(["  ", ""], TokenJoin::All).unwrap_err();
        assert!(matches!(err, FileSearchError::NoKeywordProvided));
    }

    #[test]
    fn tokens_are_trimmed() {
        let matcher = NameMatcher::new(["  park  "], TokenJoin::All).unwrap();
        assert_eq!(matcher.tokens(), ["park"]);
        assert!(matcher.matches("parklist.pdf"));
    }
}
