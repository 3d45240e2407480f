// ABOUTME: URL pattern matching for scoping selection rules to documents.
// ABOUTME: Supports exact-string and glob-star patterns compiled once into a reusable predicate.

//! URL pattern matching.
//!
//! Selection rules declare which documents they apply to via a URL pattern.
//! Two pattern forms are supported:
//!
//! - an exact string, matching only that URL;
//! - a glob-star pattern, where each `*` matches any run of characters
//!   (so a trailing `*` gives prefix matching).
//!
//! Patterns are compiled once at loader construction and reused for every
//! `load` call. An empty pattern is rejected at compile time rather than
//! silently matching nothing.

use regex::Regex;

use crate::error::ExtractError;

/// A compiled URL pattern predicate.
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    pattern: String,
    // None for exact-string patterns.
    regex: Option<Regex>,
}

impl UrlMatcher {
    /// Compiles a pattern into a matcher.
    ///
    /// Fails with [`ExtractError::InvalidPattern`] on malformed patterns.
    pub fn compile(pattern: &str) -> Result<Self, ExtractError> {
        if pattern.trim().is_empty() {
            return Err(ExtractError::invalid_pattern(
                pattern,
                "pattern must not be empty",
            ));
        }

        let regex = if pattern.contains('*') {
            let mut source = String::with_capacity(pattern.len() + 8);
            source.push('^');
            let mut first = true;
            for literal in pattern.split('*') {
                if !first {
                    source.push_str(".*");
                }
                source.push_str(&regex::escape(literal));
                first = false;
            }
            source.push('$');
            let regex = Regex::new(&source)
                .map_err(|e| ExtractError::invalid_pattern(pattern, e))?;
            Some(regex)
        } else {
            None
        };

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if the URL matches this pattern.
    pub fn matches(&self, url: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(url),
            None => self.pattern == url,
        }
    }

    /// The original pattern source.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
