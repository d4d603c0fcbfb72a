//! Glob-like task name patterns
//!
//! `*` matches any run of characters, including none. Everything else is
//! literal, and a pattern must cover the whole name.

use regex::Regex;

use crate::error::{Result, RunAllError};

/// Wildcard marker
const WILDCARD: char = '*';

/// A compiled task name pattern
#[derive(Debug, Clone)]
pub enum Pattern {
    /// No wildcard, compared verbatim
    Exact(String),
    /// Anchored regex built from the wildcard pattern
    Wildcard(Regex),
}

impl Pattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self> {
        if !pattern.contains(WILDCARD) {
            return Ok(Self::Exact(pattern.to_string()));
        }

        let body = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        // (?s) so `*` spans newlines as well
        Regex::new(&format!("^(?s:{body})$"))
            .map(Self::Wildcard)
            .map_err(|source| RunAllError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Check whether `name` satisfies this pattern
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Wildcard(re) => re.is_match(name),
        }
    }
}

/// One-shot match of `pattern` against `name`.
///
/// A pattern too large to compile matches nothing.
pub fn matches(pattern: &str, name: &str) -> bool {
    match Pattern::new(pattern) {
        Ok(p) => p.matches(name),
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    }
}
