//! # Custom-Node Matching
//!
//! Users flag plan nodes as "custom" (hidden or highlighted by the viewer) by
//! storing a comma-separated pattern list under `showCustomCookie`. For each
//! node the rendering layer supplies three candidate strings (typically id,
//! label and node type) and asks whether any pattern applies.
//!
//! ## Patterns
//!
//! - A **literal** pattern (no `*`) matches when it equals a candidate or is
//!   a substring of one. The empty pattern is a substring of everything.
//! - A **wildcard** pattern is split at every `*` into ordered fragments.
//!   Empty fragments are skipped; each remaining fragment is tested as a
//!   substring of the candidates.
//!
//! ## Reduction
//!
//! How individual outcomes combine is controlled by [`MatchMode`]:
//!
//! - [`MatchMode::Overwrite`] (default) keeps the viewer's historical
//!   behaviour: both the pattern loop and the fragment loop overwrite a
//!   running boolean, so the *last* pattern (and within a wildcard pattern,
//!   the last non-empty fragment) decides. `"foo,xyz"` against `foo` is
//!   therefore `false`.
//! - [`MatchMode::Accumulate`] is the corrected reading: any pattern may
//!   match, and a wildcard pattern needs every fragment present.
//!
//! Both modes answer `false` for an absent or empty list and for patterns
//! made only of `*`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

pub const WILDCARD: char = '*';
pub const PATTERN_DELIMITER: char = ',';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Last outcome wins, in both the pattern loop and the fragment loop.
    #[default]
    Overwrite,
    /// OR across patterns, AND across the fragments of a wildcard pattern.
    Accumulate,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Overwrite => "overwrite",
            MatchMode::Accumulate => "accumulate",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(MatchMode::Overwrite),
            "accumulate" => Ok(MatchMode::Accumulate),
            other => Err(format!(
                "Unknown match mode: {} (expected overwrite or accumulate)",
                other
            )),
        }
    }
}

/// The three strings a node is matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates<'a>([&'a str; 3]);

impl<'a> Candidates<'a> {
    pub fn new(first: &'a str, second: &'a str, third: &'a str) -> Self {
        Self([first, second, third])
    }

    pub fn any_equals(&self, pattern: &str) -> bool {
        self.0.iter().any(|c| *c == pattern)
    }

    pub fn any_contains(&self, fragment: &str) -> bool {
        self.0.iter().any(|c| c.contains(fragment))
    }
}

impl<'a> From<[&'a str; 3]> for Candidates<'a> {
    fn from(values: [&'a str; 3]) -> Self {
        Self(values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Literal(String),
    /// Fragments between wildcards, empty ones included.
    Wildcard(Vec<String>),
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        if raw.contains(WILDCARD) {
            Pattern::Wildcard(raw.split(WILDCARD).map(str::to_string).collect())
        } else {
            Pattern::Literal(raw.to_string())
        }
    }

    pub fn matches(&self, candidates: &Candidates<'_>, mode: MatchMode) -> bool {
        match self {
            Pattern::Literal(literal) => {
                candidates.any_equals(literal) || candidates.any_contains(literal)
            }
            Pattern::Wildcard(fragments) => reduce_fragments(fragments, candidates, mode),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(literal) => f.write_str(literal),
            Pattern::Wildcard(fragments) => f.write_str(&fragments.join("*")),
        }
    }
}

fn reduce_fragments(fragments: &[String], candidates: &Candidates<'_>, mode: MatchMode) -> bool {
    let mut outcomes = fragments
        .iter()
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| candidates.any_contains(fragment))
        .peekable();

    // no non-empty fragments: nothing was tested
    if outcomes.peek().is_none() {
        return false;
    }

    match mode {
        MatchMode::Overwrite => outcomes.last().unwrap_or(false),
        MatchMode::Accumulate => outcomes.all(|found| found),
    }
}

/// Tests a pattern as wildcard fragments against three candidates (default
/// mode). A pattern without `*` is one fragment; an empty one records nothing.
pub fn matches_wildcard_pattern(pattern: &str, first: &str, second: &str, third: &str) -> bool {
    let fragments: Vec<String> = pattern.split(WILDCARD).map(str::to_string).collect();
    reduce_fragments(
        &fragments,
        &Candidates::new(first, second, third),
        MatchMode::Overwrite,
    )
}

/// A parsed custom-node pattern list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomNodes {
    patterns: Vec<Pattern>,
}

impl CustomNodes {
    /// Splits on commas. Empty entries are kept as empty literal patterns;
    /// an empty string yields no patterns at all.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        Self {
            patterns: raw.split(PATTERN_DELIMITER).map(Pattern::parse).collect(),
        }
    }

    pub fn from_preference(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_custom_node(&self, first: &str, second: &str, third: &str) -> bool {
        self.matches(&Candidates::new(first, second, third), MatchMode::Overwrite)
    }

    pub fn matches(&self, candidates: &Candidates<'_>, mode: MatchMode) -> bool {
        let mut is_custom = false;
        for pattern in &self.patterns {
            let matched = pattern.matches(candidates, mode);
            trace!(%pattern, matched, "custom pattern evaluated");
            match mode {
                MatchMode::Overwrite => is_custom = matched,
                MatchMode::Accumulate => is_custom |= matched,
            }
        }
        is_custom
    }
}
