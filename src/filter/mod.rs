//! Tag filtering with include/exclude semantics.
//!
//! A filter is configured from a raw comma-separated string such as
//! `"wifi, api,sensor"`. Decisions are made on the *component name* of a tag,
//! i.e. everything before its first `:` (`"wifi:connecting"` -> `"wifi"`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raw filter value that matches every possible tag (case-insensitive).
pub const ALL_SENTINEL: &str = "all";

const TOKEN_WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Filter mode must be either 'include', 'exclude', true (include), or false (exclude), got '{0}'"
)]
pub struct FilterModeParseError(pub String);

/// Whether the tag set lists what to forward or what to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterMode {
    /// Forward only tags whose component is listed.
    Include,
    /// Forward everything except listed components.
    #[default]
    Exclude,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Include => "include",
            FilterMode::Exclude => "exclude",
        }
    }

    pub fn is_include(&self) -> bool {
        matches!(self, FilterMode::Include)
    }
}

impl FromStr for FilterMode {
    type Err = FilterModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "include" | "true" => Ok(FilterMode::Include),
            "exclude" | "false" => Ok(FilterMode::Exclude),
            _ => Err(FilterModeParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for FilterMode {
    type Error = FilterModeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the substring of `tag` before its first `:`, or the whole tag.
pub fn extract_component_name(tag: &str) -> &str {
    tag.split_once(':').map_or(tag, |(component, _)| component)
}

/// Returns true when the whole raw filter string is the `all` sentinel.
pub fn is_all_sentinel(raw: &str) -> bool {
    raw.trim_matches(TOKEN_WHITESPACE)
        .eq_ignore_ascii_case(ALL_SENTINEL)
}

/// Splits a raw filter string into its trimmed, non-empty tokens.
///
/// Malformed input never errors: empty tokens are silently skipped. The `all`
/// sentinel yields no tags.
pub fn parse_tags(raw: &str) -> HashSet<String> {
    if is_all_sentinel(raw) {
        return HashSet::new();
    }

    raw.split(',')
        .map(|token| token.trim_matches(TOKEN_WHITESPACE))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parsed filter configuration: mode, the raw string it came from, and the
/// derived tag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    mode: FilterMode,
    raw: String,
    tags: HashSet<String>,
}

impl FilterSet {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            raw: String::new(),
            tags: HashSet::new(),
        }
    }

    pub fn parse(raw: &str, mode: FilterMode) -> Self {
        Self {
            mode,
            raw: raw.to_string(),
            tags: parse_tags(raw),
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    /// Replaces the raw string and rebuilds the tag set from scratch.
    pub fn replace_raw(&mut self, raw: &str) {
        self.raw = raw.to_string();
        self.tags = parse_tags(raw);
    }

    /// Decides whether a record with `tag` should be forwarded.
    ///
    /// The raw `all` sentinel wins over the tag set. An empty tag set passes
    /// everything in exclude mode and nothing in include mode; tags added
    /// with [`add`](Self::add) count even when the raw string is empty.
    pub fn should_pass(&self, tag: &str) -> bool {
        if is_all_sentinel(&self.raw) {
            return self.mode.is_include();
        }

        // Nothing configured: include lists nothing, exclude drops nothing.
        if self.tags.is_empty() {
            return !self.mode.is_include();
        }

        let listed = self.tags.contains(extract_component_name(tag));
        match self.mode {
            FilterMode::Include => listed,
            FilterMode::Exclude => !listed,
        }
    }

    /// Inserts a single tag without touching the raw string.
    pub fn add(&mut self, tag: &str) -> bool {
        self.tags.insert(tag.to_string())
    }

    /// Removes a single tag without touching the raw string.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Drops every tag and resets the raw string.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.raw.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Tags in lexical order, for display and stable comparisons.
    pub fn sorted_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.tags.iter().cloned().collect();
        tags.sort();
        tags
    }
}
