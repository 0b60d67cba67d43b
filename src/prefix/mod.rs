//! Source classification and tag prefixing.

use crate::domain::{INTERNAL_TAG, LogSource};
use std::borrow::Cow;

const PREFIX_TERMINATOR: &str = ": ";

/// Trims `value` and replaces internal spaces with underscores.
///
/// Used for values that become a single token of the wire record.
pub fn normalize_token(value: &str) -> String {
    value.trim().replace(' ', "_")
}

/// Normalizes a configured prefix so it always ends with `": "`.
///
/// Empty (or whitespace-only) input means "no prefix" and stays empty.
pub fn normalize_prefix(prefix: &str) -> String {
    let mut normalized = normalize_token(prefix);
    if normalized.is_empty() {
        return normalized;
    }

    // Trimming already removed any trailing space of a ": " terminator.
    if normalized.ends_with(':') {
        normalized.push(' ');
    } else {
        normalized.push_str(PREFIX_TERMINATOR);
    }
    normalized
}

/// Prefixes applied to direct-call and logger-forwarded tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixConfig {
    direct_prefix: String,
    logger_prefix: String,
}

impl PrefixConfig {
    pub fn new(direct_prefix: &str, logger_prefix: &str) -> Self {
        Self {
            direct_prefix: normalize_prefix(direct_prefix),
            logger_prefix: normalize_prefix(logger_prefix),
        }
    }

    pub fn direct_prefix(&self) -> &str {
        &self.direct_prefix
    }

    pub fn logger_prefix(&self) -> &str {
        &self.logger_prefix
    }

    pub fn set_direct_prefix(&mut self, prefix: &str) {
        self.direct_prefix = normalize_prefix(prefix);
    }

    pub fn set_logger_prefix(&mut self, prefix: &str) {
        self.logger_prefix = normalize_prefix(prefix);
    }

    /// Prefix configured for `source`; internal records are never prefixed.
    pub fn prefix_for(&self, source: LogSource) -> &str {
        match source {
            LogSource::Direct => &self.direct_prefix,
            LogSource::Logger => &self.logger_prefix,
            LogSource::Internal => "",
        }
    }

    /// Infers the origin of a tag from the prefixes it already carries.
    pub fn classify(&self, tag: &str) -> LogSource {
        if !self.direct_prefix.is_empty() && tag.starts_with(&self.direct_prefix) {
            LogSource::Direct
        } else if !self.logger_prefix.is_empty() && tag.starts_with(&self.logger_prefix) {
            LogSource::Logger
        } else if tag == INTERNAL_TAG {
            LogSource::Internal
        } else {
            LogSource::Direct
        }
    }

    /// Prepends the source's prefix unless `tag` already starts with it.
    pub fn apply<'a>(&self, tag: &'a str, source: LogSource) -> Cow<'a, str> {
        let prefix = self.prefix_for(source);
        if prefix.is_empty() || tag.starts_with(prefix) {
            Cow::Borrowed(tag)
        } else {
            Cow::Owned(format!("{prefix}{tag}"))
        }
    }
}
