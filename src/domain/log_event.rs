use super::log_source::{INTERNAL_TAG, LogSource};

/// A single event handed to the forwarding pipeline.
///
/// `level` is on the host's 0..=7 scale; values above 7 are clamped when the
/// record is built, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: u8,
    pub tag: String,
    pub message: String,
    pub source: LogSource,
}

impl LogEvent {
    pub fn new(
        level: u8,
        tag: impl Into<String>,
        message: impl Into<String>,
        source: LogSource,
    ) -> Self {
        Self {
            level,
            tag: tag.into(),
            message: message.into(),
            source,
        }
    }

    pub fn logger(level: u8, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(level, tag, message, LogSource::Logger)
    }

    pub fn direct(level: u8, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(level, tag, message, LogSource::Direct)
    }

    pub fn internal(level: u8, message: impl Into<String>) -> Self {
        Self::new(level, INTERNAL_TAG, message, LogSource::Internal)
    }
}
