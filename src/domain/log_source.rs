use std::fmt;

/// Tag used for the forwarder's own status records.
///
/// Records carrying this exact tag bypass the direct-logging gate.
pub const INTERNAL_TAG: &str = "syslog";

/// Origin of a single log event. Recomputed per event, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSource {
    /// Forwarded from the host logging subsystem's callback.
    Logger,
    /// Emitted by a direct application call.
    Direct,
    /// The forwarder's own status messages.
    Internal,
}

impl LogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::Logger => "logger",
            LogSource::Direct => "direct",
            LogSource::Internal => "internal",
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
