use crate::sender::Transport;
use std::fmt;

/// Observable lifecycle of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    /// Globally disabled; nothing is sent and no transport is held.
    Disabled,
    /// Enabled but `setup()` has not produced a transport yet.
    Disconnected,
    Connected,
    /// The last `setup()` failed. Stays here until reconfigured.
    Failed { reason: String },
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Disabled => "disabled",
            PipelineState::Disconnected => "disconnected",
            PipelineState::Connected => "connected",
            PipelineState::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Failed { reason } => write!(f, "failed: {reason}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Internal state; the transport only exists while connected.
pub(crate) enum Lifecycle {
    Disabled,
    Disconnected,
    Connected(Box<dyn Transport>),
    Failed(String),
}

impl Lifecycle {
    pub(crate) fn state(&self) -> PipelineState {
        match self {
            Lifecycle::Disabled => PipelineState::Disabled,
            Lifecycle::Disconnected => PipelineState::Disconnected,
            Lifecycle::Connected(_) => PipelineState::Connected,
            Lifecycle::Failed(reason) => PipelineState::Failed {
                reason: reason.clone(),
            },
        }
    }

    /// Disabled and failed pipelines swallow every event.
    pub(crate) fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Disconnected | Lifecycle::Connected(_))
    }

    pub(crate) fn is_connected(&self) -> bool {
        matches!(self, Lifecycle::Connected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(PipelineState::Connected.to_string(), "connected");
        let failed = PipelineState::Failed {
            reason: "bad address".to_string(),
        };
        assert_eq!(failed.to_string(), "failed: bad address");
        assert_eq!(failed.as_str(), "failed");
    }

    #[test]
    fn test_lifecycle_activity() {
        assert!(Lifecycle::Disconnected.is_active());
        assert!(!Lifecycle::Disabled.is_active());
        assert!(!Lifecycle::Failed("x".to_string()).is_active());
        assert!(!Lifecycle::Disconnected.is_connected());
    }
}
