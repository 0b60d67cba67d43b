use crate::app::ConfigError;
use crate::app::logging_system::LoggingError;
use crate::sender::TransportError;
use crate::store::StoreError;
use thiserror::Error;

/// Top-level error type for the forwarder binary.
///
/// Per-record failures never surface here; they are logged and counted by the
/// pipeline. Only startup and shutdown problems propagate this far.
#[derive(Error, Debug)]
pub enum ForwarderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Filter store error: {0}")]
    Store(#[from] StoreError),

    #[error("Relay error: {0}")]
    Relay(#[from] std::io::Error),
}
