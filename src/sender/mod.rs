pub mod stats;
pub mod udp;

pub use stats::{DropReason, ForwardingStats, StatsSnapshot};
pub use udp::{UdpTransport, UdpTransportFactory, resolve_server};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to parse server IP address '{address}'")]
    AddressParse { address: String },
    #[error("Failed to create UDP socket: {0}")]
    Create(#[source] std::io::Error),
    #[error("Failed to send {bytes} byte record: {source}")]
    Send {
        bytes: usize,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Setup-phase errors put the pipeline into its failed state; send errors
    /// only lose the one record.
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            TransportError::AddressParse { .. } | TransportError::Create(_)
        )
    }
}

/// A connected, fire-and-forget datagram sink.
pub trait Transport: Send {
    fn send(&mut self, record: &[u8]) -> Result<(), TransportError>;
}

/// Acquires a transport for a server address and port.
pub trait TransportFactory: Send {
    fn connect(&self, address: &str, port: u16) -> Result<Box<dyn Transport>, TransportError>;
}
