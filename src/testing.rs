//! In-memory transport for tests and dry runs.
//!
//! `RecordingFactory` validates addresses exactly like the UDP factory but
//! keeps every record in a shared list instead of sending it.

use crate::sender::{Transport, TransportError, TransportFactory, resolve_server};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub type Records = Arc<Mutex<Vec<Vec<u8>>>>;
pub type Connections = Arc<Mutex<Vec<(String, u16)>>>;

#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    records: Records,
    connections: Connections,
    fail_sends: Arc<AtomicBool>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Records {
        self.records.clone()
    }

    /// Every `(address, port)` a transport was acquired for, in order.
    pub fn connections(&self) -> Connections {
        self.connections.clone()
    }

    /// When set, every send on every transport from this factory fails.
    pub fn fail_sends_handle(&self) -> Arc<AtomicBool> {
        self.fail_sends.clone()
    }
}

impl TransportFactory for RecordingFactory {
    fn connect(&self, address: &str, port: u16) -> Result<Box<dyn Transport>, TransportError> {
        resolve_server(address, port)?;
        self.connections.lock().push((address.to_string(), port));
        Ok(Box::new(RecordingTransport {
            records: self.records.clone(),
            fail_sends: self.fail_sends.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct RecordingTransport {
    records: Records,
    fail_sends: Arc<AtomicBool>,
}

impl Transport for RecordingTransport {
    fn send(&mut self, record: &[u8]) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Send {
                bytes: record.len(),
                source: std::io::Error::other("send disabled"),
            });
        }
        self.records.lock().push(record.to_vec());
        Ok(())
    }
}
