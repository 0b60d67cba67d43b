//! Domain layer for rask-syslog-forwarder.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEvent`: a single `(level, tag, message, source)` event entering the pipeline
//! - `LogSource`: which subsystem produced an event (Logger/Direct/Internal)
//! - `ForwarderError`: Top-level error type

pub mod error;
pub mod log_event;
pub mod log_source;

pub use error::ForwarderError;
pub use log_event::LogEvent;
pub use log_source::{INTERNAL_TAG, LogSource};
