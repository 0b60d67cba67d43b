//! Adapters for the host logging subsystem that feeds the pipeline.
//!
//! - `HostLevel`: the host's 8-level scale
//! - `line`: parser for formatted host log lines (`[D][wifi:123]: ...`)
//! - `LogCallbacks`: FIFO callback registry the host emits into
//! - `SyslogLayer`: bridges `tracing` events into a shared pipeline

pub mod callbacks;
pub mod layer;
pub mod level;
pub mod line;

pub use callbacks::{CallbackHandle, LogCallback, LogCallbacks};
pub use layer::SyslogLayer;
pub use level::{HostLevel, UnknownHostLevel};
pub use line::{HostLine, LineError, parse_line};
