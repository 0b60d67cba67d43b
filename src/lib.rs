#![deny(rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_lossless,           // Infallible casts are clear enough with `as`
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. FilterStore in store module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod app;
pub mod domain;
pub mod filter;
pub mod host;
pub mod pipeline;
pub mod prefix;
pub mod sender;
pub mod store;
pub mod syslog;
pub mod testing;

// Re-export main types for easy access
pub use app::{App, Config};
pub use domain::{ForwarderError, LogEvent, LogSource};
pub use filter::{FilterMode, FilterSet};
pub use pipeline::{ForwardingPipeline, PipelineConfig, PipelineState, SharedPipeline};
pub use syslog::RecordFormatter;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
