//! Syslog wire format: host level to priority mapping and record encoding.
//!
//! Records follow the RFC 5424 layout with nil timestamp, procid and msgid:
//! `<PRI>1 - CLIENT_ID TAG - - - BOM PAYLOAD`.

pub mod priority;
pub mod record;

pub use priority::{MAX_HOST_LEVEL, to_priority};
pub use record::{BOM, RecordFormatter, encode, strip_color_codes};
