use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Unknown value '{0}', valid options are NONE, ERROR, WARN, INFO, CONFIG, DEBUG, VERBOSE, VERY_VERBOSE."
)]
pub struct UnknownHostLevel(pub String);

/// The host's log level scale. Higher values are more verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum HostLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Config = 4,
    Debug = 5,
    Verbose = 6,
    VeryVerbose = 7,
}

impl HostLevel {
    pub const ALL: [HostLevel; 8] = [
        HostLevel::None,
        HostLevel::Error,
        HostLevel::Warn,
        HostLevel::Info,
        HostLevel::Config,
        HostLevel::Debug,
        HostLevel::Verbose,
        HostLevel::VeryVerbose,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a raw level, clamping anything above `VeryVerbose`.
    pub fn from_u8(level: u8) -> Self {
        Self::ALL[usize::from(level.min(7))]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostLevel::None => "NONE",
            HostLevel::Error => "ERROR",
            HostLevel::Warn => "WARN",
            HostLevel::Info => "INFO",
            HostLevel::Config => "CONFIG",
            HostLevel::Debug => "DEBUG",
            HostLevel::Verbose => "VERBOSE",
            HostLevel::VeryVerbose => "VERY_VERBOSE",
        }
    }

    /// Letter code used in formatted host lines, e.g. `D` in `[D][wifi:12]`.
    pub fn letter(&self) -> &'static str {
        match self {
            HostLevel::None => "",
            HostLevel::Error => "E",
            HostLevel::Warn => "W",
            HostLevel::Info => "I",
            HostLevel::Config => "C",
            HostLevel::Debug => "D",
            HostLevel::Verbose => "V",
            HostLevel::VeryVerbose => "VV",
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "E" => Some(HostLevel::Error),
            "W" => Some(HostLevel::Warn),
            "I" => Some(HostLevel::Info),
            "C" => Some(HostLevel::Config),
            "D" => Some(HostLevel::Debug),
            "V" => Some(HostLevel::Verbose),
            "VV" => Some(HostLevel::VeryVerbose),
            _ => None,
        }
    }
}

impl FromStr for HostLevel {
    type Err = UnknownHostLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(HostLevel::None),
            "ERROR" => Ok(HostLevel::Error),
            "WARN" | "WARNING" => Ok(HostLevel::Warn),
            "INFO" => Ok(HostLevel::Info),
            "CONFIG" => Ok(HostLevel::Config),
            "DEBUG" => Ok(HostLevel::Debug),
            "VERBOSE" => Ok(HostLevel::Verbose),
            "VERY_VERBOSE" => Ok(HostLevel::VeryVerbose),
            _ => Err(UnknownHostLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for HostLevel {
    type Error = UnknownHostLevel;

    fn try_from(value: String) -> Result<Self, UnknownHostLevel> {
        value.parse()
    }
}

impl From<HostLevel> for String {
    fn from(level: HostLevel) -> Self {
        level.as_str().to_string()
    }
}

impl From<tracing::Level> for HostLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => HostLevel::Error,
            tracing::Level::WARN => HostLevel::Warn,
            tracing::Level::INFO => HostLevel::Info,
            tracing::Level::DEBUG => HostLevel::Debug,
            _ => HostLevel::Verbose,
        }
    }
}

impl fmt::Display for HostLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
