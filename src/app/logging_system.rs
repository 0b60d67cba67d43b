use super::config::LogLevel;
use crate::host::SyslogLayer;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log level '{input}'. Valid levels: error, warn, info, debug, trace")]
    InvalidLogLevel { input: String },

    #[error("Invalid directive format '{input}'. Expected: 'target=level'")]
    InvalidDirectiveFormat { input: String },

    #[error("Empty target in directive '{input}'")]
    EmptyTarget { input: String },

    #[error("Logging system initialization failed: {details}")]
    InitFailed { details: String },
}

pub fn parse_level(input: &str) -> Result<LogLevel, LoggingError> {
    match input.trim().to_lowercase().as_str() {
        "error" => Ok(LogLevel::Error),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        _ => Err(LoggingError::InvalidLogLevel {
            input: input.to_string(),
        }),
    }
}

/// A single `target=level` entry of the subscriber's filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDirective {
    pub target: String,
    pub level: LogLevel,
}

impl LogDirective {
    pub fn new(target: impl Into<String>, level: LogLevel) -> Self {
        Self {
            target: target.into(),
            level,
        }
    }

    pub fn parse(directive: &str) -> Result<Self, LoggingError> {
        let Some((target, level)) = directive.split_once('=') else {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: directive.to_string(),
            });
        };
        if level.contains('=') {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: directive.to_string(),
            });
        }

        let target = target.trim();
        if target.is_empty() {
            return Err(LoggingError::EmptyTarget {
                input: directive.to_string(),
            });
        }

        Ok(LogDirective::new(target, parse_level(level)?))
    }

    pub fn to_filter_string(&self) -> String {
        format!("{}={}", self.target, self.level.as_str())
    }
}

/// Collects filter directives and installs the process-wide subscriber.
pub struct LoggingSystem {
    directives: Arc<RwLock<Vec<LogDirective>>>,
    fallback_level: LogLevel,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: Arc::new(RwLock::new(Vec::new())),
            fallback_level: LogLevel::Info,
        }
    }

    /// Adds a directive. Malformed directives are skipped and an unknown
    /// level falls back to the default one; neither is an error.
    pub fn add_directive(&self, directive_str: &str) {
        match LogDirective::parse(directive_str) {
            Ok(directive) => self.directives.write().push(directive),
            Err(LoggingError::InvalidLogLevel { .. }) => {
                eprintln!("Warning: invalid level in '{directive_str}', using default level");
                let target = directive_str.split('=').next().unwrap_or("unknown").trim();
                self.directives
                    .write()
                    .push(LogDirective::new(target, self.fallback_level));
            }
            Err(e) => eprintln!("Warning: {e}, skipping directive"),
        }
    }

    /// Quiets noisy dependencies that would otherwise flood the relay output.
    pub fn add_default_directives(&self) {
        let mut directives = self.directives.write();
        for target in ["tokio", "mio", "sled"] {
            directives.push(LogDirective::new(target, LogLevel::Warn));
        }
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();
        let mut parts = Vec::with_capacity(directives.len() + 1);
        parts.push(default_level.as_str().to_string());
        parts.extend(directives.iter().map(LogDirective::to_filter_string));
        parts.join(",")
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }

    /// Installs a compact stderr `fmt` layer, plus `syslog_layer` when given,
    /// as the global default subscriber.
    pub fn initialize_tracing(
        &self,
        default_level: LogLevel,
        syslog_layer: Option<SyslogLayer>,
    ) -> Result<(), LoggingError> {
        let filter_string = self.build_filter_string(default_level);
        let env_filter =
            EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::InitFailed {
                details: format!("Failed to create EnvFilter with '{filter_string}': {e}"),
            })?;

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .compact(),
            )
            .with(syslog_layer);

        tracing::subscriber::set_global_default(subscriber).map_err(|e| {
            LoggingError::InitFailed {
                details: format!("Failed to set global tracing subscriber: {e}"),
            }
        })
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs logging once per process. Later calls return the first outcome.
pub fn setup_logging_safe(
    level: LogLevel,
    syslog_layer: Option<SyslogLayer>,
) -> Result<(), LoggingError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.get_or_init(|| {
        let logging_system = LoggingSystem::new();
        logging_system.add_default_directives();
        logging_system
            .initialize_tracing(level, syslog_layer)
            .map_err(|e| e.to_string())
    })
    .clone()
    .map_err(|details| LoggingError::InitFailed { details })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directive() {
        let directive = LogDirective::parse("sled=warn").unwrap();
        assert_eq!(directive, LogDirective::new("sled", LogLevel::Warn));
        assert_eq!(directive.to_filter_string(), "sled=warn");

        assert!(matches!(
            LogDirective::parse("no_level"),
            Err(LoggingError::InvalidDirectiveFormat { .. })
        ));
        assert!(matches!(
            LogDirective::parse("=info"),
            Err(LoggingError::EmptyTarget { .. })
        ));
        assert!(matches!(
            LogDirective::parse("a=b=c"),
            Err(LoggingError::InvalidDirectiveFormat { .. })
        ));
    }

    #[test]
    fn test_parse_level_aliases() {
        assert_eq!(parse_level("WARNING").unwrap(), LogLevel::Warn);
        assert_eq!(parse_level(" trace ").unwrap(), LogLevel::Trace);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_invalid_directives_never_fail() {
        let logging_system = LoggingSystem::new();
        logging_system.add_directive("invalid");
        assert_eq!(logging_system.directive_count(), 0);

        logging_system.add_directive("relay=loud");
        assert_eq!(logging_system.directive_count(), 1);
        assert_eq!(
            logging_system.build_filter_string(LogLevel::Debug),
            "debug,relay=info"
        );
    }

    #[test]
    fn test_default_directives() {
        let logging_system = LoggingSystem::new();
        logging_system.add_default_directives();
        let filter = logging_system.build_filter_string(LogLevel::Info);
        assert!(filter.starts_with("info,"));
        assert!(filter.contains("tokio=warn"));
        assert!(filter.contains("sled=warn"));
    }
}
