use super::{ConfigError, LogLevel, StoreBackend};
use crate::filter::FilterMode;
use crate::host::HostLevel;
use crate::pipeline::{ConnectionSettings, DEFAULT_ADDRESS, DEFAULT_PORT, PipelineConfig};
use crate::prefix::normalize_token;
use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inline TOML configuration, used instead of CLI arguments when set.
pub const CONFIG_ENV: &str = "SYSLOG_FORWARDER_CONFIG";

const FALLBACK_CLIENT_ID: &str = "rask-syslog-forwarder";

#[derive(Parser, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(name = "rask-syslog-forwarder", author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Syslog server IPv4 or IPv6 address
    #[arg(long, env = "SYSLOG_ADDRESS", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// Syslog server UDP port
    #[arg(long, env = "SYSLOG_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Hostname field of every record (defaults to the machine host name)
    #[arg(long, env = "SYSLOG_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Forward lines received from the host logger
    #[arg(long, env = "SYSLOG_ENABLE_LOGGER", default_value_t = true, action = ArgAction::Set)]
    pub enable_logger: bool,

    /// Forward direct log calls
    #[arg(long, env = "SYSLOG_ENABLE_DIRECT_LOGS", default_value_t = true, action = ArgAction::Set)]
    pub enable_direct_logs: bool,

    /// Master switch for all forwarding
    #[arg(long, env = "SYSLOG_GLOBALLY_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub globally_enabled: bool,

    /// Strip host color codes from logger payloads
    #[arg(long, env = "SYSLOG_STRIP_COLORS", default_value_t = true, action = ArgAction::Set)]
    pub strip_colors: bool,

    /// Most verbose host level forwarded from the logger
    #[arg(long, env = "SYSLOG_MIN_LEVEL", default_value = "DEBUG")]
    pub min_level: HostLevel,

    /// include/exclude (true/false are accepted as aliases)
    #[arg(long, env = "SYSLOG_FILTER_MODE", default_value = "exclude")]
    pub filter_mode: FilterMode,

    /// Filter tags, used when no filter string is configured or saved
    #[arg(long = "filter", env = "SYSLOG_FILTERS", value_delimiter = ',')]
    pub filters: Vec<String>,

    /// Comma-separated filter tags; wins over saved state and --filter
    #[arg(long, env = "SYSLOG_FILTER_STRING", default_value = "")]
    pub filter_string: String,

    /// Prefix added to direct-call tags
    #[arg(long, env = "SYSLOG_DIRECT_PREFIX", default_value = "")]
    pub direct_prefix: String,

    /// Prefix added to logger-forwarded tags
    #[arg(long, env = "SYSLOG_LOGGER_PREFIX", default_value = "")]
    pub logger_prefix: String,

    /// Filter persistence location; selects the file store unless --store says otherwise
    #[arg(long, env = "SYSLOG_STATE_PATH")]
    pub state_path: Option<PathBuf>,

    /// Filter persistence backend
    #[arg(long, env = "SYSLOG_STORE", default_value = "memory")]
    pub store: StoreBackend,

    /// Tag for stdin lines that do not carry one
    #[arg(long, env = "SYSLOG_DEFAULT_TAG", default_value = "stdin")]
    pub default_tag: String,

    /// Also forward tracing events from other crates in this process
    #[arg(long, env = "SYSLOG_FORWARD_TRACING", default_value_t = false, action = ArgAction::Set)]
    pub forward_tracing: bool,

    /// Log level of the forwarder's own diagnostics
    #[arg(long, env = "SYSLOG_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Configuration file path (optional)
    #[arg(long, env = "SYSLOG_CONFIG_FILE")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            client_id: None,
            enable_logger: true,
            enable_direct_logs: true,
            globally_enabled: true,
            strip_colors: true,
            min_level: HostLevel::Debug,
            filter_mode: FilterMode::Exclude,
            filters: Vec::new(),
            filter_string: String::new(),
            direct_prefix: String::new(),
            logger_prefix: String::new(),
            state_path: None,
            store: StoreBackend::Memory,
            default_tag: "stdin".to_string(),
            forward_tracing: false,
            log_level: LogLevel::Info,
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut config = Config::try_parse_from(args)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the effective configuration: a `--config-file` wins, then
    /// inline TOML from [`CONFIG_ENV`], then CLI arguments and their env
    /// fallbacks.
    pub fn load<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Self::from_args(args)?;
        if let Some(path) = &config.config_file {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(inline) => Self::from_toml_str(&inline),
            Err(std::env::VarError::NotPresent) => Ok(config),
            Err(e) => Err(ConfigError::EnvError(format!("Invalid {CONFIG_ENV}: {e}"))),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn post_process(&mut self) -> Result<(), ConfigError> {
        self.address = self.address.trim().to_string();
        self.default_tag = self.default_tag.trim().to_string();

        let client_id = match self.client_id.take() {
            Some(id) if !id.trim().is_empty() => id,
            _ => detect_client_id(),
        };
        self.client_id = Some(normalize_token(&client_id));

        if self.state_path.is_some() && self.store == StoreBackend::Memory {
            self.store = StoreBackend::File;
        }

        Ok(())
    }

    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or(FALLBACK_CLIENT_ID)
    }
}

fn detect_client_id() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_CLIENT_ID.to_string())
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            connection: ConnectionSettings::new(
                config.address.as_str(),
                config.port,
                config.client_id(),
                config.min_level.as_u8(),
            ),
            enable_logger: config.enable_logger,
            enable_direct_logs: config.enable_direct_logs,
            globally_enabled: config.globally_enabled,
            strip_colors: config.strip_colors,
            filter_mode: config.filter_mode,
            filter_string: config.filter_string.clone(),
            filters: config.filters.clone(),
            direct_prefix: config.direct_prefix.clone(),
            logger_prefix: config.logger_prefix.clone(),
        }
    }
}
