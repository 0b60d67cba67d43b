use crate::filter::FilterMode;
use crate::host::HostLevel;
use crate::prefix::normalize_token;

pub const DEFAULT_ADDRESS: &str = "255.255.255.255";
pub const DEFAULT_PORT: u16 = 514;

/// Where records go and how they are labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub address: String,
    pub port: u16,
    client_id: String,
    /// Most verbose host level still forwarded from the logger callback.
    pub min_log_level: u8,
}

impl ConnectionSettings {
    pub fn new(address: impl Into<String>, port: u16, client_id: &str, min_log_level: u8) -> Self {
        Self {
            address: address.into(),
            port,
            client_id: normalize_token(client_id),
            min_log_level,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn set_client_id(&mut self, client_id: &str) {
        self.client_id = normalize_token(client_id);
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, DEFAULT_PORT, "", HostLevel::Debug.as_u8())
    }
}

/// Everything needed to build a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub connection: ConnectionSettings,
    pub enable_logger: bool,
    pub enable_direct_logs: bool,
    pub globally_enabled: bool,
    pub strip_colors: bool,
    pub filter_mode: FilterMode,
    /// Takes precedence over both the saved value and `filters` when non-empty.
    pub filter_string: String,
    pub filters: Vec<String>,
    pub direct_prefix: String,
    pub logger_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings::default(),
            enable_logger: true,
            enable_direct_logs: true,
            globally_enabled: true,
            strip_colors: true,
            filter_mode: FilterMode::Exclude,
            filter_string: String::new(),
            filters: Vec::new(),
            direct_prefix: String::new(),
            logger_prefix: String::new(),
        }
    }
}
