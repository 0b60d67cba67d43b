use super::{Config, ConfigError, StoreBackend};

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Syslog server address must not be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidConfig(
                "Syslog server port must be greater than 0".to_string(),
            ));
        }

        if self.default_tag.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Default tag must not be empty".to_string(),
            ));
        }

        if self.store != StoreBackend::Memory && self.state_path.is_none() {
            return Err(ConfigError::InvalidConfig(format!(
                "The {:?} filter store requires a state path",
                self.store
            )));
        }

        if self.store == StoreBackend::Sled && !cfg!(feature = "sled-store") {
            return Err(ConfigError::InvalidConfig(
                "The sled filter store requires the 'sled-store' feature".to_string(),
            ));
        }

        Ok(())
    }
}
