use rask_syslog_forwarder::app::{CONFIG_ENV, Config, ConfigError, LogLevel, StoreBackend};
use rask_syslog_forwarder::filter::FilterMode;
use rask_syslog_forwarder::host::HostLevel;
use rask_syslog_forwarder::pipeline::PipelineConfig;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

// Helper function to clean all environment variables before and after tests
fn clean_all_env_vars() {
    let env_vars = [
        CONFIG_ENV,
        "SYSLOG_ADDRESS",
        "SYSLOG_PORT",
        "SYSLOG_CLIENT_ID",
        "SYSLOG_FILTER_MODE",
        "SYSLOG_FILTERS",
        "SYSLOG_FILTER_STRING",
        "SYSLOG_MIN_LEVEL",
        "SYSLOG_STATE_PATH",
        "SYSLOG_STORE",
        "SYSLOG_LOG_LEVEL",
        "SYSLOG_CONFIG_FILE",
    ];

    unsafe {
        for var in &env_vars {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_defaults() {
    clean_all_env_vars();
    let config = Config::from_args(["rask-syslog-forwarder"]).unwrap();

    assert_eq!(config.address, "255.255.255.255");
    assert_eq!(config.port, 514);
    assert!(config.enable_logger);
    assert!(config.enable_direct_logs);
    assert!(config.globally_enabled);
    assert!(config.strip_colors);
    assert_eq!(config.min_level, HostLevel::Debug);
    assert_eq!(config.filter_mode, FilterMode::Exclude);
    assert_eq!(config.store, StoreBackend::Memory);
    assert_eq!(config.default_tag, "stdin");
    assert_eq!(config.log_level, LogLevel::Info);
    // Falls back to the host name when not configured.
    assert!(!config.client_id().is_empty());
    assert!(!config.client_id().contains(' '));
}

#[test]
#[serial]
fn test_config_from_args() {
    clean_all_env_vars();
    let args = [
        "rask-syslog-forwarder",
        "--address",
        "10.0.0.5",
        "--port",
        "1514",
        "--client-id",
        "living room",
        "--filter-mode",
        "TRUE",
        "--filter",
        "wifi,api",
        "--enable-logger",
        "false",
        "--min-level",
        "warn",
        "--logger-prefix",
        "esp",
    ];

    let config = Config::from_args(args).unwrap();
    assert_eq!(config.address, "10.0.0.5");
    assert_eq!(config.port, 1514);
    assert_eq!(config.client_id(), "living_room");
    assert_eq!(config.filter_mode, FilterMode::Include);
    assert_eq!(config.filters, vec!["wifi", "api"]);
    assert!(!config.enable_logger);
    assert_eq!(config.min_level, HostLevel::Warn);

    let pipeline = PipelineConfig::from(&config);
    assert_eq!(pipeline.connection.port, 1514);
    assert_eq!(pipeline.connection.min_log_level, 2);
    assert_eq!(pipeline.connection.client_id(), "living_room");
    assert_eq!(pipeline.logger_prefix, "esp");
}

#[test]
#[serial]
fn test_config_from_environment() {
    clean_all_env_vars();
    unsafe {
        env::set_var("SYSLOG_PORT", "6514");
        env::set_var("SYSLOG_FILTER_STRING", "sensor, wifi");
        env::set_var("SYSLOG_MIN_LEVEL", "VERY_VERBOSE");
    }

    let config = Config::from_args(["rask-syslog-forwarder"]).unwrap();
    assert_eq!(config.port, 6514);
    assert_eq!(config.filter_string, "sensor, wifi");
    assert_eq!(config.min_level, HostLevel::VeryVerbose);

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_invalid_arguments_are_rejected() {
    clean_all_env_vars();
    assert!(Config::from_args(["rask-syslog-forwarder", "--port", "0"]).is_err());
    assert!(Config::from_args(["rask-syslog-forwarder", "--filter-mode", "maybe"]).is_err());
    assert!(Config::from_args(["rask-syslog-forwarder", "--min-level", "LOUD"]).is_err());
}

#[test]
fn test_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("forwarder.toml");
    let state_path = temp_dir.path().join("state/filter");
    let content = format!(
        r#"
address = "192.168.1.20"
port = 6514
client_id = "garage"
filter_mode = "include"
filter_string = "sensor"
min_level = "INFO"
strip_colors = false
state_path = "{}"
"#,
        state_path.display()
    );
    std::fs::write(&config_path, content).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.address, "192.168.1.20");
    assert_eq!(config.port, 6514);
    assert_eq!(config.client_id(), "garage");
    assert_eq!(config.filter_mode, FilterMode::Include);
    assert_eq!(config.min_level, HostLevel::Info);
    assert!(!config.strip_colors);
    // A state path alone selects the file store.
    assert_eq!(config.store, StoreBackend::File);
    assert_eq!(config.state_path.as_deref(), Some(state_path.as_path()));
    // Unlisted keys keep their defaults.
    assert!(config.enable_direct_logs);
}

#[test]
fn test_invalid_file_values() {
    let result = Config::from_toml_str(r#"filter_mode = "sometimes""#);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));

    let result = Config::from_toml_str("port = 0");
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));

    let result = Config::from_file("/nonexistent/forwarder.toml");
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}

#[test]
#[serial]
fn test_inline_config_env_overrides_args() {
    clean_all_env_vars();
    unsafe {
        env::set_var(CONFIG_ENV, "address = \"10.1.1.1\"\nport = 5514\n");
    }

    let config = Config::load(["rask-syslog-forwarder", "--port", "9999"]).unwrap();
    assert_eq!(config.address, "10.1.1.1");
    assert_eq!(config.port, 5514);

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_config_file_argument_wins() {
    clean_all_env_vars();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("forwarder.toml");
    std::fs::write(&config_path, "port = 7514\n").unwrap();

    let config = Config::load([
        "rask-syslog-forwarder".to_string(),
        "--config-file".to_string(),
        config_path.display().to_string(),
    ])
    .unwrap();
    assert_eq!(config.port, 7514);
}
