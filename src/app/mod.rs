pub mod config;
pub mod logging_system;
pub mod relay;

pub use config::{CONFIG_ENV, Config, ConfigError, LogLevel, StoreBackend};
pub use logging_system::{LogDirective, LoggingError, LoggingSystem, setup_logging_safe};
pub use relay::run_relay;

use crate::domain::ForwarderError;
use crate::host::{LogCallbacks, SyslogLayer};
use crate::pipeline::{ForwardingPipeline, PipelineConfig, SharedPipeline};
use crate::sender::{TransportFactory, UdpTransportFactory};
use crate::store::{FileFilterStore, FilterStore, MemoryFilterStore, StoreError};
use clap::CommandFactory;
use std::future::Future;
use std::process;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{error, info};

pub struct App {
    config: Config,
    pipeline: SharedPipeline,
    callbacks: LogCallbacks,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, ForwarderError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::load(args)?;
        Self::from_config(config)
    }

    /// Builds the UDP-backed pipeline and attaches it to a fresh callback
    /// registry.
    pub fn from_config(config: Config) -> Result<Self, ForwarderError> {
        Self::with_factory(config, Box::new(UdpTransportFactory))
    }

    pub fn with_factory(
        config: Config,
        factory: Box<dyn TransportFactory>,
    ) -> Result<Self, ForwarderError> {
        let store = build_store(&config)?;
        let pipeline =
            ForwardingPipeline::new(PipelineConfig::from(&config), factory, store).into_shared();

        let mut callbacks = LogCallbacks::new();
        let handler = pipeline.clone();
        callbacks.register(move |level, tag, message| {
            handler.lock().on_logger_line(level, tag, message);
        });

        Ok(Self {
            config,
            pipeline,
            callbacks,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> SharedPipeline {
        self.pipeline.clone()
    }

    /// Installs the global subscriber, bridging foreign `tracing` events into
    /// the pipeline when `forward_tracing` is set.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        let bridge = self
            .config
            .forward_tracing
            .then(|| SyslogLayer::new(self.pipeline.clone()));
        setup_logging_safe(self.config.log_level, bridge)
    }

    /// Relays stdin until EOF or Ctrl+C.
    pub async fn run(self) -> Result<(), ForwarderError> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_with(stdin, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    pub async fn run_with<R, F>(mut self, reader: R, shutdown: F) -> Result<(), ForwarderError>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        info!(
            "Starting rask-syslog-forwarder v{} -> {}:{} as {}",
            get_version(),
            self.config.address,
            self.config.port,
            self.config.client_id()
        );
        self.pipeline.lock().setup();

        run_relay(reader, &mut self.callbacks, &self.config.default_tag, shutdown).await?;

        let stats = self.pipeline.lock().stats();
        info!(
            sent = stats.records_sent,
            failed = stats.send_failures,
            dropped = stats.total_dropped(),
            "rask-syslog-forwarder stopped"
        );
        Ok(())
    }
}

fn build_store(config: &Config) -> Result<Box<dyn FilterStore>, ForwarderError> {
    let state_path = || {
        config
            .state_path
            .clone()
            .ok_or_else(|| StoreError::Unavailable("no state path configured".to_string()))
    };

    let store: Box<dyn FilterStore> = match config.store {
        StoreBackend::Memory => Box::new(MemoryFilterStore::new()),
        StoreBackend::File => Box::new(FileFilterStore::new(state_path()?)),
        #[cfg(feature = "sled-store")]
        StoreBackend::Sled => Box::new(crate::store::SledFilterStore::open(state_path()?)?),
        #[cfg(not(feature = "sled-store"))]
        StoreBackend::Sled => {
            return Err(StoreError::Unavailable(
                "built without the 'sled-store' feature".to_string(),
            )
            .into());
        }
    };
    Ok(store)
}

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args: Vec<String> = std::env::args().collect();

    // Handle version flag specially
    if args.len() > 1 && (args[1] == "--version" || args[1] == "-V") {
        println!("rask-syslog-forwarder {}", get_version());
        return Ok(());
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        Config::command().print_help()?;
        return Ok(());
    }

    let app = match App::from_args(args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = app.init_logging() {
        eprintln!("Logging setup failed: {e}");
    }

    if let Err(e) = app.run().await {
        error!("Application error: {}", e);
        process::exit(1);
    }

    Ok(())
}
