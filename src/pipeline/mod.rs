//! The forwarding pipeline: gates, filter, prefix, priority, format, send.
//!
//! A `ForwardingPipeline` owns its filter, prefixes, connection settings and
//! transport. It is driven synchronously; callers that share it across
//! threads wrap it in a [`SharedPipeline`].

pub mod settings;
pub mod state;

pub use settings::{ConnectionSettings, DEFAULT_ADDRESS, DEFAULT_PORT, PipelineConfig};
pub use state::PipelineState;

use crate::domain::{INTERNAL_TAG, LogEvent, LogSource};
use crate::filter::{FilterMode, FilterSet};
use crate::host::HostLevel;
use crate::prefix::PrefixConfig;
use crate::sender::{DropReason, ForwardingStats, StatsSnapshot, TransportFactory};
use crate::store::FilterStore;
use crate::syslog::{RecordFormatter, encode, to_priority};
use parking_lot::Mutex;
use state::Lifecycle;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

pub type SharedPipeline = Arc<Mutex<ForwardingPipeline>>;

/// Called with the current raw filter string after every filter mutation.
pub type FilterObserver = Box<dyn FnMut(&str) + Send>;

pub struct ForwardingPipeline {
    settings: ConnectionSettings,
    prefixes: PrefixConfig,
    filters: FilterSet,
    formatter: RecordFormatter,
    enable_logger: bool,
    enable_direct_logs: bool,
    lifecycle: Lifecycle,
    factory: Box<dyn TransportFactory>,
    store: Box<dyn FilterStore>,
    observer: Option<FilterObserver>,
    stats: ForwardingStats,
}

impl ForwardingPipeline {
    pub fn new(
        config: PipelineConfig,
        factory: Box<dyn TransportFactory>,
        store: Box<dyn FilterStore>,
    ) -> Self {
        let filters = initial_filters(&config, store.as_ref());
        let lifecycle = if config.globally_enabled {
            Lifecycle::Disconnected
        } else {
            Lifecycle::Disabled
        };

        Self {
            settings: config.connection,
            prefixes: PrefixConfig::new(&config.direct_prefix, &config.logger_prefix),
            filters,
            formatter: RecordFormatter::new(config.strip_colors),
            enable_logger: config.enable_logger,
            enable_direct_logs: config.enable_direct_logs,
            lifecycle,
            factory,
            store,
            observer: None,
            stats: ForwardingStats::new(),
        }
    }

    pub fn into_shared(self) -> SharedPipeline {
        Arc::new(Mutex::new(self))
    }

    /// Acquires a transport for the current address and port.
    ///
    /// Any held transport is released first. Failures land in
    /// [`PipelineState::Failed`]; inspect [`state`](Self::state) afterwards.
    pub fn setup(&mut self) {
        if matches!(self.lifecycle, Lifecycle::Disabled) {
            warn!("Syslog forwarding is globally disabled, skipping setup");
            return;
        }

        self.lifecycle = Lifecycle::Disconnected;
        match self
            .factory
            .connect(&self.settings.address, self.settings.port)
        {
            Ok(transport) => {
                self.lifecycle = Lifecycle::Connected(transport);
                let message = format!(
                    "Started with server: {} -> {}",
                    self.settings.address, self.settings.port
                );
                self.status(HostLevel::Info, &message);
            }
            Err(e) => {
                error!(
                    address = %self.settings.address,
                    port = self.settings.port,
                    "Syslog setup failed: {}", e
                );
                self.lifecycle = Lifecycle::Failed(e.to_string());
            }
        }
    }

    pub fn state(&self) -> PipelineState {
        self.lifecycle.state()
    }

    pub fn is_setup(&self) -> bool {
        self.lifecycle.is_connected()
    }

    pub fn is_globally_enabled(&self) -> bool {
        !matches!(self.lifecycle, Lifecycle::Disabled)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    pub fn prefixes(&self) -> &PrefixConfig {
        &self.prefixes
    }

    pub fn enable_logger(&self) -> bool {
        self.enable_logger
    }

    pub fn enable_direct_logs(&self) -> bool {
        self.enable_direct_logs
    }

    pub fn strip_colors(&self) -> bool {
        self.formatter.strip_colors()
    }

    // Event entry points

    /// Forwards one event through the gates, filter, prefix and formatter.
    pub fn log(&mut self, level: u8, tag: &str, payload: &str, source: LogSource) {
        let sanitize = matches!(source, LogSource::Logger);
        self.forward(level, tag, payload, source, sanitize);
    }

    fn forward(
        &mut self,
        level: u8,
        tag: &str,
        payload: &str,
        source: LogSource,
        sanitize: bool,
    ) {
        if !self.lifecycle.is_active() {
            self.stats.record_drop(DropReason::Inactive);
            return;
        }

        let source_disabled = match source {
            LogSource::Direct => !self.enable_direct_logs && tag != INTERNAL_TAG,
            LogSource::Logger => !self.enable_logger,
            LogSource::Internal => false,
        };
        if source_disabled {
            self.stats.record_drop(DropReason::SourceDisabled);
            return;
        }

        // Filtering sees the tag before any prefix is applied.
        if !self.filters.should_pass(tag) {
            trace!(tag, "Record filtered");
            self.stats.record_drop(DropReason::Filtered);
            return;
        }

        let tag = self.prefixes.apply(tag, source);
        let priority = to_priority(level);
        let payload = if sanitize {
            self.formatter.sanitize(payload)
        } else {
            payload
        };

        let Lifecycle::Connected(transport) = &mut self.lifecycle else {
            warn!(tag = %tag, "Syslog transport not set up, dropping record");
            self.stats.record_drop(DropReason::NotConnected);
            return;
        };

        let record = encode(priority, self.settings.client_id(), &tag, payload);
        match transport.send(&record) {
            Ok(()) => self.stats.record_sent(record.len()),
            Err(e) => {
                warn!("Failed to send syslog record: {}", e);
                self.stats.record_send_failure();
            }
        }
    }

    /// Handler for the host logger callback.
    pub fn on_logger_line(&mut self, level: u8, tag: &str, message: &str) {
        if level > self.settings.min_log_level {
            self.stats.record_drop(DropReason::BelowMinLevel);
            return;
        }
        self.log(level, tag, message, LogSource::Logger);
    }

    /// Handler for events bridged from `tracing`.
    ///
    /// Goes through the same gates as host logger lines, but the payload is
    /// never color-stripped since tracing messages carry no host color codes.
    pub fn on_tracing_event(&mut self, level: u8, tag: &str, message: &str) {
        if level > self.settings.min_log_level {
            self.stats.record_drop(DropReason::BelowMinLevel);
            return;
        }
        self.forward(level, tag, message, LogSource::Logger, false);
    }

    /// Logs with the source inferred from the prefixes the tag already carries.
    pub fn log_classified(&mut self, level: u8, tag: &str, payload: &str) {
        let source = self.prefixes.classify(tag);
        self.log(level, tag, payload, source);
    }

    pub fn handle(&mut self, event: &LogEvent) {
        match event.source {
            LogSource::Logger => self.on_logger_line(event.level, &event.tag, &event.message),
            source => self.log(event.level, &event.tag, &event.message, source),
        }
    }

    // Connection settings

    pub fn set_server_ip(&mut self, address: &str) {
        if self.settings.address == address {
            return;
        }
        let old = std::mem::replace(&mut self.settings.address, address.to_string());
        if self.reconnect_if_needed() {
            let message = format!("Syslog server IP updated: {old} -> {address}");
            self.status(HostLevel::Info, &message);
        }
    }

    pub fn set_server_port(&mut self, port: u16) {
        if self.settings.port == port {
            return;
        }
        let old = std::mem::replace(&mut self.settings.port, port);
        if self.reconnect_if_needed() {
            let message = format!("Syslog server port updated: {old} -> {port}");
            self.status(HostLevel::Info, &message);
        }
    }

    pub fn set_client_id(&mut self, client_id: &str) {
        let old = self.settings.client_id().to_string();
        self.settings.set_client_id(client_id);
        if old != self.settings.client_id() {
            let message = format!("Client ID updated: {old} -> {}", self.settings.client_id());
            self.status(HostLevel::Info, &message);
        }
    }

    pub fn set_min_log_level(&mut self, level: u8) {
        if self.settings.min_log_level == level {
            return;
        }
        let old = HostLevel::from_u8(self.settings.min_log_level);
        self.settings.min_log_level = level;
        let message = format!(
            "Minimum log level updated: {old} -> {}",
            HostLevel::from_u8(level)
        );
        self.status(HostLevel::Info, &message);
    }

    pub fn set_prefixes(&mut self, direct_prefix: &str, logger_prefix: &str) {
        let updated = PrefixConfig::new(direct_prefix, logger_prefix);
        if updated == self.prefixes {
            return;
        }
        self.prefixes = updated;
        let message = format!(
            "Prefixes updated: direct '{}', logger '{}'",
            self.prefixes.direct_prefix(),
            self.prefixes.logger_prefix()
        );
        self.status(HostLevel::Info, &message);
    }

    // Enable flags

    pub fn set_enable_logger_messages(&mut self, enabled: bool) {
        if self.enable_logger == enabled {
            return;
        }
        let message = format!(
            "Logger messages forwarding: {} -> {}",
            on_off(self.enable_logger),
            on_off(enabled)
        );
        self.status(HostLevel::Info, &message);
        self.enable_logger = enabled;
    }

    pub fn set_enable_direct_logs(&mut self, enabled: bool) {
        if self.enable_direct_logs == enabled {
            return;
        }
        let message = format!(
            "Direct logs: {} -> {}",
            on_off(self.enable_direct_logs),
            on_off(enabled)
        );
        self.status(HostLevel::Info, &message);
        self.enable_direct_logs = enabled;
    }

    pub fn set_strip_colors(&mut self, strip_colors: bool) {
        if self.formatter.strip_colors() == strip_colors {
            return;
        }
        let message = format!(
            "Strip colors: {} -> {}",
            on_off(self.formatter.strip_colors()),
            on_off(strip_colors)
        );
        self.status(HostLevel::Info, &message);
        self.formatter.set_strip_colors(strip_colors);
    }

    /// Disabling releases the transport; enabling runs `setup()` again.
    pub fn set_globally_enabled(&mut self, enabled: bool) {
        if self.is_globally_enabled() == enabled {
            return;
        }
        if enabled {
            self.lifecycle = Lifecycle::Disconnected;
            self.setup();
            self.status(HostLevel::Info, "Syslog globally enabled");
        } else {
            self.status(HostLevel::Info, "Syslog globally disabled");
            self.lifecycle = Lifecycle::Disabled;
        }
    }

    // Filters

    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        if self.filters.mode() == mode {
            return;
        }
        let message = format!("Filter mode: {} -> {}", self.filters.mode(), mode);
        self.status(HostLevel::Info, &message);
        self.filters.set_mode(mode);
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filters.mode()
    }

    /// Adds one tag to the active set. Returns `false` for blank or already
    /// listed tags.
    pub fn add_filter(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || !self.filters.add(tag) {
            return false;
        }
        let message = format!("Added filter: {tag}");
        self.status(HostLevel::Error, &message);
        self.notify_observer();
        true
    }

    pub fn remove_filter(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if !self.filters.remove(tag) {
            return false;
        }
        let message = format!("Removed filter: {tag}");
        self.status(HostLevel::Error, &message);
        self.notify_observer();
        true
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.persist_filter();
        self.notify_observer();
        self.status(HostLevel::Info, "All filters cleared");
    }

    /// Replaces the whole filter from a comma-separated string.
    pub fn set_filter_string(&mut self, raw: &str) {
        if self.filters.raw() == raw {
            return;
        }
        self.filters.replace_raw(raw);
        self.persist_filter();
        self.notify_observer();
        let message = format!("Filter string updated: '{raw}'");
        self.status(HostLevel::Info, &message);
    }

    pub fn filter_string(&self) -> &str {
        self.filters.raw()
    }

    pub fn has_filter(&self, tag: &str) -> bool {
        self.filters.contains(tag)
    }

    pub fn filters(&self) -> Vec<String> {
        self.filters.sorted_tags()
    }

    /// Installs the observer and immediately reports the current filter string.
    pub fn set_filter_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        let mut observer: FilterObserver = Box::new(observer);
        observer(self.filters.raw());
        self.observer = Some(observer);
    }

    // Internals

    /// Logs a status message locally and forwards it as an internal record.
    fn status(&mut self, level: HostLevel, message: &str) {
        match level {
            HostLevel::None | HostLevel::Error => error!("{}", message),
            HostLevel::Warn => warn!("{}", message),
            HostLevel::Info | HostLevel::Config => info!("{}", message),
            HostLevel::Debug => debug!("{}", message),
            HostLevel::Verbose | HostLevel::VeryVerbose => trace!("{}", message),
        }
        self.log(level.as_u8(), INTERNAL_TAG, message, LogSource::Internal);
    }

    /// Re-runs setup when a transport was held or had failed. Returns whether it ran.
    fn reconnect_if_needed(&mut self) -> bool {
        if !matches!(self.lifecycle, Lifecycle::Connected(_) | Lifecycle::Failed(_)) {
            return false;
        }
        self.setup();
        true
    }

    fn persist_filter(&mut self) {
        if let Err(e) = self.store.save_filter(self.filters.raw()) {
            warn!("Failed to save filter string: {}", e);
        }
    }

    fn notify_observer(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(self.filters.raw());
        }
    }
}

fn initial_filters(config: &PipelineConfig, store: &dyn FilterStore) -> FilterSet {
    if !config.filter_string.is_empty() {
        return FilterSet::parse(&config.filter_string, config.filter_mode);
    }

    match store.load_filter() {
        Ok(Some(saved)) => return FilterSet::parse(&saved, config.filter_mode),
        Ok(None) => {}
        Err(e) => warn!("Failed to load saved filter string: {}", e),
    }

    let mut filters = FilterSet::new(config.filter_mode);
    for tag in &config.filters {
        let tag = tag.trim();
        if !tag.is_empty() {
            filters.add(tag);
        }
    }
    filters
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}
