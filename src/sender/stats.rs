// Lock-free forwarding statistics using atomic operations
//
// Every event handed to the pipeline ends up in exactly one bucket: sent,
// failed to send, or dropped by one of the gates in front of the transport.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Why an event never reached the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Pipeline disabled or failed.
    Inactive,
    /// Direct logging or logger forwarding switched off.
    SourceDisabled,
    /// Logger line more verbose than the configured minimum level.
    BelowMinLevel,
    /// Rejected by the tag filter.
    Filtered,
    /// Active but no transport acquired yet.
    NotConnected,
}

#[derive(Debug, Default)]
pub struct ForwardingStats {
    records_sent: AtomicU64,
    bytes_sent: AtomicU64,
    send_failures: AtomicU64,
    dropped_inactive: AtomicU64,
    dropped_source_disabled: AtomicU64,
    dropped_below_level: AtomicU64,
    dropped_filtered: AtomicU64,
    dropped_not_connected: AtomicU64,
}

impl ForwardingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sent(&self, bytes: usize) {
        self.records_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drop(&self, reason: DropReason) {
        let counter = match reason {
            DropReason::Inactive => &self.dropped_inactive,
            DropReason::SourceDisabled => &self.dropped_source_disabled,
            DropReason::BelowMinLevel => &self.dropped_below_level,
            DropReason::Filtered => &self.dropped_filtered,
            DropReason::NotConnected => &self.dropped_not_connected,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics (lock-free)
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            records_sent: self.records_sent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            dropped_inactive: self.dropped_inactive.load(Ordering::Relaxed),
            dropped_source_disabled: self.dropped_source_disabled.load(Ordering::Relaxed),
            dropped_below_level: self.dropped_below_level.load(Ordering::Relaxed),
            dropped_filtered: self.dropped_filtered.load(Ordering::Relaxed),
            dropped_not_connected: self.dropped_not_connected.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.records_sent,
            &self.bytes_sent,
            &self.send_failures,
            &self.dropped_inactive,
            &self.dropped_source_disabled,
            &self.dropped_below_level,
            &self.dropped_filtered,
            &self.dropped_not_connected,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub records_sent: u64,
    pub bytes_sent: u64,
    pub send_failures: u64,
    pub dropped_inactive: u64,
    pub dropped_source_disabled: u64,
    pub dropped_below_level: u64,
    pub dropped_filtered: u64,
    pub dropped_not_connected: u64,
}

impl StatsSnapshot {
    pub fn total_dropped(&self) -> u64 {
        self.dropped_inactive
            + self.dropped_source_disabled
            + self.dropped_below_level
            + self.dropped_filtered
            + self.dropped_not_connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = ForwardingStats::new();
        stats.record_sent(10);
        stats.record_sent(5);
        stats.record_send_failure();
        stats.record_drop(DropReason::Filtered);
        stats.record_drop(DropReason::Inactive);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.records_sent, 2);
        assert_eq!(snapshot.bytes_sent, 15);
        assert_eq!(snapshot.send_failures, 1);
        assert_eq!(snapshot.dropped_filtered, 1);
        assert_eq!(snapshot.total_dropped(), 2);
    }

    #[test]
    fn test_reset() {
        let stats = ForwardingStats::new();
        stats.record_sent(42);
        stats.record_drop(DropReason::BelowMinLevel);
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
