//! Prometheus metrics for request outcomes and collaborator latency.
//!
//! This module provides metrics for:
//! - Contact submissions and relay failures
//! - Status checks created
//! - Storage failures and latency
//! - Relay send latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Contact submissions accepted for processing.
pub const METRIC_CONTACTS_RECEIVED: &str = "contacts_received_total";
/// Contact submissions whose notification could not be relayed.
pub const METRIC_RELAY_FAILURES: &str = "contact_relay_failures_total";
/// Status checks created.
pub const METRIC_STATUS_CHECKS_CREATED: &str = "status_checks_created_total";
/// Storage operations that failed.
pub const METRIC_STORAGE_ERRORS: &str = "storage_errors_total";
/// Storage latency metric name.
pub const METRIC_STORAGE_LATENCY: &str = "storage_latency_ms";
/// Relay send latency metric name.
pub const METRIC_RELAY_LATENCY: &str = "relay_send_latency_ms";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Call this once at startup; the handle renders the scrape output.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        METRIC_CONTACTS_RECEIVED,
        "Total number of contact submissions received"
    );
    describe_counter!(
        METRIC_RELAY_FAILURES,
        "Total number of contact notifications the relay failed to deliver"
    );
    describe_counter!(
        METRIC_STATUS_CHECKS_CREATED,
        "Total number of status checks created"
    );
    describe_counter!(
        METRIC_STORAGE_ERRORS,
        "Total number of failed storage operations"
    );
    describe_histogram!(
        METRIC_STORAGE_LATENCY,
        "Storage operation latency in milliseconds"
    );
    describe_histogram!(
        METRIC_RELAY_LATENCY,
        "SMTP relay send latency in milliseconds"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Record storage operation latency.
pub fn record_storage_latency(start: Instant, operation: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_STORAGE_LATENCY, "operation" => operation).record(latency_ms);
}

/// Increment contact submissions counter.
pub fn inc_contacts_received() {
    counter!(METRIC_CONTACTS_RECEIVED).increment(1);
}

/// Increment relay failures counter.
pub fn inc_relay_failures() {
    counter!(METRIC_RELAY_FAILURES).increment(1);
}

/// Increment status checks counter.
pub fn inc_status_checks_created() {
    counter!(METRIC_STATUS_CHECKS_CREATED).increment(1);
}

/// Increment storage errors counter.
pub fn inc_storage_errors(operation: &'static str) {
    counter!(METRIC_STORAGE_ERRORS, "operation" => operation).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for relay sends.
pub fn timer_relay_send() -> LatencyTimer {
    LatencyTimer::new(METRIC_RELAY_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("test_metric");
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 9.0);
    }
}
