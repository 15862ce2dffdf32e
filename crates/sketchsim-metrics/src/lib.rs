//! Metrics infrastructure for the sketchsim firmware harness.
//!
//! This crate declares every metric the simulated radio and HTTP bridge emit as
//! structured [`Metric`] constants, and re-exports the `metrics` facade. Nothing is
//! recorded unless the host process installs a recorder, so the simulation layer
//! can emit unconditionally.
//!
//! # Example
//!
//! ```rust,ignore
//! use sketchsim_metrics::{metric_defs, describe_metrics, MetricLabels};
//!
//! describe_metrics();
//!
//! let labels = MetricLabels::new("esp32-sim").with("reason", "wrong_secret");
//! metrics::counter!(metric_defs::WIFI_CONNECT_FAILURES.name, &labels).increment(1);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

/// The kind of metric (counter, gauge, or histogram).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// A monotonically increasing counter.
    Counter,
    /// A gauge that can go up and down.
    Gauge,
    /// A histogram for recording distributions.
    Histogram,
}

impl MetricKind {
    /// Returns the kind as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric declaration with its metadata.
///
/// ```rust
/// use sketchsim_metrics::{Metric, MetricKind};
/// use metrics::Unit;
///
/// const SCANS: Metric = Metric::counter("sketchsim.wifi.scans")
///     .with_description("Network scans performed")
///     .with_unit(Unit::Count);
///
/// assert_eq!(SCANS.kind, MetricKind::Counter);
/// ```
#[derive(Debug, Clone)]
pub struct Metric {
    /// The metric name (e.g., "sketchsim.http.requests").
    pub name: &'static str,
    /// The kind of metric (counter, gauge, histogram).
    pub kind: MetricKind,
    /// Human-readable description of the metric.
    pub description: &'static str,
    /// The unit of measurement (optional).
    pub unit: Option<Unit>,
    /// Expected label keys for this metric.
    pub labels: &'static [&'static str],
}

impl Metric {
    /// Creates a new counter metric with the given name.
    pub const fn counter(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Counter,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Creates a new gauge metric with the given name.
    pub const fn gauge(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Gauge,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Creates a new histogram metric with the given name.
    pub const fn histogram(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Histogram,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Sets the description for the metric.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the unit for the metric.
    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the expected label keys for the metric.
    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Registers this metric's description with the metrics recorder.
    pub fn describe(&self) {
        match (self.kind, self.unit) {
            (MetricKind::Counter, Some(unit)) => {
                describe_counter!(self.name, unit, self.description);
            }
            (MetricKind::Counter, None) => {
                describe_counter!(self.name, self.description);
            }
            (MetricKind::Gauge, Some(unit)) => {
                describe_gauge!(self.name, unit, self.description);
            }
            (MetricKind::Gauge, None) => {
                describe_gauge!(self.name, self.description);
            }
            (MetricKind::Histogram, Some(unit)) => {
                describe_histogram!(self.name, unit, self.description);
            }
            (MetricKind::Histogram, None) => {
                describe_histogram!(self.name, self.description);
            }
        }
    }
}

/// All metric definitions for the harness.
pub mod metric_defs {
    use super::{Metric, Unit};

    // ========================================================================
    // Radio
    // ========================================================================

    /// Connect attempts, successful or not.
    pub const WIFI_CONNECT_ATTEMPTS: Metric = Metric::counter("sketchsim.wifi.connect_attempts")
        .with_description("Connect attempts against the simulated network directory")
        .with_unit(Unit::Count)
        .with_labels(&["device"]);

    /// Failed connect attempts.
    ///
    /// Labels: device, reason (`not_found`, `missing_secret`, `wrong_secret`)
    pub const WIFI_CONNECT_FAILURES: Metric = Metric::counter("sketchsim.wifi.connect_failures")
        .with_description("Connect attempts that did not associate")
        .with_unit(Unit::Count)
        .with_labels(&["device", "reason"]);

    /// Network scans performed.
    pub const WIFI_SCANS: Metric = Metric::counter("sketchsim.wifi.scans")
        .with_description("Network scans performed")
        .with_unit(Unit::Count)
        .with_labels(&["device"]);

    /// Signal strength reported to firmware for the current association.
    pub const WIFI_RSSI: Metric = Metric::histogram("sketchsim.wifi.rssi_dbm")
        .with_description("Signal strength reported for the associated network in dBm")
        .with_labels(&["device"]);

    // ========================================================================
    // HTTP
    // ========================================================================

    /// Requests issued through the HTTP bridge.
    pub const HTTP_REQUESTS: Metric = Metric::counter("sketchsim.http.requests")
        .with_description("Requests issued through the HTTP bridge")
        .with_unit(Unit::Count)
        .with_labels(&["method"]);

    /// Requests that failed before a response arrived.
    pub const HTTP_FAILURES: Metric = Metric::counter("sketchsim.http.failures")
        .with_description("Requests that failed with a transport error")
        .with_unit(Unit::Count)
        .with_labels(&["method", "code"]);

    /// Response body sizes.
    pub const HTTP_RESPONSE_BYTES: Metric = Metric::histogram("sketchsim.http.response_bytes")
        .with_description("Size of buffered response bodies")
        .with_unit(Unit::Bytes)
        .with_labels(&["method"]);

    /// Wall-clock request latency.
    pub const HTTP_LATENCY: Metric = Metric::histogram("sketchsim.http.latency_ms")
        .with_description("Wall-clock time from request start to buffered response")
        .with_unit(Unit::Milliseconds)
        .with_labels(&["method"]);

    /// Returns a slice of all defined metrics.
    pub const ALL: &[&Metric] = &[
        &WIFI_CONNECT_ATTEMPTS,
        &WIFI_CONNECT_FAILURES,
        &WIFI_SCANS,
        &WIFI_RSSI,
        &HTTP_REQUESTS,
        &HTTP_FAILURES,
        &HTTP_RESPONSE_BYTES,
        &HTTP_LATENCY,
    ];
}

/// Label set identifying the simulated device, plus per-call extras.
///
/// ```rust
/// use sketchsim_metrics::MetricLabels;
///
/// let labels = MetricLabels::new("esp32-sim").with("reason", "not_found");
/// assert_eq!(labels.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MetricLabels {
    /// Device (hostname) the metric belongs to.
    pub device: String,
}

impl MetricLabels {
    /// Creates labels for the given device.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }

    /// Converts the labels to the metrics crate label format.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        vec![("device", self.device.clone())]
    }

    /// Returns labels with one additional key-value pair.
    pub fn with(&self, key: &'static str, value: impl Into<String>) -> Vec<(&'static str, String)> {
        let mut labels = self.to_labels();
        labels.push((key, value.into()));
        labels
    }
}

/// Describes all metrics used by the harness.
///
/// Call once at startup after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_labels() {
        let labels = MetricLabels::new("esp32-sim");
        assert_eq!(labels.to_labels(), vec![("device", "esp32-sim".to_string())]);
    }

    #[test]
    fn test_with_extra_label() {
        let labels = MetricLabels::new("esp32-sim").with("reason", "wrong_secret");
        assert_eq!(labels.len(), 2);
        assert!(labels.contains(&("reason", "wrong_secret".to_string())));
    }

    #[test]
    fn test_metric_definitions() {
        assert_eq!(metric_defs::WIFI_CONNECT_FAILURES.name, "sketchsim.wifi.connect_failures");
        assert_eq!(metric_defs::WIFI_CONNECT_FAILURES.labels, &["device", "reason"]);
        assert_eq!(metric_defs::WIFI_RSSI.kind, MetricKind::Histogram);
        assert_eq!(metric_defs::HTTP_LATENCY.unit, Some(Unit::Milliseconds));
        assert_eq!(metric_defs::HTTP_REQUESTS.kind, MetricKind::Counter);
    }

    #[test]
    fn test_all_metrics_have_descriptions() {
        assert_eq!(metric_defs::ALL.len(), 8);
        for metric in metric_defs::ALL {
            assert!(!metric.description.is_empty(), "{} has no description", metric.name);
            assert!(metric.name.starts_with("sketchsim."));
        }
    }

    #[test]
    fn test_describe_without_recorder_is_noop() {
        describe_metrics();
    }

    #[test]
    fn test_metric_minimal() {
        const MINIMAL: Metric = Metric::gauge("minimal");

        assert_eq!(MINIMAL.kind, MetricKind::Gauge);
        assert_eq!(MINIMAL.description, "");
        assert_eq!(MINIMAL.unit, None);
        assert_eq!(MINIMAL.labels, &[] as &[&str]);
        assert_eq!(MINIMAL.kind.to_string(), "gauge");
    }
}
