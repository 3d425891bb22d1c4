//! Timing record metrics using the metrics crate facade.
//!
//! Integrates with any metrics backend (Prometheus, `StatsD`, etc.) installed
//! by the application.

use preflight_core::{LogSink, RequestConfig, TimingRecord};

/// Labels used for metrics.
const LABEL_METHOD: &str = "method";
const LABEL_STATUS: &str = "status";

/// Metric names.
const METRIC_REQUESTS_TOTAL: &str = "preflight_requests_total";
const METRIC_REQUEST_DURATION: &str = "preflight_request_duration_seconds";

/// [`LogSink`] recording request metrics.
///
/// Records the following metrics:
/// - `preflight_requests_total` (counter): completed calls, labeled by method and status
/// - `preflight_request_duration_seconds` (histogram): transport call duration in seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSink {
    _private: (),
}

impl MetricsSink {
    /// Create a new metrics sink.
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl LogSink for MetricsSink {
    #[allow(clippy::cast_precision_loss)]
    fn log(&self, config: &RequestConfig, record: &TimingRecord) {
        let method = config.method.to_string();
        let status = record.response().status().to_string();

        metrics::histogram!(METRIC_REQUEST_DURATION, LABEL_METHOD => method.clone())
            .record(record.delta() as f64 / 1000.0);

        metrics::counter!(
            METRIC_REQUESTS_TOTAL,
            LABEL_METHOD => method,
            LABEL_STATUS => status
        )
        .increment(1);
    }
}
