//! Timing record logging using the `tracing` crate.

use preflight_core::{LogSink, RequestConfig, TimingRecord};
use tracing::{Level, debug, info, span, warn};

/// Log level for the tracing sink.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at debug level (record details, including headers and payload).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// [`LogSink`] emitting one `tracing` event per completed call.
///
/// Successful statuses are logged at the configured level, others at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    level: LogLevel,
}

impl TracingSink {
    /// Create a sink logging summaries at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink logging record details at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl LogSink for TracingSink {
    fn log(&self, config: &RequestConfig, record: &TimingRecord) {
        let method = config.method;
        let url = config.url.as_deref().unwrap_or_default();
        let response = record.response();
        let status = response.status();
        let delta_ms = record.delta();

        let span = span!(Level::INFO, "http_request", %method, url);
        let _entered = span.enter();

        if !response.is_success() {
            warn!(status, delta_ms, "request completed with HTTP error");
            return;
        }

        match self.level {
            LogLevel::Debug => {
                debug!(
                    status,
                    delta_ms,
                    header = ?response.headers(),
                    data = %response.data(),
                    "request completed"
                );
            }
            LogLevel::Info => {
                info!(status, delta_ms, "request completed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use preflight_core::{Response, json};

    use super::*;

    #[test]
    fn tracing_sink_default() {
        let sink = TracingSink::new();
        assert!(matches!(sink.level, LogLevel::Info));
    }

    #[test]
    fn tracing_sink_debug() {
        let sink = TracingSink::debug();
        assert!(matches!(sink.level, LogLevel::Debug));
    }

    #[test]
    fn logging_without_subscriber_is_silent() {
        let record = TimingRecord::new(Response::new(500, BTreeMap::new(), json!(null)), 12);
        TracingSink::debug().log(&RequestConfig::default(), &record);
    }
}
