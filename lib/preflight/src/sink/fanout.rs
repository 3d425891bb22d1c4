//! Sink forwarding one record to several sinks.

use std::sync::Arc;

use preflight_core::{LogSink, RequestConfig, TimingRecord};

/// Forwards every record to each inner sink, in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl FanoutSink {
    /// Create an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink.
    #[must_use]
    pub fn with(mut self, sink: impl LogSink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }
}

impl LogSink for FanoutSink {
    fn log(&self, config: &RequestConfig, record: &TimingRecord) {
        for sink in &self.sinks {
            sink.log(config, record);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU64, Ordering};

    use preflight_core::{Response, json};

    use super::*;

    #[tokio::test]
    async fn forwards_to_every_sink() {
        let total = Arc::new(AtomicU64::new(0));

        struct Adder(Arc<AtomicU64>);
        impl LogSink for Adder {
            fn log(&self, _config: &RequestConfig, record: &TimingRecord) {
                self.0.fetch_add(record.delta(), Ordering::SeqCst);
            }
        }

        let sink = FanoutSink::new()
            .with(Adder(Arc::clone(&total)))
            .with(Adder(Arc::clone(&total)));

        let record = TimingRecord::new(Response::new(200, BTreeMap::new(), json!({})), 7);
        sink.log(&RequestConfig::default(), &record);

        assert_eq!(total.load(Ordering::SeqCst), 14);
    }
}
