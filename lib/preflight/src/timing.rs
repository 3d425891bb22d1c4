//! Latency probe around the transport call.

use preflight_core::{LogSink, RequestConfig, Response, TimingRecord};
use tokio::time::Instant;

/// Running timer started immediately before the transport call.
///
/// [`stop`](Self::stop) must be called immediately after the call returns,
/// so the measured delta covers the call only and not pipeline setup.
#[must_use = "a timing probe records nothing until stopped"]
pub struct TimingProbe<'a> {
    start: Instant,
    config: &'a RequestConfig,
    sink: &'a dyn LogSink,
}

impl<'a> TimingProbe<'a> {
    /// Capture the start timestamp.
    pub fn start(config: &'a RequestConfig, sink: &'a dyn LogSink) -> Self {
        Self {
            start: Instant::now(),
            config,
            sink,
        }
    }

    /// Compute the elapsed milliseconds and forward the timing record with
    /// the effective config to the log sink. Returns the response unchanged.
    pub fn stop(self, response: Response) -> Response {
        // Saturating conversion to u64 (truncates after ~584 million years)
        let delta = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let record = TimingRecord::new(response, delta);
        self.sink.log(self.config, &record);
        record.into_response()
    }
}
