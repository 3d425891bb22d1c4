//! Log sinks receiving the timing record of each completed call.
//!
//! - [`TracingSink`] - Emits the record as a `tracing` event (default)
//! - [`FanoutSink`] - Forwards one record to several sinks
//! - `MetricsSink` - Records counters and histograms (`metrics` feature)

mod fanout;
#[cfg(feature = "metrics")]
mod metrics;
mod tracing;

pub use fanout::FanoutSink;
#[cfg(feature = "metrics")]
pub use self::metrics::MetricsSink;
pub use self::tracing::{LogLevel, TracingSink};
