//! Transport and log sink collaborator traits.
//!
//! - [`Transport`] - Performs the network call for an effective config
//! - [`LogSink`] - Receives one [`TimingRecord`] per completed call

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::{RequestConfig, Response, Result, TimingRecord};

/// Performs the actual network request.
///
/// Implementations own framing, TLS and connection handling; the pipeline
/// only sees the decoded [`Response`].
pub trait Transport: Send + Sync {
    /// Execute the request described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid configuration
    fn request<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, Result<Response>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn request<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, Result<Response>> {
        (**self).request(config)
    }
}

/// Receives the timing record of every completed transport call.
pub trait LogSink: Send + Sync {
    /// Record one completed call.
    fn log(&self, config: &RequestConfig, record: &TimingRecord);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, config: &RequestConfig, record: &TimingRecord) {
        (**self).log(config, record);
    }
}
