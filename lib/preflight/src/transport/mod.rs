//! Transport implementations.
//!
//! - [`HyperTransport`] - hyper-util client with rustls, pooling and timeouts
//! - [`ServiceTransport`] - any `tower::Service<RequestConfig>` as a transport

mod config;
mod connector;
mod hyper;
mod service;

pub use config::TransportConfig;
pub use hyper::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};
pub use service::ServiceTransport;
