//! Guarded request pipeline for Rust.
//!
//! Before an outbound call is issued, an ordered sequence of [guards](Guard)
//! decides whether it may proceed (loading indicator, cached token, network
//! reachability). The call itself is timed and its timing record handed to a
//! [`LogSink`]. After the call, an ordered sequence of [after-hooks](AfterHook)
//! post-processes the response payload.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use preflight::prelude::*;
//!
//! let cache = Arc::new(MemoryCache::new());
//! cache.insert("USER_INFO", json!({"token": "secret"}));
//!
//! let pipeline = Pipeline::builder()
//!     .with_default_guards(&Platform::headless(cache).login_path("/login"))
//!     .build();
//!
//! let user = pipeline
//!     .run_task(Some(ConfigOverrides::new().url("https://api.example.com/me")))
//!     .await;
//! ```
//!
//! # After-hook reduction
//!
//! Every after-hook receives the original response payload, not the previous
//! hook's output, and only the last hook's output is returned. Hooks therefore
//! do not compose into a transformation chain; earlier hooks are useful for
//! their side effects only.

mod guards;
mod pipeline;
mod platform;
pub mod prelude;
mod registry;
pub mod sink;
mod timing;
mod transport;

pub use guards::{HideLoadingHook, LoadingGuard, NetworkGuard, TokenGuard};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use platform::{
    DEFAULT_USER_INFO_KEY, MemoryCache, Platform, StaticNetwork, TracingIndicator,
    TracingNavigator,
};
pub use registry::{GuardRegistry, HookRegistry};
pub use sink::{FanoutSink, TracingSink};
pub use timing::TimingProbe;
pub use transport::{
    BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture, ServiceTransport,
    TransportConfig,
};

// Re-export tower for transport layering
pub use tower;

// Re-export core types
pub use preflight_core::{
    AfterHook, AsyncFnGuard, AsyncFnHook, CacheStore, ConfigOverrides, Error, FnGuard, FnHook,
    Guard, Indicator, LogSink, Method, Navigator, NetworkProbe, NetworkType, RequestConfig,
    Response, Result, TimingRecord, Transport, Value, async_guard_fn, async_hook_fn,
    decode_payload, from_json, from_value, guard_fn, hook_fn, json, to_query_string,
};
