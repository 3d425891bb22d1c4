//! Core types and traits for the preflight guarded request pipeline.
//!
//! This crate provides the foundational types used by preflight:
//! - [`RequestConfig`] and [`ConfigOverrides`] - Effective and caller-supplied configuration
//! - [`Method`] - HTTP method enum
//! - [`Response`] and [`TimingRecord`] - Transport response and its timing measurement
//! - [`Error`] and [`Result`] - Error handling
//! - [`Guard`] and [`AfterHook`] - Pipeline stages
//! - [`Transport`] and [`LogSink`] - External collaborators of the pipeline
//! - [`CacheStore`], [`NetworkProbe`], [`Navigator`], [`Indicator`] - Host platform primitives

mod body;
mod config;
mod error;
mod guard;
mod hook;
mod method;
mod platform;
pub mod prelude;
mod response;
mod transport;

pub use body::{decode_payload, from_json, from_value, to_query_string};
pub use config::{ConfigOverrides, RequestConfig};
pub use error::{Error, Result};
pub use guard::{AsyncFnGuard, FnGuard, Guard, async_guard_fn, guard_fn};
pub use hook::{AfterHook, AsyncFnHook, FnHook, async_hook_fn, hook_fn};
pub use method::Method;
pub use platform::{CacheStore, Indicator, Navigator, NetworkProbe, NetworkType};
pub use response::{Response, TimingRecord};
pub use transport::{LogSink, Transport};

// Re-export JSON value type used by payloads and hooks
pub use serde_json::{Value, json};
