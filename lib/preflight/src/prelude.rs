//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use preflight::prelude::*;
//! ```

pub use crate::{
    AfterHook, ConfigOverrides, Error, Guard, HyperTransport, LogSink, MemoryCache, Method,
    Pipeline, Platform, RequestConfig, Response, Result, ServiceTransport, TimingRecord,
    Transport, Value, async_guard_fn, async_hook_fn, guard_fn, hook_fn, json,
};
