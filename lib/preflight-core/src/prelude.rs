//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use preflight_core::prelude::*;
//! ```

pub use crate::{
    AfterHook, ConfigOverrides, Error, Guard, LogSink, Method, RequestConfig, Response, Result,
    TimingRecord, Transport, Value, async_guard_fn, async_hook_fn, guard_fn, hook_fn, json,
};
