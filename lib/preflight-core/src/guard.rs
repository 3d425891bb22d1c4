//! Pre-flight guard checks.
//!
//! A [`Guard`] inspects the effective [`RequestConfig`] and decides whether the
//! call may proceed. Every guard result is awaited, so synchronous and
//! asynchronous guards share one calling convention.

use std::fmt;
use std::future::Future;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::RequestConfig;

/// A check run before the transport call. Returning `false` blocks the call.
///
/// # Example
///
/// ```
/// use preflight_core::{Guard, RequestConfig};
/// use futures_util::future::{BoxFuture, FutureExt, ready};
///
/// struct RequireUrl;
///
/// impl Guard for RequireUrl {
///     fn name(&self) -> &str {
///         "require-url"
///     }
///
///     fn check<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, bool> {
///         ready(config.url.is_some()).boxed()
///     }
/// }
/// ```
pub trait Guard: Send + Sync {
    /// Guard name, used in logs and rejection errors.
    fn name(&self) -> &str;

    /// Decide whether the call may proceed.
    fn check<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, bool>;
}

/// Guard backed by a synchronous closure. See [`guard_fn`].
pub struct FnGuard<F> {
    name: String,
    check: F,
}

impl<F> fmt::Debug for FnGuard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGuard").field("name", &self.name).finish()
    }
}

/// Build a guard from a synchronous closure.
///
/// ```
/// use preflight_core::guard_fn;
///
/// let guard = guard_fn("has-url", |config| config.url.is_some());
/// ```
pub fn guard_fn<F>(name: impl Into<String>, check: F) -> FnGuard<F>
where
    F: Fn(&RequestConfig) -> bool + Send + Sync,
{
    FnGuard {
        name: name.into(),
        check,
    }
}

impl<F> Guard for FnGuard<F>
where
    F: Fn(&RequestConfig) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, bool> {
        future::ready((self.check)(config)).boxed()
    }
}

/// Guard backed by an asynchronous closure. See [`async_guard_fn`].
pub struct AsyncFnGuard<F> {
    name: String,
    check: F,
}

impl<F> fmt::Debug for AsyncFnGuard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnGuard")
            .field("name", &self.name)
            .finish()
    }
}

/// Build a guard from an asynchronous closure.
///
/// The closure receives its own copy of the effective config.
pub fn async_guard_fn<F, Fut>(name: impl Into<String>, check: F) -> AsyncFnGuard<F>
where
    F: Fn(RequestConfig) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    AsyncFnGuard {
        name: name.into(),
        check,
    }
}

impl<F, Fut> Guard for AsyncFnGuard<F>
where
    F: Fn(RequestConfig) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, bool> {
        (self.check)(config.clone()).boxed()
    }
}
