//! Post-processing after-hooks.

use std::fmt;
use std::future::Future;

use futures_util::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use crate::{RequestConfig, Result};

/// A post-processing step run over the response payload once the call succeeds.
///
/// Every hook receives the original payload, not the output of the previous
/// hook. Only the last hook's output becomes the final result; earlier hooks
/// run for their side effects.
pub trait AfterHook: Send + Sync {
    /// Hook name, used in logs and errors.
    fn name(&self) -> &str;

    /// Process the response payload.
    fn apply<'a>(&'a self, data: &'a Value, config: &'a RequestConfig)
    -> BoxFuture<'a, Result<Value>>;
}

/// Hook backed by a synchronous closure. See [`hook_fn`].
pub struct FnHook<F> {
    name: String,
    apply: F,
}

impl<F> fmt::Debug for FnHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook").field("name", &self.name).finish()
    }
}

/// Build a hook from a synchronous closure.
///
/// ```
/// use preflight_core::hook_fn;
///
/// let unwrap = hook_fn("unwrap-data", |data, _config| Ok(data["data"].clone()));
/// ```
pub fn hook_fn<F>(name: impl Into<String>, apply: F) -> FnHook<F>
where
    F: Fn(&Value, &RequestConfig) -> Result<Value> + Send + Sync,
{
    FnHook {
        name: name.into(),
        apply,
    }
}

impl<F> AfterHook for FnHook<F>
where
    F: Fn(&Value, &RequestConfig) -> Result<Value> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(
        &'a self,
        data: &'a Value,
        config: &'a RequestConfig,
    ) -> BoxFuture<'a, Result<Value>> {
        future::ready((self.apply)(data, config)).boxed()
    }
}

/// Hook backed by an asynchronous closure. See [`async_hook_fn`].
pub struct AsyncFnHook<F> {
    name: String,
    apply: F,
}

impl<F> fmt::Debug for AsyncFnHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnHook")
            .field("name", &self.name)
            .finish()
    }
}

/// Build a hook from an asynchronous closure.
///
/// The closure receives its own copies of the payload and config.
pub fn async_hook_fn<F, Fut>(name: impl Into<String>, apply: F) -> AsyncFnHook<F>
where
    F: Fn(Value, RequestConfig) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    AsyncFnHook {
        name: name.into(),
        apply,
    }
}

impl<F, Fut> AfterHook for AsyncFnHook<F>
where
    F: Fn(Value, RequestConfig) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(
        &'a self,
        data: &'a Value,
        config: &'a RequestConfig,
    ) -> BoxFuture<'a, Result<Value>> {
        (self.apply)(data.clone(), config.clone()).boxed()
    }
}
