//! The guarded request pipeline.
//!
//! One [`Pipeline::run_task`] call:
//!
//! 1. merges the caller's overrides over the baseline config,
//! 2. runs the guards in order, stopping at the first rejection,
//! 3. times the transport call and hands the timing record to the log sink,
//! 4. folds the after-hooks over the response payload.
//!
//! Each run works on its own effective config; the registries, transport and
//! sink are shared read-only between concurrent runs.

use std::fmt;
use std::sync::Arc;

use preflight_core::{
    AfterHook, ConfigOverrides, Error, Guard, LogSink, RequestConfig, Result, Transport, Value,
};
use tracing::{Instrument, debug, info_span, warn};

use crate::guards::{HideLoadingHook, LoadingGuard, NetworkGuard, TokenGuard};
use crate::platform::Platform;
use crate::registry::{GuardRegistry, HookRegistry};
use crate::sink::TracingSink;
use crate::timing::TimingProbe;
use crate::transport::HyperTransport;

struct Inner {
    defaults: RequestConfig,
    guards: GuardRegistry,
    hooks: HookRegistry,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn LogSink>,
}

/// Guarded request pipeline. Cheap to clone; clones share the same stages.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use preflight::prelude::*;
/// use preflight::{MemoryCache, Pipeline, Platform};
///
/// let platform = Platform::headless(Arc::new(MemoryCache::new())).login_path("/login");
/// let pipeline = Pipeline::builder()
///     .with_default_guards(&platform)
///     .after(hook_fn("unwrap", |data, _| Ok(data["data"].clone())))
///     .build();
///
/// let overrides = ConfigOverrides::new()
///     .url("https://api.example.com/profile")
///     .need_token(false);
/// match pipeline.run_task(Some(overrides)).await {
///     Some(profile) => println!("{profile}"),
///     None => println!("call did not go through"),
/// }
/// ```
#[derive(Clone)]
pub struct Pipeline {
    inner: Arc<Inner>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("defaults", &self.inner.defaults)
            .field("guards", &self.inner.guards)
            .field("hooks", &self.inner.hooks)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create a new pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Baseline config every run starts from.
    #[must_use]
    pub fn defaults(&self) -> &RequestConfig {
        &self.inner.defaults
    }

    /// Registered guards.
    #[must_use]
    pub fn guards(&self) -> &GuardRegistry {
        &self.inner.guards
    }

    /// Registered after-hooks.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.inner.hooks
    }

    /// Merge `overrides` over the baseline config.
    #[must_use]
    pub fn effective_config(&self, overrides: Option<ConfigOverrides>) -> RequestConfig {
        self.inner.defaults.merge(overrides.unwrap_or_default())
    }

    /// Run the guards against `config`; `true` when the call may proceed.
    pub async fn dispatch(&self, config: &RequestConfig) -> bool {
        self.inner.guards.dispatch(config).await
    }

    /// Run the pipeline once.
    ///
    /// Returns the final hook output, or `None` when a guard blocked the call,
    /// the transport failed, or a hook failed. The three cases are not told
    /// apart; use [`try_run_task`](Self::try_run_task) to inspect them.
    pub async fn run_task(&self, overrides: Option<ConfigOverrides>) -> Option<Value> {
        match self.try_run_task(overrides).await {
            Ok(value) => Some(value),
            Err(err) if err.is_rejected() => {
                debug!(error = %err, "task blocked");
                None
            }
            Err(err) => {
                warn!(error = %err, "task failed");
                None
            }
        }
    }

    /// Run the pipeline once, keeping the failure cause.
    ///
    /// # Errors
    ///
    /// - [`Error::Rejected`] when a guard blocks the call (no transport call,
    ///   no hooks, no timing record)
    /// - the transport error when the call fails
    /// - the hook error when an after-hook fails
    pub async fn try_run_task(&self, overrides: Option<ConfigOverrides>) -> Result<Value> {
        let config = self.effective_config(overrides);
        let span = info_span!(
            "run_task",
            method = %config.method,
            url = config.url.as_deref().unwrap_or_default()
        );

        async {
            if let Some(guard) = self.inner.guards.first_rejection(&config).await {
                return Err(Error::rejected(guard));
            }

            let probe = TimingProbe::start(&config, self.inner.sink.as_ref());
            let response = self.inner.transport.request(&config).await?;
            let response = probe.stop(response);

            self.inner.hooks.reduce(response.data(), &config).await
        }
        .instrument(span)
        .await
    }
}

/// Builder for [`Pipeline`].
///
/// Guards and hooks run in the order they are added. Without an explicit
/// transport a default [`HyperTransport`] is used; without an explicit sink,
/// a [`TracingSink`].
#[derive(Default)]
pub struct PipelineBuilder {
    defaults: RequestConfig,
    guards: GuardRegistry,
    hooks: HookRegistry,
    transport: Option<Arc<dyn Transport>>,
    sink: Option<Arc<dyn LogSink>>,
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("defaults", &self.defaults)
            .field("guards", &self.guards)
            .field("hooks", &self.hooks)
            .field("transport", &self.transport.is_some())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl PipelineBuilder {
    /// Replace the baseline config.
    #[must_use]
    pub fn defaults(mut self, defaults: RequestConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Append a guard.
    #[must_use]
    pub fn use_guard(mut self, guard: impl Guard + 'static) -> Self {
        self.guards.register(guard);
        self
    }

    /// Append an after-hook.
    #[must_use]
    pub fn after(mut self, hook: impl AfterHook + 'static) -> Self {
        self.hooks.register(hook);
        self
    }

    /// Append the default guards (loading, token, network, in this order)
    /// and the hide-loading after-hook.
    #[must_use]
    pub fn with_default_guards(self, platform: &Platform) -> Self {
        let token = TokenGuard::new(Arc::clone(&platform.cache), Arc::clone(&platform.navigator))
            .user_info_key(platform.user_info_key.clone())
            .login_path(platform.login_path.clone());

        self.use_guard(LoadingGuard::new(Arc::clone(&platform.indicator)))
            .use_guard(token)
            .use_guard(NetworkGuard::new(
                Arc::clone(&platform.network),
                Arc::clone(&platform.indicator),
            ))
            .after(HideLoadingHook::new(Arc::clone(&platform.indicator)))
    }

    /// Set the transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Set the log sink receiving timing records.
    #[must_use]
    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Build the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HyperTransport::new()));
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink::new()));

        Pipeline {
            inner: Arc::new(Inner {
                defaults: self.defaults,
                guards: self.guards,
                hooks: self.hooks,
                transport,
                sink,
            }),
        }
    }
}
