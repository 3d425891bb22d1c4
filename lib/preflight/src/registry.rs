//! Ordered guard and after-hook registries.
//!
//! Both registries are append-only: stages run in registration order and are
//! never removed. A [`Pipeline`](crate::Pipeline) owns one of each and shares
//! them read-only across concurrent tasks.

use std::fmt;
use std::sync::Arc;

use preflight_core::{AfterHook, Guard, RequestConfig, Result, Value};
use serde_json::Map;
use tracing::{debug, warn};

/// Ordered sequence of pre-flight guards.
#[derive(Clone, Default)]
pub struct GuardRegistry {
    guards: Vec<Arc<dyn Guard>>,
}

impl fmt::Debug for GuardRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.guards.iter().map(|guard| guard.name()))
            .finish()
    }
}

impl GuardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a guard.
    pub fn register(&mut self, guard: impl Guard + 'static) -> &mut Self {
        self.register_shared(Arc::new(guard))
    }

    /// Append a shared guard.
    pub fn register_shared(&mut self, guard: Arc<dyn Guard>) -> &mut Self {
        debug!(guard = guard.name(), position = self.guards.len(), "registering guard");
        self.guards.push(guard);
        self
    }

    /// Number of registered guards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Returns `true` if no guard is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Guard names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(|guard| guard.name())
    }

    /// Run the guards in order; `true` when every guard allows the call.
    pub async fn dispatch(&self, config: &RequestConfig) -> bool {
        self.first_rejection(config).await.is_none()
    }

    /// Run the guards in order and return the name of the first guard that
    /// blocks the call. Guards after it are never invoked.
    pub async fn first_rejection(&self, config: &RequestConfig) -> Option<&str> {
        for guard in &self.guards {
            if !guard.check(config).await {
                debug!(guard = guard.name(), "guard rejected call");
                return Some(guard.name());
            }
        }
        None
    }
}

/// Ordered sequence of after-hooks.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn AfterHook>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|hook| hook.name()))
            .finish()
    }
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook.
    pub fn register(&mut self, hook: impl AfterHook + 'static) -> &mut Self {
        self.register_shared(Arc::new(hook))
    }

    /// Append a shared hook.
    pub fn register_shared(&mut self, hook: Arc<dyn AfterHook>) -> &mut Self {
        debug!(hook = hook.name(), position = self.hooks.len(), "registering hook");
        self.hooks.push(hook);
        self
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns `true` if no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hook names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|hook| hook.name())
    }

    /// Fold the hooks over the response payload.
    ///
    /// The accumulator starts as an empty object and is replaced by each
    /// hook's output, but every hook is handed the original `data`, never the
    /// accumulator. The result is therefore the last hook's output (or `{}`
    /// without hooks). Outputs of earlier hooks are discarded.
    ///
    /// The first failing hook aborts the fold.
    pub async fn reduce(&self, data: &Value, config: &RequestConfig) -> Result<Value> {
        let mut acc = Value::Object(Map::new());
        for hook in &self.hooks {
            acc = hook
                .apply(data, config)
                .await
                .inspect_err(|err| warn!(hook = hook.name(), error = %err, "hook failed"))?;
        }
        Ok(acc)
    }
}
