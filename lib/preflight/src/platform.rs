//! Host platform bundle and in-process implementations.
//!
//! [`Platform`] groups the primitives the default guards need. The in-process
//! implementations make a pipeline usable headless (CLIs, services, tests).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures_util::future::{self, BoxFuture, FutureExt};
use preflight_core::{CacheStore, Indicator, Navigator, NetworkProbe, NetworkType, Result, Value};
use tracing::{debug, info};

/// Cache key under which the signed-in user's info is stored.
pub const DEFAULT_USER_INFO_KEY: &str = "USER_INFO";

/// Host platform primitives used by the default guards and hook.
#[derive(Clone)]
pub struct Platform {
    /// Credential cache.
    pub cache: Arc<dyn CacheStore>,
    /// Network status probe.
    pub network: Arc<dyn NetworkProbe>,
    /// Page navigation.
    pub navigator: Arc<dyn Navigator>,
    /// Loading and toast indicators.
    pub indicator: Arc<dyn Indicator>,
    /// Cache key holding the user info with its `token`.
    pub user_info_key: String,
    /// Where to navigate when the token is missing.
    pub login_path: Option<String>,
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("user_info_key", &self.user_info_key)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

impl Platform {
    /// Bundle platform primitives with the default user-info key and no login path.
    pub fn new(
        cache: Arc<dyn CacheStore>,
        network: Arc<dyn NetworkProbe>,
        navigator: Arc<dyn Navigator>,
        indicator: Arc<dyn Indicator>,
    ) -> Self {
        Self {
            cache,
            network,
            navigator,
            indicator,
            user_info_key: DEFAULT_USER_INFO_KEY.to_string(),
            login_path: None,
        }
    }

    /// In-process platform: the given cache, a fixed `wifi` network and
    /// tracing-backed navigation and indicators.
    #[must_use]
    pub fn headless(cache: Arc<MemoryCache>) -> Self {
        Self::new(
            cache,
            Arc::new(StaticNetwork::new(NetworkType::Wifi)),
            Arc::new(TracingNavigator),
            Arc::new(TracingIndicator),
        )
    }

    /// Set the cache key holding the user info.
    #[must_use]
    pub fn user_info_key(mut self, key: impl Into<String>) -> Self {
        self.user_info_key = key.into();
        self
    }

    /// Set the login path used when the token is missing.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }
}

// ============================================================================
// In-process implementations
// ============================================================================

/// In-memory [`CacheStore`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value);
    }

    /// Remove a value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// [`NetworkProbe`] reporting a settable, fixed status.
#[derive(Debug)]
pub struct StaticNetwork {
    status: Mutex<NetworkType>,
}

impl StaticNetwork {
    /// Report `status` until changed.
    #[must_use]
    pub const fn new(status: NetworkType) -> Self {
        Self {
            status: Mutex::new(status),
        }
    }

    /// Change the reported status.
    pub fn set(&self, status: NetworkType) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

impl NetworkProbe for StaticNetwork {
    fn network_type(&self) -> BoxFuture<'_, Result<NetworkType>> {
        let status = self
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        future::ready(Ok(status)).boxed()
    }
}

/// [`Navigator`] that only logs the navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect_to(&self, path: &str) {
        info!(path, "redirect");
    }
}

/// [`Indicator`] that only logs indicator changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIndicator;

impl Indicator for TracingIndicator {
    fn show_loading(&self) {
        debug!("show loading");
    }

    fn hide_loading(&self) {
        debug!("hide loading");
    }

    fn show_toast(&self, message: &str) {
        info!(message, "toast");
    }
}
