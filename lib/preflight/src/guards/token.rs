//! Cached-token guard.

use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use preflight_core::{CacheStore, Guard, Navigator, RequestConfig, Value};
use tracing::warn;

use crate::platform::DEFAULT_USER_INFO_KEY;

/// Blocks the call when `need_token` is set and no token is cached.
///
/// The token is read from the `token` field of the user info stored under
/// the user-info key. On rejection the guard navigates to the login path,
/// when one is configured.
#[derive(Clone)]
pub struct TokenGuard {
    cache: Arc<dyn CacheStore>,
    navigator: Arc<dyn Navigator>,
    user_info_key: String,
    login_path: Option<String>,
}

impl TokenGuard {
    /// Create the guard with the default user-info key and no login path.
    pub fn new(cache: Arc<dyn CacheStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            cache,
            navigator,
            user_info_key: DEFAULT_USER_INFO_KEY.to_string(),
            login_path: None,
        }
    }

    /// Set the cache key holding the user info.
    #[must_use]
    pub fn user_info_key(mut self, key: impl Into<String>) -> Self {
        self.user_info_key = key.into();
        self
    }

    /// Set the login path used on rejection.
    #[must_use]
    pub fn login_path(mut self, path: Option<String>) -> Self {
        self.login_path = path;
        self
    }

    fn has_token(&self) -> bool {
        self.cache
            .get(&self.user_info_key)
            .as_ref()
            .and_then(|info| info.get("token"))
            .is_some_and(is_truthy)
    }
}

/// `null`, `false`, zero and the empty string count as no token.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Guard for TokenGuard {
    fn name(&self) -> &str {
        "token"
    }

    fn check<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, bool> {
        if !config.need_token || self.has_token() {
            return future::ready(true).boxed();
        }

        if let Some(path) = &self.login_path {
            self.navigator.redirect_to(path);
        }
        warn!(key = %self.user_info_key, "token is not found");

        future::ready(false).boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use preflight_core::{ConfigOverrides, json};

    use super::*;
    use crate::MemoryCache;
    use crate::guards::testing::RecordingNavigator;

    const LOGIN: &str = "/pages/login/index";

    #[derive(Default)]
    struct CountingCache(AtomicUsize);

    impl CacheStore for CountingCache {
        fn get(&self, _key: &str) -> Option<Value> {
            self.0.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    #[tokio::test]
    async fn missing_token_redirects_once_and_rejects() {
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = TokenGuard::new(Arc::new(MemoryCache::new()), navigator.clone())
            .login_path(Some(LOGIN.to_string()));

        assert!(!guard.check(&RequestConfig::default()).await);
        assert_eq!(navigator.paths(), vec![LOGIN]);
    }

    #[tokio::test]
    async fn missing_token_without_login_path_only_rejects() {
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = TokenGuard::new(Arc::new(MemoryCache::new()), navigator.clone());

        assert!(!guard.check(&RequestConfig::default()).await);
        assert!(navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn empty_token_counts_as_missing() {
        let cache = Arc::new(MemoryCache::new());
        cache.insert(DEFAULT_USER_INFO_KEY, json!({"token": ""}));
        let guard = TokenGuard::new(cache, Arc::new(RecordingNavigator::default()));

        assert!(!guard.check(&RequestConfig::default()).await);
    }

    #[tokio::test]
    async fn falsy_tokens_count_as_missing() {
        for token in [json!(null), json!(false), json!(0), json!(0.0)] {
            let cache = Arc::new(MemoryCache::new());
            cache.insert(DEFAULT_USER_INFO_KEY, json!({ "token": token.clone() }));
            let guard = TokenGuard::new(cache, Arc::new(RecordingNavigator::default()));

            assert!(!guard.check(&RequestConfig::default()).await, "{token}");
        }
    }

    #[tokio::test]
    async fn numeric_token_allows() {
        let cache = Arc::new(MemoryCache::new());
        cache.insert(DEFAULT_USER_INFO_KEY, json!({"token": 12345}));
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = TokenGuard::new(cache, navigator.clone());

        assert!(guard.check(&RequestConfig::default()).await);
        assert!(navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn cached_token_allows() {
        let cache = Arc::new(MemoryCache::new());
        cache.insert("session", json!({"token": "t-123", "name": "alice"}));
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = TokenGuard::new(cache, navigator.clone()).user_info_key("session");

        assert!(guard.check(&RequestConfig::default()).await);
        assert!(navigator.paths().is_empty());
    }

    #[tokio::test]
    async fn token_not_needed_skips_cache() {
        let cache = Arc::new(CountingCache::default());
        let guard = TokenGuard::new(cache.clone(), Arc::new(RecordingNavigator::default()));

        let config = RequestConfig::default().merge(ConfigOverrides::new().need_token(false));
        assert!(guard.check(&config).await);
        assert_eq!(cache.0.load(Ordering::SeqCst), 0);
    }
}
