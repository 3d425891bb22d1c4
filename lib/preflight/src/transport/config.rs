//! Limits and defaults applied by the [`HyperTransport`](super::HyperTransport).

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const DEFAULT_MAX_RESPONSE_BODY: usize = 10 * 1024 * 1024;

/// Transport settings. Every setter consumes and returns the config, so a
/// config reads as a chain over [`TransportConfig::default`].
///
/// ```
/// use std::time::Duration;
/// use preflight::TransportConfig;
///
/// let config = TransportConfig::default()
///     .timeout(Duration::from_secs(5))
///     .max_response_body(64 * 1024);
/// assert_eq!(config.max_response_body, 64 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Timeout until the response head arrives.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_idle_per_host: usize,
    /// How long an idle connection is kept.
    pub pool_idle_timeout: Duration,
    /// Largest response body decoded into a payload, in bytes.
    pub max_response_body: usize,
    /// `User-Agent` sent when the request config has none.
    pub user_agent: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            max_response_body: DEFAULT_MAX_RESPONSE_BODY,
            user_agent: Some(concat!("preflight/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl TransportConfig {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the idle connections kept per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = count;
        self
    }

    /// Set the idle connection lifetime.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set the response body limit in bytes.
    #[must_use]
    pub fn max_response_body(mut self, bytes: usize) -> Self {
        self.max_response_body = bytes;
        self
    }

    /// Set the default `User-Agent`; `None` sends none.
    #[must_use]
    pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(90));
        assert_eq!(config.max_response_body, 10 * 1024 * 1024);
        assert!(
            config
                .user_agent
                .as_deref()
                .is_some_and(|agent| agent.starts_with("preflight/"))
        );
    }

    #[test]
    fn setters_only_touch_their_field() {
        let config = TransportConfig::default()
            .max_response_body(1024)
            .user_agent(None);

        assert_eq!(config.max_response_body, 1024);
        assert!(config.user_agent.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
