//! Network reachability guard.

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use preflight_core::{Guard, Indicator, NetworkProbe, NetworkType, RequestConfig};
use tracing::warn;

/// Blocks the call when the network is unreachable (`unknown` or `none`).
///
/// With `show_err_msg` set, a rejection also shows a toast carrying the raw
/// network status. A failing probe counts as `unknown`.
#[derive(Clone)]
pub struct NetworkGuard {
    probe: Arc<dyn NetworkProbe>,
    indicator: Arc<dyn Indicator>,
}

impl NetworkGuard {
    /// Create the guard.
    pub fn new(probe: Arc<dyn NetworkProbe>, indicator: Arc<dyn Indicator>) -> Self {
        Self { probe, indicator }
    }
}

impl Guard for NetworkGuard {
    fn name(&self) -> &str {
        "network"
    }

    fn check<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, bool> {
        async move {
            let network = self.probe.network_type().await.unwrap_or_else(|err| {
                warn!(error = %err, "network status unavailable");
                NetworkType::Unknown
            });

            let reachable = network.is_reachable();
            if !reachable && config.show_err_msg {
                warn!(%network, "network is not found");
                self.indicator.show_toast(&network.to_string());
            }
            reachable
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use futures_util::future;
    use preflight_core::{ConfigOverrides, Error, Result};

    use super::*;
    use crate::StaticNetwork;
    use crate::guards::testing::RecordingIndicator;

    struct FailingProbe;

    impl NetworkProbe for FailingProbe {
        fn network_type(&self) -> BoxFuture<'_, Result<NetworkType>> {
            future::ready(Err(Error::platform("probe offline"))).boxed()
        }
    }

    fn with_err_msg() -> RequestConfig {
        RequestConfig::default().merge(ConfigOverrides::new().show_err_msg(true))
    }

    #[tokio::test]
    async fn unreachable_statuses_reject() {
        for status in ["none", "unknown"] {
            let guard = NetworkGuard::new(
                Arc::new(StaticNetwork::new(NetworkType::from(status))),
                Arc::new(RecordingIndicator::default()),
            );
            assert!(!guard.check(&RequestConfig::default()).await, "{status}");
        }
    }

    #[tokio::test]
    async fn reachable_statuses_allow() {
        for status in ["wifi", "4g", "ethernet", "satellite"] {
            let indicator = Arc::new(RecordingIndicator::default());
            let guard = NetworkGuard::new(
                Arc::new(StaticNetwork::new(NetworkType::from(status))),
                indicator.clone(),
            );
            assert!(guard.check(&with_err_msg()).await, "{status}");
            assert!(indicator.events().is_empty());
        }
    }

    #[tokio::test]
    async fn toast_only_with_show_err_msg() {
        let indicator = Arc::new(RecordingIndicator::default());
        let guard = NetworkGuard::new(
            Arc::new(StaticNetwork::new(NetworkType::None)),
            indicator.clone(),
        );

        assert!(!guard.check(&RequestConfig::default()).await);
        assert!(indicator.events().is_empty());

        assert!(!guard.check(&with_err_msg()).await);
        assert_eq!(indicator.events(), vec!["toast:none"]);
    }

    #[tokio::test]
    async fn failing_probe_counts_as_unknown() {
        let indicator = Arc::new(RecordingIndicator::default());
        let guard = NetworkGuard::new(Arc::new(FailingProbe), indicator.clone());

        assert!(!guard.check(&with_err_msg()).await);
        assert_eq!(indicator.events(), vec!["toast:unknown"]);
    }
}
