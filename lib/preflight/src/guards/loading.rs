//! Loading indicator guard.

use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use preflight_core::{Guard, Indicator, RequestConfig};

/// Shows the loading indicator when `show_loading` is set. Never blocks.
#[derive(Clone)]
pub struct LoadingGuard {
    indicator: Arc<dyn Indicator>,
}

impl LoadingGuard {
    /// Create the guard.
    pub fn new(indicator: Arc<dyn Indicator>) -> Self {
        Self { indicator }
    }
}

impl Guard for LoadingGuard {
    fn name(&self) -> &str {
        "loading"
    }

    fn check<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, bool> {
        if config.show_loading {
            self.indicator.show_loading();
        }
        future::ready(true).boxed()
    }
}

#[cfg(test)]
mod tests {
    use preflight_core::ConfigOverrides;

    use super::*;
    use crate::guards::testing::RecordingIndicator;

    #[tokio::test]
    async fn shows_loading_when_requested() {
        let indicator = Arc::new(RecordingIndicator::default());
        let guard = LoadingGuard::new(indicator.clone());

        let config = RequestConfig::default().merge(ConfigOverrides::new().show_loading(true));
        assert!(guard.check(&config).await);
        assert_eq!(indicator.events(), vec!["show_loading"]);
    }

    #[tokio::test]
    async fn stays_quiet_by_default() {
        let indicator = Arc::new(RecordingIndicator::default());
        let guard = LoadingGuard::new(indicator.clone());

        assert!(guard.check(&RequestConfig::default()).await);
        assert!(indicator.events().is_empty());
    }
}
