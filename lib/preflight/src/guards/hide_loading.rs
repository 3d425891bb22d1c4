//! After-hook hiding the loading indicator.

use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use preflight_core::{AfterHook, Indicator, RequestConfig, Result, Value};

/// Hides the loading indicator when `show_loading` is set and passes the
/// payload through unchanged.
#[derive(Clone)]
pub struct HideLoadingHook {
    indicator: Arc<dyn Indicator>,
}

impl HideLoadingHook {
    /// Create the hook.
    pub fn new(indicator: Arc<dyn Indicator>) -> Self {
        Self { indicator }
    }
}

impl AfterHook for HideLoadingHook {
    fn name(&self) -> &str {
        "hide-loading"
    }

    fn apply<'a>(
        &'a self,
        data: &'a Value,
        config: &'a RequestConfig,
    ) -> BoxFuture<'a, Result<Value>> {
        if config.show_loading {
            self.indicator.hide_loading();
        }
        future::ready(Ok(data.clone())).boxed()
    }
}
