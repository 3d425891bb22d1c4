//! Adapter turning any tower service into a [`Transport`].

use futures_util::future::{BoxFuture, FutureExt};
use preflight_core::{Error, RequestConfig, Response, Result, Transport};
use tower::ServiceExt;
use tower_service::Service;

/// [`Transport`] backed by a `tower::Service<RequestConfig>`.
///
/// The service is cloned per call and driven to readiness before it is called.
///
/// # Example
///
/// ```ignore
/// use preflight::{Response, ServiceTransport};
///
/// let transport = ServiceTransport::new(tower::service_fn(|_config| async {
///     Ok(Response::new(200, Default::default(), serde_json::json!({"ok": true})))
/// }));
/// ```
#[derive(Debug, Clone)]
pub struct ServiceTransport<S> {
    inner: S,
}

impl<S> ServiceTransport<S> {
    /// Wrap a tower service.
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped service.
    pub const fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S> Transport for ServiceTransport<S>
where
    S: Service<RequestConfig, Response = Response, Error = Error> + Clone + Send + Sync + 'static,
    S::Future: Send,
{
    fn request<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, Result<Response>> {
        let service = self.inner.clone();
        let config = config.clone();
        async move { service.oneshot(config).await }.boxed()
    }
}
