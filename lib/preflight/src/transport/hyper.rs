//! HTTP transport implementation using hyper-util.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use preflight_core::{
    Error, RequestConfig, Response, Result, Transport, Value, decode_payload,
    to_query_string,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;
use url::Url;

use super::config::TransportConfig;
use super::connector::https_connector;

// ============================================================================
// Type-Erased Service for Layer Composition
// ============================================================================

/// Type-erased transport service, the unit tower layers are composed over.
pub type BoxedService = BoxCloneService<RequestConfig, Response, Error>;

/// Future type for the Tower Service implementation.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// `BoxedService` is not `Sync`; the mutex is only held while cloning it.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, config: RequestConfig) -> ServiceFuture {
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(config).await })
    }
}

// ============================================================================
// Raw Transport
// ============================================================================

#[derive(Clone)]
struct RawHyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl RawHyperTransport {
    fn new(config: TransportConfig) -> Self {
        let connector = https_connector(config.connect_timeout);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Resolve the request URL, appending `data` as query string for
    /// methods that carry no body.
    fn build_url(config: &RequestConfig) -> Result<Url> {
        let raw = config
            .url
            .as_deref()
            .ok_or_else(|| Error::invalid_request("missing url"))?;
        let mut url = Url::parse(raw)?;

        if config.method.sends_data_as_query() {
            match &config.data {
                None | Some(Value::Null) => {}
                Some(data @ Value::Object(_)) => {
                    let query = to_query_string(data)?;
                    if !query.is_empty() {
                        let merged = match url.query() {
                            Some(existing) if !existing.is_empty() => {
                                format!("{existing}&{query}")
                            }
                            _ => query,
                        };
                        url.set_query(Some(&merged));
                    }
                }
                Some(other) => {
                    return Err(Error::invalid_request(format!(
                        "{} data must be an object, got {other}",
                        config.method
                    )));
                }
            }
        }

        Ok(url)
    }

    /// Encode `data` as request body: strings raw, everything else as JSON.
    fn build_body(config: &RequestConfig) -> Result<(Option<&'static str>, Full<Bytes>)> {
        if config.method.sends_data_as_query() {
            return Ok((None, Full::default()));
        }
        match &config.data {
            None | Some(Value::Null) => Ok((None, Full::default())),
            Some(Value::String(text)) => Ok((
                Some("text/plain; charset=utf-8"),
                Full::new(Bytes::from(text.clone())),
            )),
            Some(data) => {
                let bytes = serde_json::to_vec(data)?;
                Ok((Some("application/json"), Full::new(Bytes::from(bytes))))
            }
        }
    }

    fn build_hyper_request(
        config: &RequestConfig,
        user_agent: Option<&str>,
    ) -> Result<http::Request<Full<Bytes>>> {
        let url = Self::build_url(config)?;
        let (content_type, body) = Self::build_body(config)?;

        let mut builder = http::Request::builder()
            .method(http::Method::from(config.method))
            .uri(url.as_str());

        for (name, value) in &config.header {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let has_content_type = config
            .header
            .keys()
            .any(|name| name.eq_ignore_ascii_case("content-type"));
        if let (Some(content_type), false) = (content_type, has_content_type) {
            builder = builder.header(http::header::CONTENT_TYPE, content_type);
        }

        let has_user_agent = config
            .header
            .keys()
            .any(|name| name.eq_ignore_ascii_case("user-agent"));
        if let (Some(user_agent), false) = (user_agent, has_user_agent) {
            builder = builder.header(http::header::USER_AGENT, user_agent);
        }

        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    fn extract_headers(headers: &http::HeaderMap) -> BTreeMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, config: RequestConfig) -> Result<Response> {
        let hyper_request =
            Self::build_hyper_request(&config, self.config.user_agent.as_deref())?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let header = Self::extract_headers(response.headers());

        let limit = self.config.max_response_body;
        let body = Limited::new(response.into_body(), limit)
            .collect()
            .await
            .map_err(|err| {
                if err.is::<LengthLimitError>() {
                    Error::BodyTooLarge { limit }
                } else {
                    Error::connection(err.to_string())
                }
            })?
            .to_bytes();

        Ok(Response::new(status, header, decode_payload(&body)))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<RequestConfig> for RawHyperTransport {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, config: RequestConfig) -> Self::Future {
        let transport = self.clone();
        Box::pin(async move { transport.execute(config).await })
    }
}

// ============================================================================
// Public Transport
// ============================================================================

/// Network transport using hyper-util with connection pooling and TLS.
///
/// Builds the HTTP request from the effective config:
/// - `url` is required
/// - `header` entries become request headers
/// - `data` is sent as query string for GET, HEAD and DELETE, otherwise as
///   body (strings raw, any other value as JSON)
///
/// The response body is decoded as JSON when possible and as a string
/// otherwise. Non-2xx statuses are returned as responses, not errors.
///
/// # Example
///
/// ```ignore
/// use preflight::HyperTransport;
/// use std::time::Duration;
///
/// let transport = HyperTransport::builder()
///     .timeout(Duration::from_secs(10))
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    service: SyncService,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a new transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a new transport with custom configuration.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let raw = RawHyperTransport::new(config.clone());
        Self {
            service: SyncService::new(BoxCloneService::new(raw)),
            config,
        }
    }

    /// Create a new transport builder.
    #[must_use]
    pub fn builder() -> HyperTransportBuilder {
        HyperTransportBuilder::default()
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn request<'a>(&'a self, config: &'a RequestConfig) -> BoxFuture<'a, Result<Response>> {
        self.service.call(config.clone())
    }
}

impl Service<RequestConfig> for HyperTransport {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, config: RequestConfig) -> Self::Future {
        self.service.call(config)
    }
}

/// Builder for [`HyperTransport`].
#[derive(Default)]
pub struct HyperTransportBuilder {
    config: TransportConfig,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
}

impl std::fmt::Debug for HyperTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransportBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperTransportBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Set the response body limit in bytes.
    #[must_use]
    pub fn max_response_body(mut self, bytes: usize) -> Self {
        self.config = self.config.max_response_body(bytes);
        self
    }

    /// Set the default `User-Agent`; `None` sends none.
    #[must_use]
    pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    /// Add a Tower layer around the raw transport.
    ///
    /// Layers are applied in order: first added = innermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<RequestConfig, Response = Response, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<RequestConfig>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Build the transport.
    #[must_use]
    pub fn build(self) -> HyperTransport {
        let config = self.config;
        let mut service: BoxedService =
            BoxCloneService::new(RawHyperTransport::new(config.clone()));

        for layer_fn in self.layers {
            service = layer_fn(service);
        }

        HyperTransport {
            service: SyncService::new(service),
            config,
        }
    }
}
