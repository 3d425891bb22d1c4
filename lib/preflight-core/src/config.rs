//! Per-call request configuration.
//!
//! A [`RequestConfig`] is the effective configuration of one pipeline run. It is
//! produced by [`RequestConfig::merge`], which lays the caller's
//! [`ConfigOverrides`] over a baseline config.
//!
//! # Example
//!
//! ```
//! use preflight_core::{ConfigOverrides, Method, RequestConfig};
//!
//! let overrides = ConfigOverrides::new().method(Method::Post);
//! let config = RequestConfig::default().merge(overrides);
//!
//! assert_eq!(config.method, Method::Post);
//! assert_eq!(config.delay, 0);
//! assert!(config.need_token);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Method;

/// Effective configuration, visible unchanged to every stage of one run.
///
/// Serialized with camelCase keys; caller-supplied keys without a typed
/// field live in `extra` and are flattened next to the
/// known options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestConfig {
    /// HTTP method.
    pub method: Method,
    /// Show the loading indicator while the call is in flight.
    pub show_loading: bool,
    /// Show error messages (toasts) raised by guards.
    pub show_err_msg: bool,
    /// Require a cached token before calling.
    pub need_token: bool,
    /// Delay in milliseconds, carried to the transport untouched.
    pub delay: u64,
    /// Request URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Request payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Request headers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub header: BTreeMap<String, String>,
    /// Arbitrary caller fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            method: Method::Get,
            show_loading: false,
            show_err_msg: false,
            need_token: true,
            delay: 0,
            url: None,
            data: None,
            header: BTreeMap::new(),
            extra: Map::new(),
        }
    }
}

impl RequestConfig {
    /// Shallow key-wise merge: every option present in `overrides` replaces
    /// the value in `self`, every absent option keeps the base value.
    ///
    /// `header` is replaced as a whole when supplied. `extra` keys replace
    /// base keys one by one.
    #[must_use]
    pub fn merge(&self, overrides: ConfigOverrides) -> Self {
        let mut extra = self.extra.clone();
        extra.extend(overrides.extra);

        Self {
            method: overrides.method.unwrap_or(self.method),
            show_loading: overrides.show_loading.unwrap_or(self.show_loading),
            show_err_msg: overrides.show_err_msg.unwrap_or(self.show_err_msg),
            need_token: overrides.need_token.unwrap_or(self.need_token),
            delay: overrides.delay.unwrap_or(self.delay),
            url: overrides.url.or_else(|| self.url.clone()),
            data: overrides.data.or_else(|| self.data.clone()),
            header: overrides.header.unwrap_or_else(|| self.header.clone()),
            extra,
        }
    }

    /// Caller-supplied field without a typed option.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Caller-supplied partial configuration.
///
/// Every `None` keeps the baseline value when merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    /// HTTP method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    /// Show the loading indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_loading: Option<bool>,
    /// Show error messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_err_msg: Option<bool>,
    /// Require a cached token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_token: Option<bool>,
    /// Delay in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    /// Request URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Request payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Request headers, replacing the baseline headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<BTreeMap<String, String>>,
    /// Arbitrary caller fields; keys naming a typed option belong in that
    /// option, see [`field`](Self::field).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigOverrides {
    /// Create empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set whether the loading indicator is shown.
    #[must_use]
    pub fn show_loading(mut self, show: bool) -> Self {
        self.show_loading = Some(show);
        self
    }

    /// Set whether error messages are shown.
    #[must_use]
    pub fn show_err_msg(mut self, show: bool) -> Self {
        self.show_err_msg = Some(show);
        self
    }

    /// Set whether a cached token is required.
    #[must_use]
    pub fn need_token(mut self, need: bool) -> Self {
        self.need_token = Some(need);
        self
    }

    /// Set the delay in milliseconds.
    #[must_use]
    pub fn delay(mut self, delay: u64) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the request URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the request payload.
    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the request payload from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json_data<T: Serialize>(self, data: &T) -> crate::Result<Self> {
        let value = serde_json::to_value(data)?;
        Ok(self.data(value))
    }

    /// Add a header. The resulting header map replaces the baseline headers.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set a caller field by its camelCase key.
    ///
    /// Keys naming a typed option (`showLoading`, `needToken`, `method`, ...)
    /// set that option; any other key is kept in `extra`.
    ///
    /// # Errors
    ///
    /// Returns an error if a typed option gets a value of the wrong type.
    pub fn field(self, key: impl Into<String>, value: Value) -> crate::Result<Self> {
        let mut entry = Map::new();
        entry.insert(key.into(), value);
        let single: Self = crate::from_value(&Value::Object(entry))?;
        Ok(self.overlay(single))
    }

    /// Lay `other` over `self`, option by option.
    fn overlay(self, other: Self) -> Self {
        let mut extra = self.extra;
        extra.extend(other.extra);

        Self {
            method: other.method.or(self.method),
            show_loading: other.show_loading.or(self.show_loading),
            show_err_msg: other.show_err_msg.or(self.show_err_msg),
            need_token: other.need_token.or(self.need_token),
            delay: other.delay.or(self.delay),
            url: other.url.or(self.url),
            data: other.data.or(self.data),
            header: other.header.or(self.header),
            extra,
        }
    }
}
