//! Transport responses and timing records.
//!
//! [`Response`] carries the decoded payload in `data`; after-hooks only ever see
//! that payload. [`TimingRecord`] is the response plus the elapsed time of the
//! call, handed once to the log sink.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response produced by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    status_code: u16,
    header: BTreeMap<String, String>,
    data: Value,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status_code: u16, header: BTreeMap<String, String>, data: Value) -> Self {
        Self {
            status_code,
            header,
            data,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status_code
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.header
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header.get(name).map(String::as_str)
    }

    /// Decoded response payload.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Consume into the payload.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }

    /// Deserialize the payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error with the failing JSON path if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_value(&self.data)
    }
}

/// One timing measurement: the response fields plus `delta`, the elapsed
/// milliseconds of the transport call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingRecord {
    #[serde(flatten)]
    response: Response,
    delta: u64,
}

impl TimingRecord {
    /// Creates a new timing record.
    #[must_use]
    pub const fn new(response: Response, delta: u64) -> Self {
        Self { response, delta }
    }

    /// The measured response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// Elapsed milliseconds between probe start and stop.
    #[must_use]
    pub const fn delta(&self) -> u64 {
        self.delta
    }

    /// Consume into the measured response.
    #[must_use]
    pub fn into_response(self) -> Response {
        self.response
    }
}
