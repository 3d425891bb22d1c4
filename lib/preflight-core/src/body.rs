//! Payload encoding utilities.

use serde_json::Value;

use crate::Result;

/// Serialize a request payload to a query string.
///
/// Only flat objects of scalar values can be encoded.
///
/// # Errors
///
/// Returns an error if query serialization fails.
///
/// # Example
///
/// ```
/// use preflight_core::to_query_string;
/// use serde_json::json;
///
/// let query = to_query_string(&json!({"page": 1, "q": "rust"})).expect("serialize");
/// assert_eq!(query, "page=1&q=rust");
/// ```
pub fn to_query_string(data: &Value) -> Result<String> {
    serde_urlencoded::to_string(data).map_err(Into::into)
}

/// Decode a response body: JSON when it parses, a string otherwise.
///
/// An empty body decodes to an empty string.
#[must_use]
pub fn decode_payload(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "user.address.city").
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize a decoded payload with path-aware error messages.
///
/// # Errors
///
/// Returns an error if the payload does not match `T`.
pub fn from_value<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_string_from_object() {
        let query = to_query_string(&json!({"id": 7, "active": true})).expect("serialize");
        assert_eq!(query, "active=true&id=7");
    }

    #[test]
    fn query_string_rejects_nested_objects() {
        let result = to_query_string(&json!({"filter": {"a": 1}}));
        assert!(result.is_err());
    }

    #[test]
    fn decode_json_payload() {
        assert_eq!(decode_payload(br#"{"ok":true}"#), json!({"ok": true}));
    }

    #[test]
    fn decode_text_payload() {
        assert_eq!(decode_payload(b"plain text"), json!("plain text"));
        assert_eq!(decode_payload(b""), json!(""));
    }

    #[test]
    fn from_json_deserialize() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            name: String,
            age: u32,
        }

        let user: User = from_json(br#"{"name":"Alice","age":30}"#).expect("deserialize");
        assert_eq!(
            user,
            User {
                name: "Alice".to_string(),
                age: 30,
            }
        );
    }

    #[test]
    fn from_value_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let result: Result<User> = from_value(&json!({"address": {}}));

        let err = result.expect_err("should fail");
        let msg = err.to_string();
        assert!(
            msg.contains("address"),
            "Expected path 'address' in error: {msg}"
        );
        assert!(msg.contains("city"), "Expected field 'city' in error: {msg}");
    }
}
