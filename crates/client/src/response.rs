//! Decoded responses and the backend's application-error convention.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// A successful (2xx) HTTP response with its decoded body.
///
/// Bodies that are not valid JSON are kept as a JSON string so the error
/// convention can flag them.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn has_error(&self) -> bool {
        has_error(&self.body)
    }

    /// The body, or [`ClientError::Application`] carrying the serialized
    /// payload when the error flag is set.
    pub fn into_result(self) -> ClientResult<Value> {
        if self.has_error() {
            return Err(ClientError::Application {
                payload: self.body.to_string(),
            });
        }
        Ok(self.body)
    }

    pub fn decode<T: DeserializeOwned>(self) -> ClientResult<T> {
        decode(self.into_result()?)
    }
}

pub fn decode<T: DeserializeOwned>(body: Value) -> ClientResult<T> {
    serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Whether a response body signals an application-level failure.
///
/// A body is an error when it is not a JSON object, or when any of
/// `_ERROR_MESSAGE_`, `_ERROR_MESSAGE_LIST_` or `error` is truthy. Truthiness
/// follows the backend's JavaScript clients: `null`, `false`, `0` and `""`
/// are falsy; arrays and objects are truthy even when empty.
pub fn has_error(body: &Value) -> bool {
    let Value::Object(map) = body else {
        return true;
    };
    ["_ERROR_MESSAGE_", "_ERROR_MESSAGE_LIST_", "error"]
        .iter()
        .any(|key| map.get(*key).is_some_and(is_truthy))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
