//! Request descriptors.
//!
//! Every backend operation is described by an [`ApiRequest`] before anything
//! touches the network, which keeps the per-operation code to a one-liner
//! and lets tests inspect the exact shape that would be sent.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the bearer credential for a request comes from.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Auth {
    /// Use the session token if one is present.
    #[default]
    Session,
    /// Use this token regardless of session state.
    Bearer(String),
    /// Send no credential.
    Anonymous,
}

impl core::fmt::Debug for Auth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Auth::Session => f.write_str("Session"),
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Auth::Anonymous => f.write_str("Anonymous"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL (e.g. `"service/updatePerson"`).
    pub path: String,
    pub body: Option<Value>,
    pub auth: Auth,
    /// Overrides the session's base URL for this request only.
    pub base_url: Option<String>,
    /// The response may be served from (and stored in) the response cache.
    pub cache: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            auth: Auth::Session,
            base_url: None,
            cache: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// A POST to a backend service under the `service/` prefix.
    pub fn service(name: &str) -> Self {
        Self::post(format!("service/{name}"))
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Decode(format!("failed to encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = Auth::Bearer(token.into());
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.auth = Auth::Anonymous;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn cacheable(mut self) -> Self {
        self.cache = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn service_requests_are_prefixed_posts() {
        let req = ApiRequest::service("updatePerson");
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "service/updatePerson");
        assert_eq!(req.auth, Auth::Session);
        assert!(!req.cache);
    }

    #[test]
    fn json_body_is_encoded() {
        let req = ApiRequest::post("setUserTimeZone")
            .json(&json!({"tzId": "UTC"}))
            .unwrap();
        assert_eq!(req.body, Some(json!({"tzId": "UTC"})));
    }

    #[test]
    fn debug_output_hides_bearer_token() {
        let req = ApiRequest::get("user-profile").bearer("very-secret-token");
        let rendered = format!("{req:?}");
        assert!(!rendered.contains("very-secret-token"));
        assert!(rendered.contains("Bearer(<redacted>)"));
    }
}
