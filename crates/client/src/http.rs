//! HTTP transport over `reqwest`.

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;

use crate::cache::{cache_key, ResponseCache};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{ApiRequest, Method};
use crate::response::ApiResponse;

/// Sends [`ApiRequest`]s. Cheap to clone; clones share the connection pool
/// and the response cache.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    cache: ResponseCache,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            cache: ResponseCache::new(config.cache_ttl),
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Send a request against `base_url`, attaching `token` as a bearer
    /// credential when given.
    ///
    /// Non-2xx statuses fail with [`ClientError::Status`]. The application
    /// error flag is *not* checked here; callers decide what a flagged body
    /// means for them.
    pub async fn send(
        &self,
        request: &ApiRequest,
        base_url: &str,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        let url = join_url(base_url, &request.path)?;

        let key = request
            .cache
            .then(|| cache_key(request.method.as_str(), url.as_str(), request.body.as_ref()));
        if let Some(key) = &key {
            if let Some(hit) = self.cache.get(key).await {
                tracing::debug!(method = %request.method, path = %request.path, "served from cache");
                return Ok(hit);
            }
        }

        tracing::debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        builder = builder.header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(path = %request.path, status = status.as_u16(), "request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text));
        let response = ApiResponse::new(status.as_u16(), body);

        if let Some(key) = key {
            if !response.has_error() {
                self.cache.put(key, response.clone()).await;
            }
        }

        Ok(response)
    }
}

/// Join a base URL and a relative path with exactly one `/` between them.
pub fn join_url(base_url: &str, path: &str) -> ClientResult<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{joined}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_slashes() {
        let expected = "https://demo.hotwax.io/api/login";
        assert_eq!(join_url("https://demo.hotwax.io/api/", "login").unwrap().as_str(), expected);
        assert_eq!(join_url("https://demo.hotwax.io/api", "login").unwrap().as_str(), expected);
        assert_eq!(join_url("https://demo.hotwax.io/api/", "/login").unwrap().as_str(), expected);
    }

    #[test]
    fn join_keeps_service_prefix() {
        let url = join_url("http://127.0.0.1:8080/api/", "service/updatePerson").unwrap();
        assert_eq!(url.path(), "/api/service/updatePerson");
    }

    #[test]
    fn join_rejects_garbage_base() {
        let err = join_url("not a url", "login").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
