//! HTTP transport for the inventory API
//!
//! Wraps `reqwest` with the conventions every endpoint shares: paths are
//! appended to one configured base URL, bodies are JSON, non-2xx statuses
//! become [`ClientError::Status`] carrying the server's own message when it
//! sent one, and an empty body (e.g. `204 No Content`) comes back as `None`
//! instead of a parse error.

use crate::config::ApiConfig;
use crate::core::error::{ClientError, ClientResult};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Thin JSON-over-HTTP helper bound to a base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Transport {
                method: "-".to_string(),
                path: config.base_url.clone(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Build a transport around an existing client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Perform a request and decode the JSON body, if any
    ///
    /// `query` pairs are appended URL-encoded; `body` is sent as JSON.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, i64)],
        body: Option<&B>,
    ) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let result = self.send(&method, path, query, body).await;
        if let Err(err) = &result {
            tracing::warn!(
                method = %method,
                path = %path,
                code = err.error_code(),
                error = %err,
                "API request failed"
            );
        }
        result
    }

    async fn send<T, B>(
        &self,
        method: &Method,
        path: &str,
        query: &[(&str, i64)],
        body: Option<&B>,
    ) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let transport_error = |e: reqwest::Error| ClientError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            message: e.to_string(),
        };

        let mut request = self.client.request(method.clone(), self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, path = %path, "Sending API request");

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: server_message(&bytes)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }

        decode_body(path, &bytes)
    }

    /// `GET` a resource that must have a body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, i64)],
    ) -> ClientResult<T> {
        let body = self.request::<T, ()>(Method::GET, path, query, None).await?;
        require_body(path, body)
    }

    /// `POST` a JSON payload and decode the response, which must have a body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.request(Method::POST, path, &[], Some(body)).await?;
        require_body(path, body)
    }

    /// `POST` without a payload, ignoring any response body
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        self.request::<serde::de::IgnoredAny, ()>(Method::POST, path, &[], None)
            .await
            .map(|_| ())
    }

    /// `DELETE`, ignoring any response body
    pub async fn delete(&self, path: &str, query: &[(&str, i64)]) -> ClientResult<()> {
        self.request::<serde::de::IgnoredAny, ()>(Method::DELETE, path, query, None)
            .await
            .map(|_| ())
    }
}

/// Decode a success body; blank bodies are `None`
fn decode_body<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> ClientResult<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| ClientError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
}

fn require_body<T>(path: &str, body: Option<T>) -> ClientResult<T> {
    body.ok_or_else(|| ClientError::Decode {
        path: path.to_string(),
        message: "expected a JSON body, got an empty response".to_string(),
    })
}

/// Extract the human-readable message from an error body
///
/// Understands `{"detail": "..."}`, validation-style
/// `{"detail": [{"msg": "..."}, ...]}` and `{"message": "..."}`.
fn server_message(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;

    match value.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
