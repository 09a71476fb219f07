//! JSON-RPC over HTTP transport for Kodi

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, trace, warn};
use url::Url;

use crate::kodi::error::KodiError;
use crate::kodi::models::{Credentials, RpcRequest, RpcResponse};
use crate::kodi::transport::{ByteStream, Transport};

const HTTP_LOG_TARGET: &str = "kodi_controller::kodi::http";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport speaking JSON-RPC 2.0 to `http://host:port/jsonrpc`
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
    request_id: AtomicU64,
}

impl HttpTransport {
    /// Create a transport for the server described by `credentials`
    pub fn new(credentials: &Credentials) -> Result<Self, KodiError> {
        Self::with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(credentials: &Credentials, timeout: Duration) -> Result<Self, KodiError> {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(target: HTTP_LOG_TARGET, "Error creating HTTP client with timeout: {:?}. Falling back to default.", e);
                Client::new()
            }
        };

        let endpoint = server_url(credentials)?.join("jsonrpc")?;
        debug!(target: HTTP_LOG_TARGET, "JSON-RPC endpoint: {}", endpoint);

        Ok(HttpTransport {
            client,
            endpoint,
            credentials: credentials.clone(),
            request_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn handle_rpc_response(method: &str, response: Response) -> Result<Value, KodiError> {
        let status = response.status();
        trace!(target: HTTP_LOG_TARGET, "{} response status: {}", method, status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(target: HTTP_LOG_TARGET, "{} failed. Status: {}, Body: {}", method, status, error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    KodiError::Transport(format!("Authentication failed ({})", status))
                }
                _ => KodiError::Transport(format!("HTTP status {}: {}", status, error_text)),
            });
        }

        let response_text = response.text().await?;
        if response_text.is_empty() {
            return Err(KodiError::Transport(format!("Empty response body for {}", method)));
        }

        let envelope: RpcResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(target: HTTP_LOG_TARGET, "JSON parsing error: {}. Response text:\n{}", e, response_text);
            KodiError::Transport(format!("Failed to parse JSON-RPC response: {}", e))
        })?;

        if let Some(fault) = envelope.error {
            warn!(target: HTTP_LOG_TARGET, "{} returned fault {}: {}", method, fault.code, fault.message);
            return Err(KodiError::Transport(format!("Server fault {}: {}", fault.code, fault.message)));
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

/// Base URL of the server, always with a trailing slash.
pub fn server_url(credentials: &Credentials) -> Result<Url, KodiError> {
    let host = credentials.host.trim_end_matches('/');
    let base = if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}:{}/", host, credentials.port)
    } else {
        format!("http://{}:{}/", host, credentials.port)
    };
    Ok(Url::parse(&base)?)
}

fn authorize(builder: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    if credentials.has_auth() {
        builder.basic_auth(&credentials.username, Some(&credentials.password))
    } else {
        builder
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn invoke(&self, method: &str, params: Value) -> Result<Value, KodiError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id(),
        };
        debug!(target: HTTP_LOG_TARGET, "Invoking {} (id {})", method, request.id);
        trace!(target: HTTP_LOG_TARGET, "Request params: {}", request.params);

        let builder = self.client.post(self.endpoint.clone()).json(&request);
        let response = authorize(builder, &self.credentials).send().await?;
        Self::handle_rpc_response(method, response).await
    }

    async fn fetch_bytes(&self, url: &str, credentials: &Credentials) -> Result<ByteStream, KodiError> {
        debug!(target: HTTP_LOG_TARGET, "Fetching bytes from: {}", url);
        let response = authorize(self.client.get(url), credentials)
            .send()
            .await
            .map_err(|e| KodiError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(target: HTTP_LOG_TARGET, "Fetch of {} failed with status {}", url, status);
            return Err(KodiError::Fetch(format!("HTTP status {} for {}", status, url)));
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| KodiError::Fetch(e.to_string())));
        Ok(Box::pin(stream))
    }
}
