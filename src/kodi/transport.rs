//! Transport seam between the session and the wire

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use serde_json::Value;
use std::pin::Pin;

use crate::kodi::error::KodiError;
use crate::kodi::models::Credentials;

/// Stream of body chunks returned by [`Transport::fetch_bytes`].
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, KodiError>> + Send>>;

/// Wire-level communication with a Kodi server.
///
/// Implementations never retry; failures surface as
/// [`KodiError::Transport`] or [`KodiError::Fetch`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Invoke `method` with a parameter object and return its `result`.
    async fn invoke(&self, method: &str, params: Value) -> Result<Value, KodiError>;

    /// Download raw bytes from `url` using `credentials`.
    async fn fetch_bytes(&self, url: &str, credentials: &Credentials) -> Result<ByteStream, KodiError>;

    /// Liveness check.
    async fn ping(&self) -> Result<(), KodiError> {
        self.invoke("JSONRPC.Ping", Value::Null).await.map(|_| ())
    }
}
