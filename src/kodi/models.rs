//! Data models shared between the transport, the session and the command layer

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A server-shaped record describing a playable entity (movie, episode,
/// season, show, playlist entry, favourite, addon or file).
///
/// Records are kept as raw JSON objects because the server decides which
/// fields are present; post-processors rewrite them in place.
pub type MediaRecord = Map<String, Value>;

/// Transient player identifier, valid only for the current server session.
pub type PlayerId = i64;

/// Transient playlist identifier, valid only for the current server session.
pub type PlaylistId = i64;

/// Connection credentials for a Kodi server
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Self {
        Credentials {
            host: host.to_string(),
            port,
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Whether HTTP basic auth should be sent with requests.
    pub fn has_auth(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Playlist media types as reported by `Playlist.GetPlaylists`
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistType {
    Audio,
    Video,
    Picture,
    Mixed,
}

impl PlaylistType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistType::Audio => "audio",
            PlaylistType::Video => "video",
            PlaylistType::Picture => "picture",
            PlaylistType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for PlaylistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlaylistType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "audio" | "music" => Ok(PlaylistType::Audio),
            "video" => Ok(PlaylistType::Video),
            "picture" | "pictures" => Ok(PlaylistType::Picture),
            "mixed" => Ok(PlaylistType::Mixed),
            other => Err(format!("Unknown playlist type: {}", other)),
        }
    }
}

/// Liveness of the remote server as seen by `JSONRPC.Ping`
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Online,
    Offline,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerStatus::Online => f.write_str("Online"),
            ServerStatus::Offline => f.write_str("Offline"),
        }
    }
}

/// JSON-RPC 2.0 request envelope
#[derive(Serialize, Debug)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
    pub id: u64,
}

/// JSON-RPC 2.0 response envelope
#[derive(Deserialize, Debug)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcFault>,
}

/// Fault object reported by the server
#[derive(Deserialize, Debug, Clone)]
pub struct RpcFault {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}
