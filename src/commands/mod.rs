//! Command layer: one method on [`Session`] per remote capability
//!
//! Every command builds its parameter object, invokes the transport and
//! post-processes the result. On an unbound session, or when a player
//! command finds no active player, the command returns an empty result.

mod application;
mod library;
mod player;
mod playlist;
mod system;
mod video_library;

pub use player::SubtitleMode;

use serde_json::Value;
use tracing::{debug, info};

use crate::kodi::models::{MediaRecord, ServerStatus};
use crate::kodi::resume;
use crate::kodi::thumbnail;
use crate::kodi::{KodiError, Session};

pub(crate) const COMMAND_LOG_TARGET: &str = "kodi_controller::commands";

impl Session {
    /// `Online` if the server answers `JSONRPC.Ping`, `Offline` otherwise.
    pub async fn status(&self) -> ServerStatus {
        let Some(transport) = self.transport() else {
            return ServerStatus::Offline;
        };
        match transport.ping().await {
            Ok(()) => ServerStatus::Online,
            Err(e) => {
                info!(target: COMMAND_LOG_TARGET, "Ping failed: {}", e);
                ServerStatus::Offline
            }
        }
    }

    /// Invoke `method`, or `None` when the session is unbound.
    pub(crate) async fn call(&self, method: &str, params: Value) -> Result<Option<Value>, KodiError> {
        match self.transport() {
            Some(transport) => transport.invoke(method, params).await.map(Some),
            None => {
                debug!(target: COMMAND_LOG_TARGET, "Session unbound, skipping {}", method);
                Ok(None)
            }
        }
    }

    /// Invoke `method` for its side effect only.
    pub(crate) async fn call_unit(&self, method: &str, params: Value) -> Result<(), KodiError> {
        self.call(method, params).await.map(|_| ())
    }

    /// Resolve thumbnails and, when `with_resume` is set, normalize resume
    /// progress on `records`.
    pub(crate) async fn post_process(&self, records: &mut [MediaRecord], with_resume: bool) -> Result<(), KodiError> {
        thumbnail::resolve_thumbnails(self, records).await?;
        if with_resume {
            resume::normalize_all(records);
        }
        Ok(())
    }

    /// Fetch a list of records found under `key` and post-process it.
    pub(crate) async fn fetch_list(
        &self,
        method: &str,
        params: Value,
        key: &str,
        with_resume: bool,
    ) -> Result<Vec<MediaRecord>, KodiError> {
        let Some(mut result) = self.call(method, params).await? else {
            return Ok(Vec::new());
        };
        let mut records = take_list(&mut result, key);
        self.post_process(&mut records, with_resume).await?;
        Ok(records)
    }

    /// Fetch the single record found under `key` and post-process it.
    pub(crate) async fn fetch_record(
        &self,
        method: &str,
        params: Value,
        key: &str,
        with_resume: bool,
    ) -> Result<MediaRecord, KodiError> {
        let Some(mut result) = self.call(method, params).await? else {
            return Ok(MediaRecord::new());
        };
        let record = take_record(&mut result, key)?;
        let mut records = [record];
        self.post_process(&mut records, with_resume).await?;
        let [record] = records;
        Ok(record)
    }
}

/// Records in the array under `key`. A missing key (e.g. an empty library)
/// yields an empty list; non-object entries are dropped.
pub(crate) fn take_list(result: &mut Value, key: &str) -> Vec<MediaRecord> {
    match result.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The object under `key`.
pub(crate) fn take_record(result: &mut Value, key: &str) -> Result<MediaRecord, KodiError> {
    match result.get_mut(key).map(Value::take) {
        Some(Value::Object(record)) => Ok(record),
        _ => Err(KodiError::InvalidResponse(format!("missing '{}' in response", key))),
    }
}

/// The whole result as a record.
pub(crate) fn into_record(result: Value) -> MediaRecord {
    match result {
        Value::Object(record) => record,
        _ => MediaRecord::new(),
    }
}
