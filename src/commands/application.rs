//! Application namespace

use serde_json::{json, Value};

use super::into_record;
use crate::kodi::models::MediaRecord;
use crate::kodi::{KodiError, Session};

impl Session {
    /// Current `volume` and `muted` state.
    pub async fn get_application_properties(&self) -> Result<MediaRecord, KodiError> {
        let params = json!({ "properties": ["volume", "muted"] });
        Ok(self.call("Application.GetProperties", params).await?.map(into_record).unwrap_or_default())
    }

    /// Set the volume (0-100).
    pub async fn set_volume(&self, volume: u8) -> Result<(), KodiError> {
        self.call_unit("Application.SetVolume", json!({ "volume": volume.min(100) })).await
    }

    /// Toggle mute and return the new mute state.
    pub async fn toggle_mute(&self) -> Result<Option<bool>, KodiError> {
        let result = self.call("Application.SetMute", json!({ "mute": "toggle" })).await?;
        Ok(result.as_ref().and_then(Value::as_bool))
    }

    pub async fn quit(&self) -> Result<(), KodiError> {
        self.call_unit("Application.Quit", Value::Null).await
    }
}
