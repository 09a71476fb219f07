//! Player namespace
//!
//! Transport controls target the first active player. Without one they
//! return an empty result instead of failing.

use serde_json::{json, Value};
use tracing::info;

use super::{into_record, take_record, COMMAND_LOG_TARGET};
use crate::kodi::models::{MediaRecord, PlaylistType};
use crate::kodi::resolver::{player_params, resolve_active_player, resolve_playlist};
use crate::kodi::{thumbnail, KodiError, PlayerId, Session};

const ITEM_PROPERTIES: &[&str] = &["title", "showtitle", "thumbnail", "tvshowid", "episode", "season", "uniqueid"];

const PLAYER_PROPERTIES: &[&str] = &[
    "type",
    "partymode",
    "speed",
    "time",
    "percentage",
    "totaltime",
    "playlistid",
    "position",
    "repeat",
    "shuffled",
    "canseek",
    "canchangespeed",
    "canmove",
    "canzoom",
    "canrotate",
    "canshuffle",
    "canrepeat",
    "currentaudiostream",
    "audiostreams",
    "subtitleenabled",
    "currentsubtitle",
    "subtitles",
    "live",
];

/// Subtitle switch modes understood by `Player.SetSubtitle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleMode {
    On,
    Off,
    Next,
    Previous,
}

impl SubtitleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleMode::On => "on",
            SubtitleMode::Off => "off",
            SubtitleMode::Next => "next",
            SubtitleMode::Previous => "previous",
        }
    }
}

impl std::str::FromStr for SubtitleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "on" => Ok(SubtitleMode::On),
            "off" => Ok(SubtitleMode::Off),
            "next" => Ok(SubtitleMode::Next),
            "previous" | "prev" => Ok(SubtitleMode::Previous),
            other => Err(format!("Unknown subtitle mode: {}", other)),
        }
    }
}

impl Session {
    async fn active_player(&self, command: &str) -> Option<PlayerId> {
        let player_id = resolve_active_player(self).await;
        if player_id.is_none() {
            info!(target: COMMAND_LOG_TARGET, "{} skipped: no active player", command);
        }
        player_id
    }

    /// Player core id of the first player able to play `media`.
    pub async fn get_players(&self, media: &str) -> Result<Option<String>, KodiError> {
        let Some(players) = self.call("Player.GetPlayers", json!({ "media": media })).await? else {
            return Ok(None);
        };
        let core_id = players
            .as_array()
            .and_then(|players| players.first())
            .and_then(|player| player.get("playercoreid"))
            .map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        Ok(core_id)
    }

    /// Item currently playing.
    pub async fn get_item(&self) -> Result<MediaRecord, KodiError> {
        let Some(player_id) = self.active_player("Player.GetItem").await else {
            return Ok(MediaRecord::new());
        };
        let params = json!({ "playerid": player_id, "properties": ITEM_PROPERTIES });
        let Some(mut result) = self.call("Player.GetItem", params).await? else {
            return Ok(MediaRecord::new());
        };
        let mut items = [take_record(&mut result, "item")?];
        thumbnail::resolve_thumbnails(self, &mut items).await?;
        let [item] = items;
        Ok(item)
    }

    pub async fn get_player_properties(&self) -> Result<MediaRecord, KodiError> {
        let Some(player_id) = self.active_player("Player.GetProperties").await else {
            return Ok(MediaRecord::new());
        };
        let params = json!({ "playerid": player_id, "properties": PLAYER_PROPERTIES });
        Ok(self.call("Player.GetProperties", params).await?.map(into_record).unwrap_or_default())
    }

    /// Toggle play/pause and return the resulting speed.
    pub async fn play_pause(&self) -> Result<Option<i64>, KodiError> {
        let Some(player_id) = self.active_player("Player.PlayPause").await else {
            return Ok(None);
        };
        let result = self.call("Player.PlayPause", player_params(player_id)).await?;
        Ok(result.and_then(|result| result.get("speed").and_then(Value::as_i64)))
    }

    pub async fn stop(&self) -> Result<(), KodiError> {
        let Some(player_id) = self.active_player("Player.Stop").await else {
            return Ok(());
        };
        self.call_unit("Player.Stop", player_params(player_id)).await
    }

    /// Seek to `percentage` of the current item.
    pub async fn seek(&self, percentage: f64) -> Result<(), KodiError> {
        let Some(player_id) = self.active_player("Player.Seek").await else {
            return Ok(());
        };
        let params = json!({ "playerid": player_id, "value": { "percentage": percentage } });
        self.call_unit("Player.Seek", params).await
    }

    /// Jump to position `index` of the active playlist.
    pub async fn go_to(&self, index: i64) -> Result<(), KodiError> {
        let Some(player_id) = self.active_player("Player.GoTo").await else {
            return Ok(());
        };
        self.call_unit("Player.GoTo", json!({ "playerid": player_id, "to": index })).await
    }

    pub async fn set_speed(&self, speed: i64) -> Result<(), KodiError> {
        let Some(player_id) = self.active_player("Player.SetSpeed").await else {
            return Ok(());
        };
        self.call_unit("Player.SetSpeed", json!({ "playerid": player_id, "speed": speed })).await
    }

    pub async fn set_subtitle(&self, mode: SubtitleMode) -> Result<(), KodiError> {
        let Some(player_id) = self.active_player("Player.SetSubtitle").await else {
            return Ok(());
        };
        let params = json!({ "playerid": player_id, "subtitle": mode.as_str() });
        self.call_unit("Player.SetSubtitle", params).await
    }

    /// Start playing the playlist of `media_type`.
    pub async fn open_playlist(&self, media_type: PlaylistType) -> Result<MediaRecord, KodiError> {
        if !self.is_bound() {
            return Ok(MediaRecord::new());
        }
        let playlist_id = resolve_playlist(self, media_type).await?;
        let params = json!({ "item": { "playlistid": playlist_id } });
        Ok(self.call("Player.Open", params).await?.map(into_record).unwrap_or_default())
    }
}
