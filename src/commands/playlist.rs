//! Playlist namespace
//!
//! Playlists are addressed by media type; the matching playlist id is
//! resolved on every call.

use serde_json::{json, Value};

use super::take_list;
use crate::kodi::models::{MediaRecord, PlaylistId, PlaylistType};
use crate::kodi::resolver::{playlist_params, resolve_playlist};
use crate::kodi::{thumbnail, KodiError, Session};

const ITEM_PROPERTIES: &[&str] = &["title", "showtitle", "thumbnail", "tvshowid", "episode", "season", "uniqueid"];

impl Session {
    /// Playlist id for `media_type`, or `None` on an unbound session.
    async fn playlist_for(&self, media_type: PlaylistType) -> Result<Option<PlaylistId>, KodiError> {
        if !self.is_bound() {
            return Ok(None);
        }
        resolve_playlist(self, media_type).await.map(Some)
    }

    /// Append `item` (e.g. `{"episodeid": 12}` or `{"file": "..."}`) to the
    /// playlist of `media_type`.
    pub async fn playlist_add(&self, media_type: PlaylistType, item: Value) -> Result<(), KodiError> {
        let Some(playlist_id) = self.playlist_for(media_type).await? else {
            return Ok(());
        };
        self.call_unit("Playlist.Add", json!({ "playlistid": playlist_id, "item": item })).await
    }

    pub async fn playlist_clear(&self, media_type: PlaylistType) -> Result<(), KodiError> {
        let Some(playlist_id) = self.playlist_for(media_type).await? else {
            return Ok(());
        };
        self.call_unit("Playlist.Clear", playlist_params(playlist_id)).await
    }

    pub async fn playlist_items(&self, media_type: PlaylistType) -> Result<Vec<MediaRecord>, KodiError> {
        let Some(playlist_id) = self.playlist_for(media_type).await? else {
            return Ok(Vec::new());
        };
        let params = json!({ "playlistid": playlist_id, "properties": ITEM_PROPERTIES });
        let Some(mut result) = self.call("Playlist.GetItems", params).await? else {
            return Ok(Vec::new());
        };
        let mut items = take_list(&mut result, "items");
        thumbnail::resolve_thumbnails(self, &mut items).await?;
        Ok(items)
    }

    /// Remove the entry at `position`.
    pub async fn playlist_remove(&self, media_type: PlaylistType, position: i64) -> Result<(), KodiError> {
        let Some(playlist_id) = self.playlist_for(media_type).await? else {
            return Ok(());
        };
        self.call_unit("Playlist.Remove", json!({ "playlistid": playlist_id, "position": position })).await
    }
}
