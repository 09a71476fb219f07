//! Discovery of the implicit player and playlist targets
//!
//! Player and playlist identifiers are only valid for the current server
//! session, so they are looked up again on every call and never cached.

use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::kodi::error::KodiError;
use crate::kodi::models::{PlayerId, PlaylistId, PlaylistType};
use crate::kodi::session::Session;

const RESOLVER_LOG_TARGET: &str = "kodi_controller::kodi::resolver";

/// Identifier of the first active player in server order.
///
/// Returns `None` ("no active target") when the session is unbound, the
/// server reports no active player, or the query fails for any reason.
/// With several simultaneous players the server's order decides.
#[instrument(skip(session))]
pub async fn resolve_active_player(session: &Session) -> Option<PlayerId> {
    let Some(transport) = session.transport() else {
        debug!(target: RESOLVER_LOG_TARGET, "Session unbound, no active player");
        return None;
    };

    let players = match transport.invoke("Player.GetActivePlayers", Value::Null).await {
        Ok(players) => players,
        Err(e) => {
            info!(target: RESOLVER_LOG_TARGET, "Player.GetActivePlayers failed: {}", e);
            return None;
        }
    };

    let player_id = players
        .as_array()
        .and_then(|players| players.first())
        .and_then(|player| player.get("playerid"))
        .and_then(Value::as_i64);

    match player_id {
        Some(id) => debug!(target: RESOLVER_LOG_TARGET, "Active player: {}", id),
        None => info!(target: RESOLVER_LOG_TARGET, "No active player"),
    }
    player_id
}

/// Identifier of the playlist whose `type` equals `media_type`.
///
/// If several playlists share the type, the last one listed wins.
/// Fails with [`KodiError::NotFound`] when none matches and with
/// [`KodiError::InvalidResponse`] when the winning entry has no integer id.
/// Transport failures are returned unchanged.
#[instrument(skip(session))]
pub async fn resolve_playlist(session: &Session, media_type: PlaylistType) -> Result<PlaylistId, KodiError> {
    let Some(transport) = session.transport() else {
        return Err(KodiError::NotFound(format!("no {} playlist on an unbound session", media_type)));
    };

    let playlists = transport.invoke("Playlist.GetPlaylists", Value::Null).await?;
    let Some(playlists) = playlists.as_array() else {
        warn!(target: RESOLVER_LOG_TARGET, "Playlist.GetPlaylists returned a non-array: {}", playlists);
        return Err(KodiError::InvalidResponse("Playlist.GetPlaylists did not return a list".to_string()));
    };

    let Some(playlist) = playlists
        .iter()
        .filter(|playlist| playlist.get("type").and_then(Value::as_str) == Some(media_type.as_str()))
        .last()
    else {
        return Err(KodiError::NotFound(format!("no {} playlist", media_type)));
    };

    match playlist.get("playlistid").and_then(Value::as_i64) {
        Some(id) => {
            debug!(target: RESOLVER_LOG_TARGET, "{} playlist: {}", media_type, id);
            Ok(id)
        }
        None => Err(KodiError::InvalidResponse(format!(
            "{} playlist without an integer playlistid: {}",
            media_type, playlist
        ))),
    }
}

/// Parameter object addressing a player: `{"playerid": id}`.
pub fn player_params(player_id: PlayerId) -> Value {
    json!({ "playerid": player_id })
}

/// Parameter object addressing a playlist: `{"playlistid": id}`.
pub fn playlist_params(playlist_id: PlaylistId) -> Value {
    json!({ "playlistid": playlist_id })
}
