//! Integration tests for the command layer against an in-memory transport

use crate::test_utils::{bound_session, test_credentials, MockTransport};
use kodi_controller::commands::SubtitleMode;
use kodi_controller::kodi::resume::percentage_of;
use kodi_controller::kodi::{KodiError, PlaylistType, ServerStatus, Session};
use serde_json::json;
use std::error::Error;
use std::sync::Arc;
use tempfile::tempdir;

#[cfg(test)]
mod command_integration_tests {
    use super::*;

    fn playlists() -> serde_json::Value {
        json!([{"playlistid": 0, "type": "audio"}, {"playlistid": 1, "type": "video"}])
    }

    #[tokio::test]
    async fn test_status() {
        let online = Arc::new(MockTransport::new().respond("JSONRPC.Ping", json!("pong")));
        assert_eq!(bound_session(&online).status().await, ServerStatus::Online);

        let offline = Arc::new(MockTransport::new().fail("JSONRPC.Ping", "connection refused"));
        assert_eq!(bound_session(&offline).status().await, ServerStatus::Offline);
    }

    #[tokio::test]
    async fn test_unbound_session_commands_are_noops() -> Result<(), Box<dyn Error>> {
        let session = Session::new(test_credentials());

        assert!(session.get_movies().await?.is_empty());
        assert!(session.get_movie_details(1).await?.is_empty());
        assert!(session.get_item().await?.is_empty());
        assert_eq!(session.play_pause().await?, None);
        session.stop().await?;
        session.set_volume(50).await?;
        assert!(session.playlist_items(PlaylistType::Video).await?.is_empty());
        assert!(session.open_playlist(PlaylistType::Video).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_movies_are_cached_and_normalized() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let transport = Arc::new(MockTransport::new().respond(
            "VideoLibrary.GetMovies",
            json!({"movies": [
                {"movieid": 1, "title": "Heat", "thumbnail": "image://heat.jpg/", "resume": {"position": 900, "total": 3600}},
                {"movieid": 2, "title": "Ronin", "thumbnail": "", "resume": {"position": 0, "total": 0}}
            ], "limits": {"total": 2}}),
        ));
        let session = bound_session(&transport).with_thumbnail_cache(dir.path());

        let movies = session.get_movies().await?;

        assert_eq!(movies.len(), 2);
        assert_eq!(percentage_of(&movies[0]), Some(25.0));
        assert_eq!(percentage_of(&movies[1]), Some(0.0));
        let thumbnail = movies[0]["thumbnail"].as_str().unwrap_or_default().to_string();
        assert_eq!(thumbnail.len(), 32);
        assert!(dir.path().join(&thumbnail).is_file());
        assert_eq!(movies[1]["thumbnail"], json!(""));

        let params = transport.params_of("VideoLibrary.GetMovies").unwrap_or_default();
        assert!(params["properties"].as_array().map_or(false, |p| p.contains(&json!("resume"))));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_library_yields_no_movies() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(MockTransport::new().respond("VideoLibrary.GetMovies", json!({"limits": {"total": 0}})));
        assert!(bound_session(&transport).get_movies().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seasons_get_synthesized_resume() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(MockTransport::new().respond(
            "VideoLibrary.GetSeasons",
            json!({"seasons": [{"season": 1, "watchedepisodes": 5, "episode": 10, "thumbnail": ""}]}),
        ));
        let session = bound_session(&transport);

        let seasons = session.get_seasons(42).await?;

        assert_eq!(seasons[0]["resume"], json!({"percentage": 50.0}));
        assert_eq!(transport.params_of("VideoLibrary.GetSeasons").unwrap_or_default()["tvshowid"], json!(42));
        Ok(())
    }

    #[tokio::test]
    async fn test_episode_numbers_become_integers() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(MockTransport::new().respond(
            "VideoLibrary.GetEpisodes",
            json!({"episodes": [{"episode": "3", "resume": {"position": 1, "total": 2}}]}),
        ));

        let episodes = bound_session(&transport).get_episodes(1, 2).await?;

        assert_eq!(episodes[0]["episode"], json!(3));
        assert_eq!(percentage_of(&episodes[0]), Some(50.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_details_without_payload_is_invalid_response() {
        let transport = Arc::new(MockTransport::new().respond("VideoLibrary.GetMovieDetails", json!({})));
        let result = bound_session(&transport).get_movie_details(9).await;
        assert!(matches!(result, Err(KodiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_player_commands_without_active_player() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(MockTransport::new().respond("Player.GetActivePlayers", json!([])));
        let session = bound_session(&transport);

        assert!(session.get_item().await?.is_empty());
        assert_eq!(session.play_pause().await?, None);
        session.stop().await?;
        session.seek(50.0).await?;
        session.set_subtitle(SubtitleMode::Next).await?;

        assert!(transport.methods().iter().all(|m| m == "Player.GetActivePlayers"));
        Ok(())
    }

    #[tokio::test]
    async fn test_player_commands_target_active_player() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(
            MockTransport::new()
                .respond("Player.GetActivePlayers", json!([{"playerid": 1, "type": "video"}]))
                .respond("Player.PlayPause", json!({"speed": 0}))
                .respond("Player.Seek", json!({"percentage": 42.0}))
                .respond("Player.Stop", json!("OK")),
        );
        let session = bound_session(&transport);

        assert_eq!(session.play_pause().await?, Some(0));
        session.seek(42.0).await?;
        session.stop().await?;

        assert_eq!(transport.params_of("Player.PlayPause"), Some(json!({"playerid": 1})));
        assert_eq!(
            transport.params_of("Player.Seek"),
            Some(json!({"playerid": 1, "value": {"percentage": 42.0}}))
        );
        assert_eq!(transport.params_of("Player.Stop"), Some(json!({"playerid": 1})));
        Ok(())
    }

    #[tokio::test]
    async fn test_player_errors_after_resolution_propagate() {
        let transport = Arc::new(
            MockTransport::new()
                .respond("Player.GetActivePlayers", json!([{"playerid": 1}]))
                .fail("Player.Stop", "server fault"),
        );
        let result = bound_session(&transport).stop().await;
        assert!(matches!(result, Err(KodiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_playlist_commands_resolve_by_type() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(
            MockTransport::new()
                .respond("Playlist.GetPlaylists", playlists())
                .respond("Playlist.Add", json!("OK"))
                .respond("Playlist.Remove", json!("OK"))
                .respond("Player.Open", json!("OK"))
                .respond("Playlist.GetItems", json!({"items": [{"label": "Pilot", "thumbnail": ""}]})),
        );
        let session = bound_session(&transport);

        session.playlist_add(PlaylistType::Video, json!({"episodeid": 12})).await?;
        session.playlist_remove(PlaylistType::Audio, 3).await?;
        session.open_playlist(PlaylistType::Video).await?;
        let items = session.playlist_items(PlaylistType::Video).await?;

        assert_eq!(
            transport.params_of("Playlist.Add"),
            Some(json!({"playlistid": 1, "item": {"episodeid": 12}}))
        );
        assert_eq!(transport.params_of("Playlist.Remove"), Some(json!({"playlistid": 0, "position": 3})));
        assert_eq!(transport.params_of("Player.Open"), Some(json!({"item": {"playlistid": 1}})));
        assert_eq!(items.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_playlist_command_without_matching_playlist_fails() {
        let transport = Arc::new(MockTransport::new().respond("Playlist.GetPlaylists", playlists()));
        let result = bound_session(&transport).playlist_clear(PlaylistType::Picture).await;

        assert!(matches!(result, Err(KodiError::NotFound(_))));
        assert!(transport.params_of("Playlist.Clear").is_none());
    }

    #[tokio::test]
    async fn test_application_commands() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(
            MockTransport::new()
                .respond("Application.GetProperties", json!({"volume": 80, "muted": false}))
                .respond("Application.SetVolume", json!(100))
                .respond("Application.SetMute", json!(true)),
        );
        let session = bound_session(&transport);

        let properties = session.get_application_properties().await?;
        session.set_volume(150).await?;
        let muted = session.toggle_mute().await?;

        assert_eq!(properties["volume"], json!(80));
        assert_eq!(transport.params_of("Application.SetVolume"), Some(json!({"volume": 100})));
        assert_eq!(transport.params_of("Application.SetMute"), Some(json!({"mute": "toggle"})));
        assert_eq!(muted, Some(true));
        Ok(())
    }

    #[tokio::test]
    async fn test_library_browsing() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(
            MockTransport::new()
                .respond("Files.GetSources", json!({"sources": [{"label": "Movies", "file": "smb://nas/movies/"}]}))
                .respond("Addons.GetAddons", json!({"addons": [{"addonid": "plugin.video.foo"}]}))
                .respond("Favourites.GetFavourites", json!({"favourites": null})),
        );
        let session = bound_session(&transport);

        let sources = session.get_sources("video").await?;
        let addons = session.get_addons(Some("video")).await?;
        let favourites = session.get_favourites().await?;

        assert_eq!(sources[0]["file"], json!("smb://nas/movies/"));
        assert_eq!(addons.len(), 1);
        assert_eq!(transport.params_of("Addons.GetAddons").unwrap_or_default()["content"], json!("video"));
        assert!(favourites.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_playcount_only_when_given() -> Result<(), Box<dyn Error>> {
        let transport = Arc::new(MockTransport::new().respond("VideoLibrary.SetMovieDetails", json!("OK")));
        let session = bound_session(&transport);

        session.set_movie_playcount(5, None).await?;
        assert_eq!(transport.params_of("VideoLibrary.SetMovieDetails"), Some(json!({"movieid": 5})));

        session.set_movie_playcount(5, Some(1)).await?;
        assert_eq!(
            transport.params_of("VideoLibrary.SetMovieDetails"),
            Some(json!({"movieid": 5, "playcount": 1}))
        );
        Ok(())
    }
}
