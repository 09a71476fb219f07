//! VideoLibrary namespace

use serde_json::{json, Value};

use crate::kodi::models::MediaRecord;
use crate::kodi::{KodiError, Session};

const MOVIE_PROPERTIES: &[&str] = &["title", "lastplayed", "thumbnail", "plot", "playcount", "resume", "file"];

const EPISODE_PROPERTIES: &[&str] = &[
    "title",
    "plot",
    "showtitle",
    "thumbnail",
    "tvshowid",
    "episode",
    "season",
    "playcount",
    "lastplayed",
    "resume",
    "file",
];

const SEASON_PROPERTIES: &[&str] = &[
    "season",
    "showtitle",
    "playcount",
    "episode",
    "fanart",
    "thumbnail",
    "tvshowid",
    "watchedepisodes",
    "art",
];

impl Session {
    pub async fn get_movies(&self) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "properties": MOVIE_PROPERTIES });
        self.fetch_list("VideoLibrary.GetMovies", params, "movies", true).await
    }

    pub async fn get_movie_details(&self, movie_id: i64) -> Result<MediaRecord, KodiError> {
        let params = json!({ "movieid": movie_id, "properties": MOVIE_PROPERTIES });
        self.fetch_record("VideoLibrary.GetMovieDetails", params, "moviedetails", true).await
    }

    pub async fn get_recently_added_movies(&self) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "properties": ["title", "thumbnail"] });
        self.fetch_list("VideoLibrary.GetRecentlyAddedMovies", params, "movies", false).await
    }

    pub async fn get_tv_shows(&self) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "properties": ["title", "thumbnail", "episode", "watchedepisodes"] });
        self.fetch_list("VideoLibrary.GetTVShows", params, "tvshows", true).await
    }

    pub async fn get_tv_show_details(&self, show_id: i64) -> Result<MediaRecord, KodiError> {
        let params = json!({ "tvshowid": show_id, "properties": ["title", "thumbnail", "plot"] });
        self.fetch_record("VideoLibrary.GetTVShowDetails", params, "tvshowdetails", false).await
    }

    pub async fn get_seasons(&self, show_id: i64) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "tvshowid": show_id, "properties": SEASON_PROPERTIES });
        self.fetch_list("VideoLibrary.GetSeasons", params, "seasons", true).await
    }

    /// Episodes of one season. Episode numbers are coerced to integers.
    pub async fn get_episodes(&self, show_id: i64, season: i64) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "tvshowid": show_id, "season": season, "properties": EPISODE_PROPERTIES });
        let mut episodes = self.fetch_list("VideoLibrary.GetEpisodes", params, "episodes", true).await?;
        for episode in episodes.iter_mut() {
            let number = match episode.get("episode") {
                Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
                Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
                _ => None,
            };
            if let Some(number) = number {
                episode.insert("episode".to_string(), Value::from(number));
            }
        }
        Ok(episodes)
    }

    pub async fn get_episode_details(&self, episode_id: i64) -> Result<MediaRecord, KodiError> {
        let params = json!({ "episodeid": episode_id, "properties": EPISODE_PROPERTIES });
        self.fetch_record("VideoLibrary.GetEpisodeDetails", params, "episodedetails", true).await
    }

    pub async fn get_recently_added_episodes(&self) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "properties": ["title", "showtitle", "thumbnail", "tvshowid", "episode", "season"] });
        self.fetch_list("VideoLibrary.GetRecentlyAddedEpisodes", params, "episodes", false).await
    }

    pub async fn remove_movie(&self, movie_id: i64) -> Result<(), KodiError> {
        self.call_unit("VideoLibrary.RemoveMovie", json!({ "movieid": movie_id })).await
    }

    pub async fn remove_tv_show(&self, show_id: i64) -> Result<(), KodiError> {
        self.call_unit("VideoLibrary.RemoveTVShow", json!({ "tvshowid": show_id })).await
    }

    pub async fn remove_episode(&self, episode_id: i64) -> Result<(), KodiError> {
        self.call_unit("VideoLibrary.RemoveEpisode", json!({ "episodeid": episode_id })).await
    }

    /// Start a library scan, optionally with progress dialogs on the server.
    pub async fn scan(&self, show_dialogs: bool) -> Result<(), KodiError> {
        self.call_unit("VideoLibrary.Scan", json!({ "showdialogs": show_dialogs })).await
    }

    /// Set a movie's play count; `None` sends no playcount change.
    pub async fn set_movie_playcount(&self, movie_id: i64, playcount: Option<u32>) -> Result<(), KodiError> {
        let mut params = json!({ "movieid": movie_id });
        if let Some(playcount) = playcount {
            params["playcount"] = Value::from(playcount);
        }
        self.call_unit("VideoLibrary.SetMovieDetails", params).await
    }

    pub async fn set_episode_playcount(&self, episode_id: i64, playcount: Option<u32>) -> Result<(), KodiError> {
        let mut params = json!({ "episodeid": episode_id });
        if let Some(playcount) = playcount {
            params["playcount"] = Value::from(playcount);
        }
        self.call_unit("VideoLibrary.SetEpisodeDetails", params).await
    }
}
