//! Command-line interface implementation

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use crate::config::Settings;
use crate::kodi::models::{MediaRecord, PlaylistType};
use crate::kodi::resume::percentage_of;

/// Command-line arguments for kodi-controller
#[derive(Parser, Debug)]
#[command(author, version, about = "Remote controller for Kodi's JSON-RPC interface", long_about = None)]
pub struct Args {
    /// Kodi host name or IP address
    #[arg(short = 'H', long, env = "KODI_HOST")]
    pub host: Option<String>,

    /// Kodi web server port
    #[arg(short = 'P', long, env = "KODI_PORT")]
    pub port: Option<u16>,

    /// Username for the Kodi web server
    #[arg(short, long, env = "KODI_USERNAME")]
    pub username: Option<String>,

    /// Password for the Kodi web server
    #[arg(short, long, env = "KODI_PASSWORD")]
    pub password: Option<String>,

    /// Directory thumbnails are cached into
    #[arg(short, long, env = "KODI_THUMBNAIL_CACHE")]
    pub thumbnail_cache: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, env = "KODI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    pub save: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Print raw JSON instead of a table
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Remote operations exposed on the command line
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check whether the server answers
    Status,
    /// List movies
    Movies,
    /// List TV shows
    Shows,
    /// List the seasons of a show
    Seasons { show_id: i64 },
    /// List the episodes of a season
    Episodes { show_id: i64, season: i64 },
    /// Show the item currently playing
    Playing,
    /// Toggle play/pause on the active player
    PlayPause,
    /// Stop the active player
    Stop,
    /// Seek the active player to a percentage
    Seek { percentage: f64 },
    /// Set the volume (0-100)
    Volume { volume: u8 },
    /// Toggle mute
    Mute,
    /// List the entries of a playlist (audio, video, picture)
    Playlist { media_type: PlaylistType },
    /// Start playing a playlist
    PlayPlaylist { media_type: PlaylistType },
    /// List favourites
    Favourites,
    /// List media sources (video, music, pictures, files, programs)
    Sources { media: String },
    /// Scan the video library
    Scan,
}

impl Args {
    /// Apply command-line overrides on top of file settings.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(username) = &self.username {
            settings.username = username.clone();
        }
        if let Some(password) = &self.password {
            settings.password = password.clone();
        }
        if let Some(dir) = &self.thumbnail_cache {
            settings.thumbnail_cache = Some(dir.clone());
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Settings::default_path)
    }
}

/// CLI user interface for interacting with the application
pub struct Cli {
    pub args: Args,
}

impl Cli {
    /// Create a new CLI instance
    pub fn new() -> Self {
        Cli { args: Args::parse() }
    }

    /// Display a list of media records
    pub fn display_records(&self, records: &[MediaRecord]) {
        if self.args.json {
            self.display_json(&records);
            return;
        }

        println!("{:<5} {:<40} {:>8} {}", "#", "Title", "Watched", "Thumbnail");
        println!("{}", "-".repeat(80));
        for (index, record) in records.iter().enumerate() {
            println!("{}", format_row(index + 1, record));
        }
    }

    pub fn display_record(&self, record: &MediaRecord) {
        self.display_json(record);
    }

    pub fn display_json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => self.display_error(&e),
        }
    }

    /// Display error messages
    pub fn display_error(&self, error: &dyn Error) {
        eprintln!("Error: {}", error);
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

/// Best human-readable name of a record.
pub fn record_title(record: &MediaRecord) -> String {
    ["title", "label", "name", "showtitle"]
        .iter()
        .find_map(|field| record.get(*field).and_then(|v| v.as_str()).filter(|s| !s.is_empty()))
        .unwrap_or("<untitled>")
        .to_string()
}

/// One table row: index, truncated title, progress and thumbnail id.
pub fn format_row(index: usize, record: &MediaRecord) -> String {
    let title = record_title(record);
    let title = if title.chars().count() > 38 {
        format!("{}...", title.chars().take(35).collect::<String>())
    } else {
        title
    };
    let watched = percentage_of(record)
        .map(|p| format!("{:.0}%", p))
        .unwrap_or_else(|| "-".to_string());
    let thumbnail = record.get("thumbnail").and_then(|v| v.as_str()).unwrap_or("");
    format!("{:<5} {:<40} {:>8} {}", index, title, watched, thumbnail)
}
