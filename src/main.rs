use kodi_controller::config::Settings;
use kodi_controller::init_app_dirs;
use kodi_controller::kodi::Session;
use kodi_controller::ui::{Cli, Command};
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Parse command-line arguments and initialize CLI
    let cli = Cli::new();
    let args = &cli.args;

    init_logging(args.log_json);
    init_app_dirs()?;

    // Load configuration from file or create default
    let config_path = args.config_path();
    let mut settings = Settings::load(&config_path)?;
    args.apply_to(&mut settings);
    settings.validate()?;

    if args.save {
        settings.save(&config_path)?;
        info!("Settings saved to {}", config_path.display());
    }

    let mut session = Session::connect_with_timeout(settings.credentials(), settings.timeout())?;
    if let Some(dir) = &settings.thumbnail_cache {
        session.set_thumbnail_cache(dir);
    }
    debug!("Session ready: {:?}", session);

    match &args.command {
        Command::Status => println!("{}", session.status().await),
        Command::Movies => cli.display_records(&session.get_movies().await?),
        Command::Shows => cli.display_records(&session.get_tv_shows().await?),
        Command::Seasons { show_id } => cli.display_records(&session.get_seasons(*show_id).await?),
        Command::Episodes { show_id, season } => {
            cli.display_records(&session.get_episodes(*show_id, *season).await?)
        }
        Command::Playing => cli.display_record(&session.get_item().await?),
        Command::PlayPause => match session.play_pause().await? {
            Some(speed) => println!("Speed: {}", speed),
            None => println!("No active player"),
        },
        Command::Stop => session.stop().await?,
        Command::Seek { percentage } => session.seek(*percentage).await?,
        Command::Volume { volume } => session.set_volume(*volume).await?,
        Command::Mute => match session.toggle_mute().await? {
            Some(muted) => println!("Muted: {}", muted),
            None => println!("Mute toggled"),
        },
        Command::Playlist { media_type } => cli.display_records(&session.playlist_items(*media_type).await?),
        Command::PlayPlaylist { media_type } => cli.display_record(&session.open_playlist(*media_type).await?),
        Command::Favourites => cli.display_records(&session.get_favourites().await?),
        Command::Sources { media } => cli.display_records(&session.get_sources(media).await?),
        Command::Scan => session.scan(false).await?,
    }

    Ok(())
}
