//! Integration tests for configuration management
//!
//! These tests verify that settings flow into a usable session.

use kodi_controller::config::Settings;
use kodi_controller::kodi::Session;
use std::error::Error;
use tempfile::tempdir;

#[cfg(test)]
mod config_integration_tests {
    use super::*;

    /// Test complete configuration workflow
    #[test]
    fn test_config_lifecycle() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");

        let mut settings = Settings::default();
        settings.host = "kodi.example.com".to_string();
        settings.port = 8081;
        settings.username = "kodi".to_string();
        settings.password = "kodi-password".to_string();
        settings.thumbnail_cache = Some(dir.path().join("thumbs"));

        settings.validate()?;
        settings.save(&config_path)?;

        let loaded_settings = Settings::load(&config_path)?;
        assert_eq!(loaded_settings, settings);

        let mut updated_settings = loaded_settings;
        updated_settings.host = "media-pc".to_string();
        updated_settings.save(&config_path)?;

        let reloaded_settings = Settings::load(&config_path)?;
        assert_eq!(reloaded_settings.host, "media-pc");

        Ok(())
    }

    #[test]
    fn test_session_from_settings() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let settings = Settings {
            host: "10.0.0.5".to_string(),
            thumbnail_cache: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };

        let mut session = Session::connect_with_timeout(settings.credentials(), settings.timeout())?;
        if let Some(cache) = &settings.thumbnail_cache {
            session.set_thumbnail_cache(cache);
        }

        assert!(session.is_bound());
        assert_eq!(session.server_url()?.as_str(), "http://10.0.0.5:8080/");
        assert_eq!(session.cache_dir(), Some(dir.path()));
        Ok(())
    }

    /// Test invalid configuration handling
    #[test]
    fn test_invalid_config_validation() {
        let invalid_settings = Settings {
            host: "".to_string(),
            ..Settings::default()
        };

        let result = invalid_settings.validate();
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Host cannot be empty"));
        }
    }
}
