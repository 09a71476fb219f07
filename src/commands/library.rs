//! Favourites, Files and Addons namespaces

use serde_json::json;

use crate::kodi::models::MediaRecord;
use crate::kodi::{KodiError, Session};

const FILE_PROPERTIES: &[&str] = &["title", "thumbnail", "file", "mimetype", "size", "lastmodified"];
const ADDON_PROPERTIES: &[&str] = &["name", "version", "summary", "thumbnail", "enabled"];

impl Session {
    pub async fn get_favourites(&self) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "properties": ["path", "thumbnail", "window", "windowparameter"] });
        self.fetch_list("Favourites.GetFavourites", params, "favourites", false).await
    }

    /// Media sources for `media` (`video`, `music`, `pictures`, `files`, `programs`).
    pub async fn get_sources(&self, media: &str) -> Result<Vec<MediaRecord>, KodiError> {
        self.fetch_list("Files.GetSources", json!({ "media": media }), "sources", false).await
    }

    /// Entries of a directory or plugin path such as `plugin://plugin.video.foo`.
    pub async fn get_directory(&self, directory: &str) -> Result<Vec<MediaRecord>, KodiError> {
        let params = json!({ "directory": directory, "properties": FILE_PROPERTIES });
        self.fetch_list("Files.GetDirectory", params, "files", false).await
    }

    pub async fn get_file_details(&self, file: &str) -> Result<MediaRecord, KodiError> {
        let params = json!({ "file": file, "properties": FILE_PROPERTIES });
        self.fetch_record("Files.GetFileDetails", params, "filedetails", false).await
    }

    /// Installed addons, optionally restricted to one content type (`video`, `audio`, ...).
    pub async fn get_addons(&self, content: Option<&str>) -> Result<Vec<MediaRecord>, KodiError> {
        let mut params = json!({ "properties": ADDON_PROPERTIES });
        if let Some(content) = content {
            params["content"] = json!(content);
        }
        self.fetch_list("Addons.GetAddons", params, "addons", false).await
    }

    pub async fn get_addon_details(&self, addon_id: &str) -> Result<MediaRecord, KodiError> {
        let params = json!({ "addonid": addon_id, "properties": ADDON_PROPERTIES });
        self.fetch_record("Addons.GetAddonDetails", params, "addon", false).await
    }
}
