//! Content-addressed thumbnail cache
//!
//! Server thumbnail references are rewritten into the MD5 hex digest of the
//! reference string. The digest doubles as the file name of the cached image
//! inside the cache directory, so a reference always maps to the same entry.

use futures_util::StreamExt;
use md5::{Digest, Md5};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::kodi::error::KodiError;
use crate::kodi::models::MediaRecord;
use crate::kodi::session::Session;
use crate::kodi::transport::ByteStream;

const CACHE_LOG_TARGET: &str = "kodi_controller::kodi::thumbnail";

/// Extensions that mark a reference as an image worth caching.
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tbn"];

/// Field rewritten by [`ThumbnailCache::resolve_all`].
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Whether `reference` embeds a recognized image extension.
pub fn is_image_reference(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

/// Cache key for a thumbnail reference: lowercase MD5 hex of its bytes.
pub fn cache_key(reference: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(reference.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// URL the server serves the image for `reference` from.
///
/// The reference is form-encoded: spaces become `+`, everything outside
/// `A-Za-z0-9-_.~` is percent-escaped.
pub fn thumbnail_url(server_url: &Url, reference: &str) -> String {
    let encoded = urlencoding::encode(reference).replace("%20", "+");
    format!("{}image/{}", server_url, encoded)
}

/// Append-only directory of thumbnails named by [`cache_key`]
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    dir: PathBuf,
}

impl ThumbnailCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        ThumbnailCache {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache entry for `reference`.
    pub fn entry_path(&self, reference: &str) -> PathBuf {
        self.dir.join(cache_key(reference))
    }

    /// Resolve a thumbnail reference to its local identifier.
    ///
    /// Non-image references resolve to an empty string without touching the
    /// filesystem or the network. Cached entries are returned without a
    /// fetch. On a miss the image is downloaded and atomically moved into
    /// place. An unbound session can only serve hits; misses resolve to an
    /// empty string.
    #[instrument(skip(self, session), fields(dir = %self.dir.display()))]
    pub async fn resolve(&self, session: &Session, reference: &str) -> Result<String, KodiError> {
        if !is_image_reference(reference) {
            return Ok(String::new());
        }

        let digest = cache_key(reference);
        let entry = self.dir.join(&digest);

        if is_cached(&entry).await {
            debug!(target: CACHE_LOG_TARGET, "Cache hit for {} ({})", reference, digest);
            return Ok(digest);
        }

        let Some(transport) = session.transport() else {
            debug!(target: CACHE_LOG_TARGET, "Cache miss for {} on unbound session, skipping download", reference);
            return Ok(String::new());
        };

        self.ensure_dir().await?;

        let url = thumbnail_url(&session.server_url()?, reference);
        info!(target: CACHE_LOG_TARGET, "Downloading thumbnail from kodi server: {}", reference);
        let stream = transport.fetch_bytes(&url, session.credentials()).await?;
        self.store(&digest, stream).await?;

        Ok(digest)
    }

    /// Replace the `thumbnail` field of every record with its resolved
    /// identifier, in iteration order. Records without the field are left
    /// untouched; non-string values resolve like an empty reference.
    pub async fn resolve_all(&self, session: &Session, records: &mut [MediaRecord]) -> Result<(), KodiError> {
        for record in records.iter_mut() {
            let Some(value) = record.get(THUMBNAIL_FIELD) else {
                continue;
            };
            let reference = value.as_str().unwrap_or_default().to_string();
            let local_id = self.resolve(session, &reference).await?;
            record.insert(THUMBNAIL_FIELD.to_string(), Value::String(local_id));
        }
        Ok(())
    }

    /// Create the cache directory if needed.
    async fn ensure_dir(&self) -> Result<(), KodiError> {
        match fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(KodiError::CacheDirectoryInvalid(self.dir.clone())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(target: CACHE_LOG_TARGET, "Creating thumbnail cache directory {}", self.dir.display());
                if let Err(e) = fs::create_dir_all(&self.dir).await {
                    // Another caller may have created it in the meantime.
                    return match fs::metadata(&self.dir).await {
                        Ok(meta) if meta.is_dir() => Ok(()),
                        Ok(_) => Err(KodiError::CacheDirectoryInvalid(self.dir.clone())),
                        Err(_) => Err(e.into()),
                    };
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stream `body` into a uniquely named temporary file, then rename it
    /// onto the digest name. Concurrent writers of the same digest converge
    /// on one complete file; a failed download leaves nothing behind.
    async fn store(&self, digest: &str, body: ByteStream) -> Result<(), KodiError> {
        let final_path = self.dir.join(digest);
        let temp_path = self.dir.join(format!(".{}.{}.part", digest, Uuid::new_v4().simple()));

        let written = match write_stream(&temp_path, body).await {
            Ok(written) => written,
            Err(e) => {
                warn!(target: CACHE_LOG_TARGET, "Thumbnail download for {} failed: {}", digest, e);
                remove_quietly(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            remove_quietly(&temp_path).await;
            if is_cached(&final_path).await {
                debug!(target: CACHE_LOG_TARGET, "Lost store race for {}, keeping existing entry", digest);
                return Ok(());
            }
            return Err(e.into());
        }

        debug!(target: CACHE_LOG_TARGET, "Stored {} bytes as {}", written, final_path.display());
        Ok(())
    }
}

/// Resolve the thumbnails of `records` through the session's cache.
/// Without a configured cache directory the references are left as is.
pub async fn resolve_thumbnails(session: &Session, records: &mut [MediaRecord]) -> Result<(), KodiError> {
    match session.thumbnail_cache() {
        Some(cache) => cache.resolve_all(session, records).await,
        None => Ok(()),
    }
}

async fn is_cached(path: &Path) -> bool {
    fs::metadata(path).await.map(|meta| meta.is_file()).unwrap_or(false)
}

async fn write_stream(path: &Path, mut body: ByteStream) -> Result<u64, KodiError> {
    let mut file = fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    file.sync_all().await?;
    Ok(written)
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(target: CACHE_LOG_TARGET, "Could not remove {}: {}", path.display(), e);
        }
    }
}
