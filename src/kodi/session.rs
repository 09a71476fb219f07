//! Session object binding credentials, transport and thumbnail cache together

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::kodi::error::KodiError;
use crate::kodi::http::{self, HttpTransport};
use crate::kodi::models::Credentials;
use crate::kodi::thumbnail::ThumbnailCache;
use crate::kodi::transport::Transport;

const SESSION_LOG_TARGET: &str = "kodi_controller::kodi::session";

/// Client-side session with a Kodi server.
///
/// A session starts unbound (no transport) and only talks to the server
/// once a transport has been bound. Every command on an unbound session
/// is a no-op that returns an empty result.
#[derive(Clone)]
pub struct Session {
    credentials: Credentials,
    transport: Option<Arc<dyn Transport>>,
    thumbnail_cache: Option<ThumbnailCache>,
}

impl Session {
    /// Create an unbound session
    pub fn new(credentials: Credentials) -> Self {
        debug!(target: SESSION_LOG_TARGET, "Creating unbound session for {}:{}", credentials.host, credentials.port);
        Session {
            credentials,
            transport: None,
            thumbnail_cache: None,
        }
    }

    /// Create a session bound to an [`HttpTransport`]
    pub fn connect(credentials: Credentials) -> Result<Self, KodiError> {
        let transport = HttpTransport::new(&credentials)?;
        Ok(Self::new(credentials).with_transport(Arc::new(transport)))
    }

    /// Same as [`Session::connect`] with a custom request timeout
    pub fn connect_with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self, KodiError> {
        let transport = HttpTransport::with_timeout(&credentials, timeout)?;
        Ok(Self::new(credentials).with_transport(Arc::new(transport)))
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.bind(transport);
        self
    }

    /// Bind (or rebind) the transport used by every subsequent operation.
    pub fn bind(&mut self, transport: Arc<dyn Transport>) {
        info!(target: SESSION_LOG_TARGET, "Binding transport for {}:{}", self.credentials.host, self.credentials.port);
        self.transport = Some(transport);
    }

    pub fn is_bound(&self) -> bool {
        self.transport.is_some()
    }

    pub fn transport(&self) -> Option<&dyn Transport> {
        self.transport.as_deref()
    }

    pub fn with_thumbnail_cache<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.set_thumbnail_cache(dir);
        self
    }

    /// Enable thumbnail caching into `dir`. The directory is created lazily
    /// on the first cache miss.
    pub fn set_thumbnail_cache<P: AsRef<Path>>(&mut self, dir: P) {
        debug!(target: SESSION_LOG_TARGET, "Thumbnail cache set to {}", dir.as_ref().display());
        self.thumbnail_cache = Some(ThumbnailCache::new(dir));
    }

    pub fn thumbnail_cache(&self) -> Option<&ThumbnailCache> {
        self.thumbnail_cache.as_ref()
    }

    pub fn cache_dir(&self) -> Option<&Path> {
        self.thumbnail_cache.as_ref().map(ThumbnailCache::dir)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// `http://host:port/`
    pub fn server_url(&self) -> Result<Url, KodiError> {
        http::server_url(&self.credentials)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.credentials.host)
            .field("port", &self.credentials.port)
            .field("bound", &self.is_bound())
            .field("cache_dir", &self.cache_dir().map(PathBuf::from))
            .finish()
    }
}
