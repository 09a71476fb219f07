//! Kodi JSON-RPC client core: transport, session, target resolution,
//! thumbnail caching and resume normalization

pub mod error;
pub mod http;
pub mod models;
pub mod resolver;
pub mod resume;
pub mod session;
pub mod thumbnail;
pub mod transport;

pub use error::KodiError;
pub use http::HttpTransport;
pub use models::*;
pub use session::Session;
pub use thumbnail::ThumbnailCache;
pub use transport::{ByteStream, Transport};
