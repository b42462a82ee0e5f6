//! Startup errors
//!
//! Everything that can stop the server before it binds its listener.

use std::path::PathBuf;

use crate::fetchers::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to read favicon '{}': {source}", path.display())]
    Favicon {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("redirects.source_domains is set but redirects.target_domain is missing")]
    MissingRedirectTarget,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid log filter: {0}")]
    LogFilter(String),

    #[error("failed to install log subscriber: {0}")]
    LogSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
