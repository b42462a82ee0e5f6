// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::logger::AccessLogFormat;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub favicon: FaviconConfig,
    pub redirects: RedirectsConfig,
    pub content: ContentConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Log output layout
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default)]
    pub access_log_format: AccessLogFormat,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// 0 disables keep-alive; any other value enables it
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the `Server` header on every response
    pub server_name: String,
}

/// Favicon served ahead of the brochure routes
#[derive(Debug, Deserialize, Clone)]
pub struct FaviconConfig {
    pub enabled: bool,
    pub url_path: String,
    pub file_path: String,
}

/// Redirect preprocessors
#[derive(Debug, Deserialize, Clone)]
pub struct RedirectsConfig {
    pub force_https: bool,
    /// Header a TLS-terminating proxy sets to the original scheme
    pub forwarded_proto_header: String,
    /// Hosts redirected to `target_domain`; supports `*.example.com`
    #[serde(default)]
    pub source_domains: Vec<String>,
    #[serde(default)]
    pub target_domain: Option<String>,
}

/// Names of the sources holding the brochure content
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    pub enterprise_key: String,
    pub contact_method_key: String,
    pub cover_section_key: String,
}
