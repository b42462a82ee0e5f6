// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::StartupError;
use crate::fetchers::{COVER_SECTION_KEY, CONTACT_METHOD_KEY, ENTERPRISE_KEY};

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, ContentConfig, FaviconConfig, HttpConfig, LogFormat, LoggingConfig,
    PerformanceConfig, RedirectsConfig, ServerConfig,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "brochure";

/// Environment prefix; `BROCHURE__SERVER__PORT=9000` overrides `server.port`
pub const ENV_PREFIX: &str = "BROCHURE";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Layers, highest priority first: environment, file, defaults. A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("redirects.source_domains")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", concat!("brochure-http/", env!("CARGO_PKG_VERSION")))?
            .set_default("favicon.enabled", true)?
            .set_default("favicon.url_path", "/favicon.ico")?
            .set_default("favicon.file_path", "static/favicon.ico")?
            .set_default("redirects.force_https", false)?
            .set_default("redirects.forwarded_proto_header", "X-Forwarded-Proto")?
            .set_default("content.enterprise_key", ENTERPRISE_KEY)?
            .set_default("content.contact_method_key", CONTACT_METHOD_KEY)?
            .set_default("content.cover_section_key", COVER_SECTION_KEY)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let address = format!("{}:{}", self.server.host, self.server.port);
        address
            .parse()
            .map_err(|source| StartupError::Address { address, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::AccessLogFormat;
    use std::io::Write;

    fn load_toml(contents: &str) -> Config {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        Config::load_from(file.path().to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_from("does/not/exist").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.logging.access_log_format, AccessLogFormat::Combined);
        assert_eq!(config.favicon.url_path, "/favicon.ico");
        assert!(!config.redirects.force_https);
        assert_eq!(config.redirects.forwarded_proto_header, "X-Forwarded-Proto");
        assert!(config.redirects.source_domains.is_empty());
        assert!(config.redirects.target_domain.is_none());
        assert_eq!(config.content.enterprise_key, "BROCHURE_ENTERPRISE");
        assert!(config.http.server_name.starts_with("brochure-http/"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = load_toml(
            r#"
            [server]
            port = 9090

            [logging]
            format = "json"
            access_log_format = "$status $request"

            [redirects]
            force_https = true
            source_domains = ["example.com", "*.example.org"]
            target_domain = "www.destination.com"
            "#,
        );
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.logging.access_log_format,
            AccessLogFormat::Custom("$status $request".to_string())
        );
        assert!(config.redirects.force_https);
        assert_eq!(config.redirects.source_domains, vec!["example.com", "*.example.org"]);
        assert_eq!(config.redirects.target_domain.as_deref(), Some("www.destination.com"));
    }

    #[test]
    fn test_socket_addr() {
        let mut config = Config::load_from("does/not/exist").unwrap();
        assert_eq!(config.get_socket_addr().unwrap().port(), 8080);

        config.server.host = "not an address".to_string();
        assert!(matches!(
            config.get_socket_addr(),
            Err(StartupError::Address { .. })
        ));
    }
}
