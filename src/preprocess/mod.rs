//! Preprocessor chain module
//!
//! Request interceptors run before command mapping. The first one that answers wins;
//! later ones are never consulted for that request.

mod domain_redirect;
mod favicon;
mod https;

pub use domain_redirect::DomainRedirectPreprocessor;
pub use favicon::FaviconPreprocessor;
pub use https::ForceHttpsPreprocessor;

use crate::config::Config;
use crate::error::StartupError;
use crate::handler::RequestContext;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;

pub trait Preprocessor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// `None` lets the request continue down the chain
    fn preprocess(&self, request: &RequestContext<'_>) -> Option<Response<Full<Bytes>>>;
}

/// Ordered preprocessors, fixed at startup
#[derive(Default)]
pub struct PreprocessorChain {
    preprocessors: Vec<Box<dyn Preprocessor>>,
}

impl PreprocessorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a preprocessor after those already registered
    #[must_use]
    pub fn with(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Build the favicon, force-HTTPS and domain-redirect chain from configuration
    pub async fn from_config(config: &Config) -> Result<Self, StartupError> {
        let mut chain = Self::new();

        if config.favicon.enabled {
            let path = Path::new(&config.favicon.file_path);
            let favicon = FaviconPreprocessor::load(&config.favicon.url_path, path)
                .await
                .map_err(|source| StartupError::Favicon {
                    path: path.to_path_buf(),
                    source,
                })?;
            chain = chain.with(favicon);
        }

        if config.redirects.force_https {
            chain = chain.with(ForceHttpsPreprocessor::new(
                &config.redirects.forwarded_proto_header,
            ));
        }

        if !config.redirects.source_domains.is_empty() {
            let target = config
                .redirects
                .target_domain
                .as_deref()
                .ok_or(StartupError::MissingRedirectTarget)?;
            chain = chain.with(DomainRedirectPreprocessor::new(
                config.redirects.source_domains.clone(),
                target,
            ));
        }

        Ok(chain)
    }

    pub fn len(&self) -> usize {
        self.preprocessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preprocessors.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.preprocessors.iter().map(|p| p.name()).collect()
    }

    /// Run in registration order, stopping at the first response
    pub fn run(&self, request: &RequestContext<'_>) -> Option<Response<Full<Bytes>>> {
        self.preprocessors.iter().find_map(|preprocessor| {
            let response = preprocessor.preprocess(request)?;
            tracing::debug!(
                preprocessor = preprocessor.name(),
                path = request.path,
                status = response.status().as_u16(),
                "request answered by preprocessor"
            );
            Some(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Request, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed {
        name: &'static str,
        status: Option<StatusCode>,
        calls: Arc<AtomicUsize>,
    }

    impl Preprocessor for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn preprocess(&self, _request: &RequestContext<'_>) -> Option<Response<Full<Bytes>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.status.map(|status| {
                let mut response = Response::new(Full::new(Bytes::new()));
                *response.status_mut() = status;
                response
            })
        }
    }

    fn fixed(name: &'static str, status: Option<StatusCode>) -> (Fixed, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Fixed {
                name,
                status,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    #[test]
    fn test_empty_chain_passes() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let chain = PreprocessorChain::new();
        assert!(chain.is_empty());
        assert!(chain.run(&RequestContext::from_request(&req)).is_none());
    }

    #[test]
    fn test_first_response_wins() {
        let (pass, pass_calls) = fixed("pass", None);
        let (first, first_calls) = fixed("first", Some(StatusCode::MOVED_PERMANENTLY));
        let (second, second_calls) = fixed("second", Some(StatusCode::OK));
        let chain = PreprocessorChain::new().with(pass).with(first).with(second);
        assert_eq!(chain.names(), vec!["pass", "first", "second"]);

        let req = Request::builder().uri("/").body(()).unwrap();
        let response = chain.run(&RequestContext::from_request(&req)).unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(pass_calls.load(Ordering::SeqCst), 1);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    fn load_config(contents: &str) -> (Config, tempfile::NamedTempFile) {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let config = Config::load_from(file.path().to_str().unwrap()).unwrap();
        (config, file)
    }

    fn favicon_file() -> tempfile::NamedTempFile {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".ico").tempfile().unwrap();
        file.write_all(b"\x00\x00\x01\x00").unwrap();
        file
    }

    #[tokio::test]
    async fn test_from_config_builds_full_chain_in_order() {
        let favicon = favicon_file();
        let (config, _file) = load_config(&format!(
            r"
            [favicon]
            file_path = '{}'

            [redirects]
            force_https = true
            source_domains = ['example.com']
            target_domain = 'www.destination.com'
            ",
            favicon.path().display()
        ));

        let chain = PreprocessorChain::from_config(&config).await.unwrap();
        assert_eq!(chain.names(), vec!["favicon", "force-https", "domain-redirect"]);
    }

    #[tokio::test]
    async fn test_from_config_skips_disabled_preprocessors() {
        let (config, _file) = load_config(
            r"
            [favicon]
            enabled = false
            ",
        );

        let chain = PreprocessorChain::from_config(&config).await.unwrap();
        assert!(chain.is_empty());
    }

    #[tokio::test]
    async fn test_from_config_requires_redirect_target() {
        let (config, _file) = load_config(
            r"
            [favicon]
            enabled = false

            [redirects]
            source_domains = ['example.com']
            ",
        );

        let result = PreprocessorChain::from_config(&config).await;
        assert!(matches!(result, Err(StartupError::MissingRedirectTarget)));
    }

    #[tokio::test]
    async fn test_from_config_reports_unreadable_favicon() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ico");
        let (config, _file) = load_config(&format!(
            r"
            [favicon]
            file_path = '{}'
            ",
            missing.display()
        ));

        match PreprocessorChain::from_config(&config).await {
            Err(StartupError::Favicon { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected favicon error, got {:?}", other.map(|c| c.names())),
        }
    }
}
