// Force-HTTPS preprocessor
// Redirects plain-HTTP requests to the same host, path and query over https

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::Preprocessor;
use crate::handler::RequestContext;
use crate::http::build_moved_permanently;

pub struct ForceHttpsPreprocessor {
    forwarded_proto_header: String,
}

impl ForceHttpsPreprocessor {
    pub fn new(forwarded_proto_header: &str) -> Self {
        Self {
            forwarded_proto_header: forwarded_proto_header.to_string(),
        }
    }

    /// The forwarded header decides when present; otherwise an absolute `http:` URI does
    fn is_insecure(&self, request: &RequestContext<'_>) -> bool {
        match request.header(&self.forwarded_proto_header) {
            // Proxies may append: "http, https" means the client spoke http
            Some(proto) => proto
                .split(',')
                .next()
                .is_some_and(|first| first.trim().eq_ignore_ascii_case("http")),
            None => request.uri.scheme_str() == Some("http"),
        }
    }
}

impl Preprocessor for ForceHttpsPreprocessor {
    fn name(&self) -> &'static str {
        "force-https"
    }

    fn preprocess(&self, request: &RequestContext<'_>) -> Option<Response<Full<Bytes>>> {
        if !self.is_insecure(request) {
            return None;
        }

        let Some(host) = request.host() else {
            tracing::debug!(path = request.path, "insecure request without host, not redirecting");
            return None;
        };

        let location = format!("https://{host}{}", request.path_and_query());
        Some(build_moved_permanently(&location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Request, StatusCode};

    fn preprocessor() -> ForceHttpsPreprocessor {
        ForceHttpsPreprocessor::new("X-Forwarded-Proto")
    }

    #[test]
    fn test_forwarded_http_redirects() {
        let req = Request::builder()
            .uri("/asdf?q")
            .header("Host", "example.com:8443")
            .header("X-Forwarded-Proto", "http")
            .body(())
            .unwrap();
        let response = preprocessor()
            .preprocess(&RequestContext::from_request(&req))
            .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers()["location"], "https://example.com:8443/asdf?q");
    }

    #[test]
    fn test_forwarded_https_passes() {
        for proto in ["https", "HTTPS", "https, http"] {
            let req = Request::builder()
                .uri("/")
                .header("Host", "example.com")
                .header("X-Forwarded-Proto", proto)
                .body(())
                .unwrap();
            assert!(preprocessor()
                .preprocess(&RequestContext::from_request(&req))
                .is_none());
        }
    }

    #[test]
    fn test_forwarded_header_is_case_insensitive() {
        let req = Request::builder()
            .uri("/")
            .header("Host", "example.com")
            .header("x-forwarded-proto", "HTTP")
            .body(())
            .unwrap();
        assert!(preprocessor()
            .preprocess(&RequestContext::from_request(&req))
            .is_some());
    }

    #[test]
    fn test_absolute_http_uri_redirects() {
        let req = Request::builder()
            .uri("http://example.com/asdf?q")
            .body(())
            .unwrap();
        let response = preprocessor()
            .preprocess(&RequestContext::from_request(&req))
            .unwrap();
        assert_eq!(response.headers()["location"], "https://example.com/asdf?q");
    }

    #[test]
    fn test_plain_origin_request_passes() {
        let req = Request::builder()
            .uri("/")
            .header("Host", "example.com")
            .body(())
            .unwrap();
        assert!(preprocessor()
            .preprocess(&RequestContext::from_request(&req))
            .is_none());
    }
}
