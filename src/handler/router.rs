//! Request dispatch module
//!
//! Entry point for HTTP request processing: builds the request context, hands it to the
//! brochure application, then applies transport concerns (HEAD bodies, `Server`, access log).

use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{HeaderMap, Method, Request, Response, Uri};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
///
/// Borrowed from the request; never outlives it.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub headers: &'a HeaderMap,
    pub path: &'a str,
    pub is_head: bool,
}

impl<'a> RequestContext<'a> {
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        Self {
            method: req.method(),
            uri: req.uri(),
            headers: req.headers(),
            path: req.uri().path(),
            is_head: req.method() == Method::HEAD,
        }
    }

    /// Header value, if present and valid ASCII
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn accept(&self) -> Option<&'a str> {
        self.header("accept")
    }

    /// Host header, falling back to the URI authority for absolute-form requests
    pub fn host(&self) -> Option<&'a str> {
        self.header("host")
            .or_else(|| self.uri.authority().map(hyper::http::uri::Authority::as_str))
    }

    pub fn query(&self) -> Option<&'a str> {
        self.uri.query()
    }

    /// Path plus `?query` when one was sent
    pub fn path_and_query(&self) -> &'a str {
        self.uri
            .path_and_query()
            .map_or(self.path, hyper::http::uri::PathAndQuery::as_str)
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req);

    let mut response = state.application.handle(&ctx);
    finalize_response(&mut response, &ctx, &state.config.http.server_name);

    if state.config.logging.access_log {
        let entry = AccessLogEntry::from_exchange(&ctx, &response, peer_addr, req.version(), started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Apply transport-level adjustments to a finished response
///
/// HEAD responses keep their `Content-Length` but lose the body.
pub fn finalize_response(response: &mut Response<Full<Bytes>>, ctx: &RequestContext<'_>, server_name: &str) {
    if ctx.is_head && response.body().size_hint().exact() != Some(0) {
        *response.body_mut() = Full::new(Bytes::new());
    }

    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => tracing::warn!(server_name, error = %e, "invalid server name header"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_context_from_origin_form_request() {
        let req = Request::builder()
            .uri("/asdf?q=1")
            .header("Host", "example.com:8080")
            .header("Accept", "application/json")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.path, "/asdf");
        assert_eq!(ctx.query(), Some("q=1"));
        assert_eq!(ctx.path_and_query(), "/asdf?q=1");
        assert_eq!(ctx.host(), Some("example.com:8080"));
        assert_eq!(ctx.accept(), Some("application/json"));
        assert!(!ctx.is_head);
    }

    #[test]
    fn test_context_host_from_absolute_uri() {
        let req = Request::builder()
            .uri("http://example.com/asdf?q")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.host(), Some("example.com"));
        assert_eq!(ctx.path_and_query(), "/asdf?q");
        assert_eq!(ctx.accept(), None);
    }

    #[tokio::test]
    async fn test_finalize_head_response() {
        let req = Request::builder().method(Method::HEAD).uri("/").body(()).unwrap();
        let ctx = RequestContext::from_request(&req);

        let mut response = Response::builder()
            .header("Content-Length", 5)
            .body(Full::new(Bytes::from_static(b"hello")))
            .unwrap();
        finalize_response(&mut response, &ctx, "brochure-http");

        assert_eq!(response.headers()["server"], "brochure-http");
        assert_eq!(response.headers()["content-length"], "5");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
