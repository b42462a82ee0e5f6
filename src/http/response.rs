//! HTTP response building module
//!
//! Provides builders for the responses the adapter sends, decoupled from request handling.

use crate::render::RenderedResponse;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Validators and cache policy of a cacheable asset
pub struct CacheHeaders<'a> {
    pub etag: &'a str,
    pub last_modified: &'a str,
    pub cache_control: &'a str,
}

/// Build 304 Not Modified response
pub fn build_304_response(cache: &CacheHeaders<'_>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", cache.etag)
        .header("Last-Modified", cache.last_modified)
        .header("Cache-Control", cache.cache_control)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 Moved Permanently response
///
/// Carries exactly one header, `Location`, and an empty body.
pub fn build_moved_permanently(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            let mut response = Response::new(Full::new(Bytes::new()));
            *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
            response
        })
}

/// Build the response for a rendered domain outcome
pub fn build_rendered_response(rendered: RenderedResponse) -> Response<Full<Bytes>> {
    let status = rendered.status;
    Response::builder()
        .status(status)
        .header("Content-Type", rendered.content_type)
        .header("Content-Length", rendered.body.len())
        .body(Full::new(Bytes::from(rendered.body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut response = Response::new(Full::new(Bytes::new()));
            *response.status_mut() = status;
            response
        })
}

/// Build success response with cache validators
pub fn build_cached_response(
    data: Bytes,
    content_type: &str,
    cache: &CacheHeaders<'_>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", cache.etag)
        .header("Last-Modified", cache.last_modified)
        .header("Cache-Control", cache.cache_control)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    tracing::error!(status, error = %error, "failed to build response");
}
