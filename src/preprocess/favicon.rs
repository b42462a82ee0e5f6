// Favicon preprocessor
// Serves one static file from memory, with conditional request support

use std::path::Path;
use std::time::SystemTime;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::Preprocessor;
use crate::handler::RequestContext;
use crate::http::cache::{self, CachePolicy};
use crate::http::{self as http_response, mime, CacheHeaders};

pub struct FaviconPreprocessor {
    url_path: String,
    data: Bytes,
    content_type: &'static str,
    etag: String,
    last_modified: SystemTime,
    last_modified_header: String,
    cache_control: String,
}

impl FaviconPreprocessor {
    /// Read the file once; it is never re-read while serving
    pub async fn load(url_path: &str, file_path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(file_path).await?;
        let modified = tokio::fs::metadata(file_path).await?.modified()?;
        Ok(Self::from_bytes(
            url_path,
            Bytes::from(data),
            mime::content_type_for_path(file_path),
            modified,
        ))
    }

    pub fn from_bytes(
        url_path: &str,
        data: Bytes,
        content_type: &'static str,
        last_modified: SystemTime,
    ) -> Self {
        Self {
            url_path: url_path.to_string(),
            etag: cache::generate_etag(&data),
            data,
            content_type,
            last_modified,
            last_modified_header: cache::format_http_date(last_modified),
            cache_control: CachePolicy::default().to_header_value(),
        }
    }

    fn cache_headers(&self) -> CacheHeaders<'_> {
        CacheHeaders {
            etag: &self.etag,
            last_modified: &self.last_modified_header,
            cache_control: &self.cache_control,
        }
    }

    /// `If-None-Match` decides when present; `If-Modified-Since` only without it
    fn is_not_modified(&self, request: &RequestContext<'_>) -> bool {
        match request.header("if-none-match") {
            Some(if_none_match) => cache::check_etag_match(Some(if_none_match), &self.etag),
            None => cache::check_not_modified_since(
                request.header("if-modified-since"),
                self.last_modified,
            ),
        }
    }
}

impl Preprocessor for FaviconPreprocessor {
    fn name(&self) -> &'static str {
        "favicon"
    }

    fn preprocess(&self, request: &RequestContext<'_>) -> Option<Response<Full<Bytes>>> {
        if request.path != self.url_path {
            return None;
        }

        if self.is_not_modified(request) {
            return Some(http_response::build_304_response(&self.cache_headers()));
        }

        Some(http_response::build_cached_response(
            self.data.clone(),
            self.content_type,
            &self.cache_headers(),
            request.is_head,
        ))
    }
}
