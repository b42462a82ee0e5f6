// Domain-redirect preprocessor
// Sends requests for source domains to the target domain over https

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::Preprocessor;
use crate::handler::RequestContext;
use crate::http::build_moved_permanently;
use crate::routing::{match_any_domain, match_domain};

pub struct DomainRedirectPreprocessor {
    source_domains: Vec<String>,
    target_domain: String,
}

impl DomainRedirectPreprocessor {
    pub fn new(source_domains: Vec<String>, target_domain: &str) -> Self {
        Self {
            source_domains,
            target_domain: target_domain.to_string(),
        }
    }
}

impl Preprocessor for DomainRedirectPreprocessor {
    fn name(&self) -> &'static str {
        "domain-redirect"
    }

    fn preprocess(&self, request: &RequestContext<'_>) -> Option<Response<Full<Bytes>>> {
        let host = request.host()?;

        // A wildcard source may cover the target itself
        if match_domain(&self.target_domain, host) || !match_any_domain(&self.source_domains, host) {
            return None;
        }

        let location = format!("https://{}{}", self.target_domain, request.path_and_query());
        Some(build_moved_permanently(&location))
    }
}
