//! Response rendering module
//!
//! Turns the outcome of a processed command into a status code and a body,
//! as HTML or JSON. Both formats serialize the same [`PageContext`].

pub mod context;
mod html;
mod json;

pub use context::PageContext;

use crate::domain::{Basics, Section};
use hyper::StatusCode;
use std::error::Error;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Outcome of one processed command, borrowed for the duration of rendering
#[derive(Debug, Clone, Copy)]
pub enum DomainResult<'a> {
    Cover {
        section: &'a Section,
        basics: &'a Basics,
    },
    Basics {
        basics: &'a Basics,
    },
    NotFound {
        path: &'a str,
        basics: &'a Basics,
    },
    UnexpectedException {
        error: &'a (dyn Error + 'static),
        basics: Option<&'a Basics>,
    },
}

impl DomainResult<'_> {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Cover { .. } | Self::Basics { .. } => StatusCode::OK,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UnexpectedException { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Final status, content type and body of a domain response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

/// Representation a client negotiated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Json,
}

impl ResponseFormat {
    /// Pick the format from the raw `Accept` header.
    ///
    /// Only the exact value `application/json` selects JSON. Quality-weighted lists
    /// such as `application/json, text/html;q=0.9` fall back to HTML.
    pub fn negotiate(accept: Option<&str>) -> Self {
        match accept {
            Some(JSON_CONTENT_TYPE) => Self::Json,
            _ => Self::Html,
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Html => HTML_CONTENT_TYPE,
            Self::Json => JSON_CONTENT_TYPE,
        }
    }

    pub fn render(self, result: &DomainResult<'_>) -> RenderedResponse {
        let context = PageContext::from_result(result);
        let body = match self {
            Self::Html => html::render(result, &context),
            Self::Json => json::render(&context),
        };

        RenderedResponse {
            status: result.status(),
            content_type: self.content_type(),
            body,
        }
    }
}
