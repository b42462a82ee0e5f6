//! Result interface module
//!
//! The per-request object the domain application writes its outcome into.
//! Which renderer it uses is fixed when it is made, from the `Accept` header.

use std::error::Error;

use crate::domain::{Basics, Section, UserInterface};
use crate::render::{DomainResult, RenderedResponse};

pub use crate::render::ResponseFormat;

/// Builds result interfaces for incoming requests
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceProvider;

impl InterfaceProvider {
    pub const fn new() -> Self {
        Self
    }

    pub fn make_interface<'a>(&self, path: &'a str, accept: Option<&str>) -> HttpUserInterface<'a> {
        HttpUserInterface::new(path, ResponseFormat::negotiate(accept))
    }
}

/// Single-slot result interface rendering into one negotiated format
#[derive(Debug)]
pub struct HttpUserInterface<'a> {
    path: &'a str,
    format: ResponseFormat,
    response: Option<RenderedResponse>,
}

impl<'a> HttpUserInterface<'a> {
    pub const fn new(path: &'a str, format: ResponseFormat) -> Self {
        Self {
            path,
            format,
            response: None,
        }
    }

    pub const fn format(&self) -> ResponseFormat {
        self.format
    }

    pub const fn is_written(&self) -> bool {
        self.response.is_some()
    }

    /// Take the rendered outcome; `None` if the domain wrote nothing
    pub fn get_response(self) -> Option<RenderedResponse> {
        self.response
    }

    fn write(&mut self, result: &DomainResult<'_>) {
        if self.response.is_some() {
            tracing::warn!(path = self.path, "outcome written twice; keeping the latest");
        }
        self.response = Some(self.format.render(result));
    }
}

impl UserInterface for HttpUserInterface<'_> {
    fn show_cover(&mut self, cover_section: &Section, basics: &Basics) {
        self.write(&DomainResult::Cover {
            section: cover_section,
            basics,
        });
    }

    fn show_basics(&mut self, basics: &Basics) {
        self.write(&DomainResult::Basics { basics });
    }

    fn show_unknown_command(&mut self, basics: &Basics) {
        let path = self.path;
        self.write(&DomainResult::NotFound { path, basics });
    }

    fn show_unexpected_exception(&mut self, error: &(dyn Error + 'static), basics: Option<&Basics>) {
        self.write(&DomainResult::UnexpectedException { error, basics });
    }
}
