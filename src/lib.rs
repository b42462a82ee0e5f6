//! Brochure site served over HTTP
//!
//! Requests pass through a [`preprocess::PreprocessorChain`] (favicon, forced HTTPS, domain
//! redirects) before the path is mapped to a domain [`domain::Command`]. The domain writes its
//! outcome into an [`interface::HttpUserInterface`], which renders HTML or JSON depending on the
//! `Accept` header. [`app::BrochureHttpApplication`] ties these together and turns domain
//! failures into 500 pages.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetchers;
pub mod handler;
pub mod http;
pub mod interface;
pub mod logger;
pub mod preprocess;
pub mod render;
pub mod routing;
pub mod server;
