//! Routing module
//!
//! Provides the command mapping for the brochure routes:
//! - Static route table matched by method and path
//! - Lazy command providers handed to the domain application
//! - Host matching used by the redirect preprocessors

mod matcher;
mod vhost;

pub use matcher::{PathRule, RoutePattern, RouteTable, Segment};
pub use vhost::{match_any_domain, match_domain, strip_port};

use crate::domain::CommandProvider;
use hyper::Method;

/// Defers route matching until the domain application asks for the command
pub struct PathCommandProvider<'a> {
    table: &'a RouteTable,
    method: &'a Method,
    path: &'a str,
}

impl<'a> PathCommandProvider<'a> {
    pub const fn new(table: &'a RouteTable, method: &'a Method, path: &'a str) -> Self {
        Self {
            table,
            method,
            path,
        }
    }

    pub fn into_provider(self) -> CommandProvider<'a> {
        Box::new(move || self.table.map(self.method, self.path))
    }
}
