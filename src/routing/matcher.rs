//! Route matching module
//!
//! Maps a request method and path onto a domain command.

use crate::domain::{Command, CommandParameters, CommandType};
use hyper::Method;

/// One path segment of a template rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// How a route compares against the request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRule {
    /// Whole path must be equal
    Exact(String),
    /// Path must start with the prefix
    Prefix(String),
    /// `/sections/{name}` style; each `{..}` segment becomes a parameter
    Template(Vec<Segment>),
}

#[derive(Debug, Clone)]
pub struct RoutePattern {
    methods: Vec<Method>,
    rule: PathRule,
}

impl RoutePattern {
    pub fn exact(path: &str) -> Self {
        Self::with_rule(PathRule::Exact(path.to_string()))
    }

    pub fn prefix(prefix: &str) -> Self {
        Self::with_rule(PathRule::Prefix(prefix.to_string()))
    }

    pub fn template(template: &str) -> Self {
        let segments = split_segments(template)
            .map(|segment| {
                segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .map_or_else(
                        || Segment::Literal(segment.to_string()),
                        |name| Segment::Param(name.to_string()),
                    )
            })
            .collect();
        Self::with_rule(PathRule::Template(segments))
    }

    /// Restrict to other methods than the default `GET`
    #[must_use]
    pub fn methods(mut self, methods: &[Method]) -> Self {
        self.methods = methods.to_vec();
        self
    }

    fn with_rule(rule: PathRule) -> Self {
        Self {
            methods: vec![Method::GET],
            rule,
        }
    }

    /// HEAD is accepted wherever GET is
    fn matches_method(&self, method: &Method) -> bool {
        self.methods
            .iter()
            .any(|m| m == method || (*method == Method::HEAD && *m == Method::GET))
    }

    /// Match the path, returning the extracted parameters
    pub fn match_path(&self, path: &str) -> Option<CommandParameters> {
        match &self.rule {
            PathRule::Exact(exact) => (path == exact).then(CommandParameters::new),
            PathRule::Prefix(prefix) => path.starts_with(prefix.as_str()).then(CommandParameters::new),
            PathRule::Template(segments) => match_template(segments, path),
        }
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_template(segments: &[Segment], path: &str) -> Option<CommandParameters> {
    let parts: Vec<&str> = split_segments(path).collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut parameters = CommandParameters::new();
    for (segment, part) in segments.iter().zip(parts) {
        match segment {
            Segment::Literal(literal) if literal == part => {}
            Segment::Literal(_) => return None,
            Segment::Param(name) => {
                parameters.insert(name.clone(), part.to_string());
            }
        }
    }
    Some(parameters)
}

/// Static route table, built once at startup
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<(RoutePattern, CommandType)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `GET /` shows the cover
    pub fn brochure() -> Self {
        Self::new().route(RoutePattern::exact("/"), CommandType::ShowCover)
    }

    #[must_use]
    pub fn route(mut self, pattern: RoutePattern, command_type: CommandType) -> Self {
        self.routes.push((pattern, command_type));
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first registered route matching the request.
    ///
    /// A miss is not an error: it yields [`Command::unknown`].
    pub fn map(&self, method: &Method, path: &str) -> Command {
        self.routes
            .iter()
            .filter(|(pattern, _)| pattern.matches_method(method))
            .find_map(|(pattern, command_type)| {
                pattern
                    .match_path(path)
                    .map(|parameters| Command::new(*command_type, parameters))
            })
            .unwrap_or_else(|| {
                tracing::debug!(%method, path, "no route matched");
                Command::unknown()
            })
    }
}
