//! First-match path router.
//!
//! The single-page client resolves view handlers the same way: each
//! registered pattern is compiled to an anchored regex, `:name` segments
//! capture one path segment, and the first registration that matches
//! wins. A literal `*` pattern acts as catch-all. No nested or optional
//! parameters, no query-string matching.

use regex::Regex;
use thiserror::Error;

/// Pattern compilation errors.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Invalid route pattern '{0}': must start with '/' or be '*'")]
    InvalidPattern(String),

    #[error("Route pattern '{pattern}' failed to compile: {source}")]
    Compile {
        pattern: String,
        source: regex::Error,
    },
}

struct Route<H> {
    pattern: String,
    regex: Regex,
    param_names: Vec<String>,
    handler: H,
}

/// A resolved route: the registered handler plus extracted parameters.
#[derive(Debug)]
pub struct Resolved<'r, H> {
    pub pattern: &'r str,
    pub handler: &'r H,
    pub params: Vec<(String, String)>,
}

/// Path-to-handler router with `:name` parameter segments.
pub struct PathRouter<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for PathRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PathRouter<H> {
    pub fn new() -> Self {
        PathRouter { routes: Vec::new() }
    }

    /// Register a pattern. Registration order decides ties: the first
    /// matching pattern wins at resolution time.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidPattern`] unless the pattern is `*`
    /// or starts with `/`.
    pub fn route(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RoutingError> {
        let (regex, param_names) = compile(pattern)?;
        self.routes.push(Route {
            pattern: pattern.to_string(),
            regex,
            param_names,
            handler,
        });
        Ok(self)
    }

    /// Resolve a path to the first matching registration.
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_, H>> {
        for route in &self.routes {
            if let Some(captures) = route.regex.captures(path) {
                let params = route
                    .param_names
                    .iter()
                    .zip(captures.iter().skip(1))
                    .filter_map(|(name, capture)| {
                        capture.map(|c| (name.clone(), c.as_str().to_string()))
                    })
                    .collect();
                return Some(Resolved {
                    pattern: &route.pattern,
                    handler: &route.handler,
                    params,
                });
            }
        }
        None
    }
}

/// Translate a pattern into an anchored regex and its parameter names.
fn compile(pattern: &str) -> Result<(Regex, Vec<String>), RoutingError> {
    if pattern == "*" {
        let regex = Regex::new("^.*$").map_err(|source| RoutingError::Compile {
            pattern: pattern.to_string(),
            source,
        })?;
        return Ok((regex, Vec::new()));
    }

    if !pattern.starts_with('/') {
        return Err(RoutingError::InvalidPattern(pattern.to_string()));
    }

    let mut param_names = Vec::new();
    let mut source = String::from("^");
    for segment in pattern.split('/').skip(1) {
        source.push('/');
        if let Some(name) = segment.strip_prefix(':') {
            param_names.push(name.to_string());
            source.push_str("([^/]+)");
        } else {
            source.push_str(&regex::escape(segment));
        }
    }
    source.push('$');

    let regex = Regex::new(&source).map_err(|source| RoutingError::Compile {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok((regex, param_names))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> PathRouter<&'static str> {
        let mut router = PathRouter::new();
        router.route("/", "home").unwrap();
        router.route("/tournaments", "tournaments").unwrap();
        router.route("/tournament/:id", "tournament-detail").unwrap();
        router.route("/news/:id", "news-detail").unwrap();
        router.route("*", "not-found").unwrap();
        router
    }

    #[test]
    fn literal_routes_match_exactly() {
        let router = router();
        assert_eq!(*router.resolve("/").unwrap().handler, "home");
        assert_eq!(*router.resolve("/tournaments").unwrap().handler, "tournaments");
    }

    #[test]
    fn param_segments_capture_values() {
        let router = router();
        let hit = router.resolve("/tournament/42").unwrap();
        assert_eq!(*hit.handler, "tournament-detail");
        assert_eq!(hit.params, vec![("id".to_string(), "42".to_string())]);
    }

    #[test]
    fn params_do_not_cross_segments() {
        let router = router();
        // Two extra segments fall through to the catch-all.
        let hit = router.resolve("/tournament/42/edit").unwrap();
        assert_eq!(*hit.handler, "not-found");
    }

    #[test]
    fn first_registration_wins() {
        let mut router = PathRouter::new();
        router.route("/a/:x", "param").unwrap();
        router.route("/a/b", "literal").unwrap();
        assert_eq!(*router.resolve("/a/b").unwrap().handler, "param");
    }

    #[test]
    fn catch_all_matches_anything() {
        let router = router();
        assert_eq!(*router.resolve("/no/such/page").unwrap().handler, "not-found");
    }

    #[test]
    fn no_match_without_catch_all() {
        let mut router = PathRouter::new();
        router.route("/only", "only").unwrap();
        assert!(router.resolve("/other").is_none());
    }

    #[test]
    fn regex_metacharacters_in_literals_are_escaped() {
        let mut router = PathRouter::new();
        router.route("/files/a.b", "dotted").unwrap();
        assert!(router.resolve("/files/axb").is_none());
        assert_eq!(*router.resolve("/files/a.b").unwrap().handler, "dotted");
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        let mut router: PathRouter<&str> = PathRouter::new();
        assert!(matches!(
            router.route("relative/path", "x"),
            Err(RoutingError::InvalidPattern(_))
        ));
    }

    #[test]
    fn multiple_params_resolve_in_order() {
        let mut router = PathRouter::new();
        router.route("/t/:tid/m/:mid", "match").unwrap();
        let hit = router.resolve("/t/7/m/9").unwrap();
        assert_eq!(
            hit.params,
            vec![
                ("tid".to_string(), "7".to_string()),
                ("mid".to_string(), "9".to_string()),
            ]
        );
    }
}
