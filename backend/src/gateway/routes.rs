//! Static prefix routing table.
//!
//! Rules are evaluated in order and the first match wins. A rule matches when
//! its method filter admits the request method and the request path equals
//! the prefix or continues it at a `/` boundary, so `/api/students` matches
//! `/api/students/3` but not `/api/studentsx`.

use actix_web::http::Method;
use serde::Serialize;
use url::Url;

/// Invalid route definitions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    /// The prefix is not an absolute path.
    #[error("route {id} has prefix '{prefix}' which does not start with '/'")]
    RelativePrefix { id: String, prefix: String },
    /// The upstream URL cannot have a path appended.
    #[error("route {id} has an upstream URL that cannot be a base: {upstream}")]
    InvalidUpstream { id: String, upstream: String },
}

/// One forwarding rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    id: String,
    methods: Vec<Method>,
    prefix: String,
    upstream: Url,
}

impl RouteRule {
    /// Build a rule admitting every method.
    ///
    /// # Errors
    ///
    /// Fails when `prefix` is not absolute or `upstream` cannot carry a path.
    pub fn try_new(
        id: impl Into<String>,
        prefix: impl Into<String>,
        upstream: Url,
    ) -> Result<Self, RouteError> {
        let id = id.into();
        let prefix = prefix.into();
        if !prefix.starts_with('/') {
            return Err(RouteError::RelativePrefix { id, prefix });
        }
        if upstream.cannot_be_a_base() {
            return Err(RouteError::InvalidUpstream {
                id,
                upstream: upstream.to_string(),
            });
        }
        let prefix = match prefix.trim_end_matches('/') {
            "" => "/".to_owned(),
            trimmed => trimmed.to_owned(),
        };
        Ok(Self {
            id,
            methods: Vec::new(),
            prefix,
            upstream,
        })
    }

    /// Restrict the rule to `methods`; an empty list admits any method.
    #[must_use]
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Identifier used in logs and error bodies.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Normalised path prefix without a trailing slash.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Base URL requests are forwarded to.
    #[must_use]
    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    /// Whether this rule handles `method` on `path`.
    #[must_use]
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        let method_allowed = self.methods.is_empty() || self.methods.contains(method);
        method_allowed && self.matches_path(path)
    }

    fn matches_path(&self, path: &str) -> bool {
        if self.prefix == "/" {
            return true;
        }
        path.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Upstream URL for `path_and_query`, appended to the upstream base path.
    #[must_use]
    pub fn target(&self, path_and_query: &str) -> String {
        let base = self.upstream.as_str().trim_end_matches('/');
        format!("{base}{path_and_query}")
    }

    /// Serialisable view used by the status endpoints.
    #[must_use]
    pub fn describe(&self) -> RouteDescription {
        RouteDescription {
            id: self.id.clone(),
            path: self.prefix.clone(),
            uri: self.upstream.to_string(),
            methods: self.methods.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Route as reported by `/gateway/health` and `/gateway/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescription {
    /// Rule identifier.
    pub id: String,
    /// Matched prefix.
    pub path: String,
    /// Upstream base URL.
    pub uri: String,
    /// Admitted methods; empty admits all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
}

/// Immutable ordered rule list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Table evaluating `rules` in order.
    #[must_use]
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// `/graphql` to the aggregator; students, universities and auth to the
    /// Record Store.
    ///
    /// # Errors
    ///
    /// Fails when either upstream cannot carry a path.
    pub fn with_defaults(record_store: &Url, aggregator: &Url) -> Result<Self, RouteError> {
        Ok(Self::new(vec![
            RouteRule::try_new("graphql", "/graphql", aggregator.clone())?,
            RouteRule::try_new("students", "/api/students", record_store.clone())?,
            RouteRule::try_new("universities", "/api/universities", record_store.clone())?,
            RouteRule::try_new("auth", "/auth", record_store.clone())?,
        ]))
    }

    /// First rule matching the request, if any.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.matches(method, path))
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Serialisable view of every rule.
    #[must_use]
    pub fn describe(&self) -> Vec<RouteDescription> {
        self.rules.iter().map(RouteRule::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[fixture]
    fn table() -> RouteTable {
        RouteTable::with_defaults(&url("http://records:8080"), &url("http://graph:9000"))
            .expect("default table")
    }

    #[rstest]
    #[case(Method::POST, "/graphql", Some("graphql"))]
    #[case(Method::GET, "/api/students", Some("students"))]
    #[case(Method::GET, "/api/students/3", Some("students"))]
    #[case(Method::GET, "/api/studentsx", None)]
    #[case(Method::DELETE, "/api/universities/1", Some("universities"))]
    #[case(Method::POST, "/auth/login", Some("auth"))]
    #[case(Method::GET, "/authors", None)]
    #[case(Method::GET, "/", None)]
    fn default_table_routes_by_prefix(
        table: RouteTable,
        #[case] method: Method,
        #[case] path: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(table.resolve(&method, path).map(RouteRule::id), expected);
    }

    #[rstest]
    fn first_match_wins() {
        let table = RouteTable::new(vec![
            RouteRule::try_new("narrow", "/api/students/stats", url("http://stats"))
                .expect("rule"),
            RouteRule::try_new("broad", "/api", url("http://api")).expect("rule"),
        ]);
        assert_eq!(
            table
                .resolve(&Method::GET, "/api/students/stats")
                .map(RouteRule::id),
            Some("narrow")
        );
        assert_eq!(
            table.resolve(&Method::GET, "/api/students").map(RouteRule::id),
            Some("broad")
        );
    }

    #[rstest]
    fn method_filters_restrict_matches() {
        let rule = RouteRule::try_new("read-only", "/api", url("http://api"))
            .expect("rule")
            .with_methods([Method::GET]);
        assert!(rule.matches(&Method::GET, "/api/x"));
        assert!(!rule.matches(&Method::POST, "/api/x"));
    }

    #[rstest]
    #[case("http://records:8080", "/api/students?x=1", "http://records:8080/api/students?x=1")]
    #[case("http://records:8080/", "/auth/login", "http://records:8080/auth/login")]
    #[case("http://host/base/", "/graphql", "http://host/base/graphql")]
    fn targets_append_the_original_path(
        #[case] upstream: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let rule = RouteRule::try_new("r", "/", url(upstream)).expect("rule");
        assert_eq!(rule.target(path), expected);
    }

    #[rstest]
    fn relative_prefixes_are_rejected() {
        let err = RouteRule::try_new("bad", "api", url("http://api")).expect_err("relative");
        assert!(matches!(err, RouteError::RelativePrefix { .. }));
    }

    #[rstest]
    fn trailing_slashes_on_prefixes_are_ignored() {
        let rule = RouteRule::try_new("auth", "/auth/", url("http://auth")).expect("rule");
        assert_eq!(rule.prefix(), "/auth");
        assert!(rule.matches(&Method::GET, "/auth"));
    }
}
