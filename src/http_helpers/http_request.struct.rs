use std::collections::HashMap;

use rustc_hash::FxHashMap;

use super::{Extensions, HttpMethod};

/// A concrete request presented to the dispatcher: everything the compiled
/// tree and the leaf constraints can match on.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub host: String,
    pub scheme: String,
    pub headers: Vec<(String, String)>,
    pub query_params: HashMap<String, String>,
    /// Placeholder captures, filled in by the dispatcher on a match.
    pub path_params: FxHashMap<String, String>,
    pub body: String,
    pub extensions: Extensions,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            host: String::new(),
            scheme: "http".to_string(),
            headers: Vec::new(),
            query_params: HashMap::new(),
            path_params: FxHashMap::default(),
            body: String::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query_params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Get a specific header value by name (names compare case-insensitively)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if a header exists
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest::new(HttpMethod::GET, "/").with_header("X-Test-Header", "value");

        assert_eq!(req.header("x-test-header"), Some("value"));
        assert!(req.has_header("X-TEST-HEADER"));
        assert!(!req.has_header("X-Other"));
    }

    #[test]
    fn test_builder_defaults() {
        let req = HttpRequest::new(HttpMethod::POST, "/users/");

        assert_eq!(req.scheme, "http");
        assert!(req.host.is_empty());
        assert!(req.path_params.is_empty());
    }
}
