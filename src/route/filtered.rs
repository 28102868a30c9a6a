use std::fmt;

use crate::http_helpers::HttpMethod;
use crate::middleware::BeforeAfterChain;
use crate::route::{Handler, Middleware, RouteDefinition};

/// Authoring surface for the split before/after discipline.
///
/// `before` entries wrap the handler with reversed declaration order as
/// nesting order (the last-declared entry runs first, see
/// [`BeforeAfterChain`]); `after` hooks run in declaration order once the
/// wrapped handler has returned. Translated into a [`RouteDefinition`]
/// before compilation, so every surface compiles into the same tree
/// representation.
#[derive(Clone)]
pub struct FilteredRoute {
    pub name: String,
    pub path: String,
    pub methods: Vec<HttpMethod>,
    pub host: Option<String>,
    pub headers: Vec<(String, Option<String>)>,
    pub queries: Vec<(String, Option<String>)>,
    pub schemes: Vec<String>,
    pub handler: Handler,
    pub before: Vec<Middleware>,
    pub after: Vec<Handler>,
}

impl FilteredRoute {
    pub fn new(name: &str, path: &str, handler: Handler) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            methods: Vec::new(),
            host: None,
            headers: Vec::new(),
            queries: Vec::new(),
            schemes: Vec::new(),
            handler,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), Some(value.to_string())));
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.queries.push((key.to_string(), Some(value.to_string())));
        self
    }

    pub fn scheme(mut self, scheme: &str) -> Self {
        self.schemes.push(scheme.to_string());
        self
    }

    pub fn before(mut self, middleware: Middleware) -> Self {
        self.before.push(middleware);
        self
    }

    pub fn after(mut self, hook: Handler) -> Self {
        self.after.push(hook);
        self
    }

    /// Pre-compose the before/after phases into the handler and hand back
    /// the uniform internal representation.
    pub fn into_route_definition(self) -> RouteDefinition {
        let handler = BeforeAfterChain::from((self.before, self.after)).compose(self.handler);
        RouteDefinition {
            name: self.name,
            path: self.path,
            methods: self.methods,
            host: self.host,
            headers: self.headers,
            queries: self.queries,
            schemes: self.schemes,
            handler,
            middleware: Vec::new(),
        }
    }
}

impl fmt::Debug for FilteredRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredRoute")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish_non_exhaustive()
    }
}
