use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http_helpers::{HttpMethod, HttpRequest, HttpResponse};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A terminal request-processing function. The response value is threaded
/// through the chain, so a handler appends to the body it is handed.
pub type Handler =
    Arc<dyn Fn(HttpRequest, HttpResponse) -> BoxFuture<HttpResponse> + Send + Sync>;

/// A wrapping function around a handler: takes a handler value, returns a
/// handler value. Composition depends on this one capability only.
pub type Middleware = Arc<dyn Fn(Handler) -> Handler + Send + Sync>;

/// Lift a plain async closure into a [`Handler`].
pub fn handler_fn<F, Fut>(f: F) -> Handler
where
    F: Fn(HttpRequest, HttpResponse) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HttpResponse> + Send + 'static,
{
    Arc::new(move |req, res| Box::pin(f(req, res)))
}

/// Lift a plain wrapping closure into a [`Middleware`].
pub fn middleware_fn<F>(f: F) -> Middleware
where
    F: Fn(Handler) -> Handler + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Immutable description of one endpoint.
///
/// `path` must begin with `/` and may contain `{placeholder}` segments;
/// placeholders are opaque to the tree builder and only matched as wildcards
/// at dispatch time. Constraint lists are ordered; a `None` value means a
/// presence check.
#[derive(Clone)]
pub struct RouteDefinition {
    pub name: String,
    pub path: String,
    /// Allowed methods; empty means any.
    pub methods: Vec<HttpMethod>,
    /// Exact host constraint (request port is ignored).
    pub host: Option<String>,
    pub headers: Vec<(String, Option<String>)>,
    pub queries: Vec<(String, Option<String>)>,
    /// Allowed schemes; empty means any.
    pub schemes: Vec<String>,
    pub handler: Handler,
    pub middleware: Vec<Middleware>,
}

impl RouteDefinition {
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
            middleware: Vec::new(),
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

    /// Require the header to be present, with any value.
    pub fn header_present(mut self, name: &str) -> Self {
        self.headers.push((name.to_string(), None));
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.queries.push((key.to_string(), Some(value.to_string())));
        self
    }

    /// Require the query key to be present, with any value.
    pub fn query_present(mut self, key: &str) -> Self {
        self.queries.push((key.to_string(), None));
        self
    }

    pub fn scheme(mut self, scheme: &str) -> Self {
        self.schemes.push(scheme.to_string());
        self
    }

    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("methods", &self.methods)
            .field("host", &self.host)
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}

/// Append a shared middleware list onto every route's own list, in place.
/// The combined list composes under the uniform-wrapping rule, so the
/// appended entries end up innermost.
pub fn add_global_middleware(routes: &mut [RouteDefinition], middleware: &[Middleware]) {
    for route in routes {
        route.middleware.extend(middleware.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_handler() -> Handler {
        handler_fn(|_req, res| async move { res })
    }

    fn noop_middleware() -> Middleware {
        middleware_fn(|inner| inner)
    }

    #[test]
    fn test_builder_accumulates_constraints() {
        let route = RouteDefinition::new("UserIndex", "/users/", noop_handler())
            .method(HttpMethod::GET)
            .method(HttpMethod::HEAD)
            .host("example.com")
            .header("X-Test-Header", "Is correct")
            .header_present("Authorization")
            .query("page", "1")
            .scheme("https");

        assert_eq!(route.methods, vec![HttpMethod::GET, HttpMethod::HEAD]);
        assert_eq!(route.host.as_deref(), Some("example.com"));
        assert_eq!(route.headers.len(), 2);
        assert_eq!(route.headers[1], ("Authorization".to_string(), None));
        assert_eq!(route.queries.len(), 1);
        assert_eq!(route.schemes, vec!["https".to_string()]);
    }

    #[test]
    fn test_add_global_middleware_appends() {
        let mut routes = vec![
            RouteDefinition::new("a", "/a", noop_handler()).middleware(noop_middleware()),
            RouteDefinition::new("b", "/b", noop_handler()),
        ];

        add_global_middleware(&mut routes, &[noop_middleware(), noop_middleware()]);

        assert_eq!(routes[0].middleware.len(), 3);
        assert_eq!(routes[1].middleware.len(), 2);
    }
}
