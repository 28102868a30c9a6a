use std::fmt;

use crate::route::{Middleware, RouteDefinition};

/// A node in a nested resource hierarchy.
///
/// `path` is the prefix contributed to all descendants. `middleware` is
/// inherited by every descendant resource and route: the effective chain for
/// a route is the concatenation of all ancestor middleware, ancestor-first,
/// followed by the route's own.
#[derive(Clone)]
pub struct Resource {
    pub path: String,
    pub middleware: Vec<Middleware>,
    pub routes: Vec<RouteDefinition>,
    pub subresources: Vec<Resource>,
}

impl Resource {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            middleware: Vec::new(),
            routes: Vec::new(),
            subresources: Vec::new(),
        }
    }

    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn route(mut self, route: RouteDefinition) -> Self {
        self.routes.push(route);
        self
    }

    pub fn subresource(mut self, resource: Resource) -> Self {
        self.subresources.push(resource);
        self
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.path)
            .field("middleware", &self.middleware.len())
            .field("routes", &self.routes)
            .field("subresources", &self.subresources)
            .finish()
    }
}
