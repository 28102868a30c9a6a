pub mod dispatch;
mod error;
pub mod http_helpers;
pub mod middleware;
pub mod route;
pub mod tree;

pub use dispatch::Router;
pub use error::CompileError;
pub use http_helpers::{HttpMethod, HttpRequest, HttpResponse};
pub use middleware::{BeforeAfterChain, MiddlewareChain};
pub use route::{
    add_global_middleware, handler_fn, middleware_fn, BoxFuture, FilteredRoute, Handler,
    Middleware, Resource, RouteDefinition,
};
pub use tree::PrefixNode;

// Re-export the map type leaf registries are keyed with
pub use rustc_hash::FxHashMap;
