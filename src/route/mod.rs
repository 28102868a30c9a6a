mod definition;
pub use definition::{
    add_global_middleware, handler_fn, middleware_fn, BoxFuture, Handler, Middleware,
    RouteDefinition,
};

mod filtered;
pub use filtered::FilteredRoute;

mod resource;
pub use resource::Resource;
