use thiserror::Error;

/// Errors surfaced while compiling a route set into a [`Router`].
///
/// Compilation aborts on the first error; no partial router is returned.
///
/// [`Router`]: crate::Router
#[derive(Debug, Error)]
pub enum CompileError {
    /// A route (or resource) path was empty or missing its leading slash.
    #[error("malformed path `{path}` for route `{name}`: paths must begin with '/'")]
    MalformedRoute { name: String, path: String },

    /// Two routes in the same set share a name. Reverse lookup by name
    /// requires uniqueness.
    #[error("duplicate route name `{0}`")]
    DuplicateRouteName(String),

    /// A sibling resource build task panicked before it could report a result.
    #[error("resource subtree build task failed")]
    SubtreePanic(#[from] tokio::task::JoinError),
}
