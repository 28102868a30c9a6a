use rustc_hash::FxHashMap;
use tracing::trace;

use crate::dispatch::matcher::constraints_hold;
use crate::error::CompileError;
use crate::http_helpers::{HttpRequest, HttpResponse};
use crate::route::{FilteredRoute, Resource, RouteDefinition};
use crate::tree::{is_placeholder, placeholder_name, PrefixNode, PrefixTreeBuilder,
    ResourceTreeBuilder, RouteLeaf};

/// The compiled, immutable artifact: a prefix tree with composed handlers at
/// its leaves plus a name registry for reverse lookup.
///
/// Dispatch is read-only against the tree; a `Router` can serve any number
/// of in-flight requests without locking.
pub struct Router {
    root: PrefixNode,
    names: FxHashMap<String, String>,
}

impl Router {
    /// Compile a flat ordered list of routes.
    pub fn compile(routes: Vec<RouteDefinition>) -> Result<Self, CompileError> {
        let (root, names) = PrefixTreeBuilder::build(routes)?;
        Ok(Self { root, names })
    }

    /// Compile routes authored in the split before/after discipline.
    pub fn compile_filtered(routes: Vec<FilteredRoute>) -> Result<Self, CompileError> {
        Self::compile(
            routes
                .into_iter()
                .map(FilteredRoute::into_route_definition)
                .collect(),
        )
    }

    /// Compile a nested resource hierarchy. Sibling subtrees build
    /// concurrently; the call returns once every subtree is attached.
    pub async fn compile_resources(resources: Vec<Resource>) -> Result<Self, CompileError> {
        let (root, names) = ResourceTreeBuilder::build(resources).await?;
        Ok(Self { root, names })
    }

    pub fn root(&self) -> &PrefixNode {
        &self.root
    }

    /// Reverse lookup: the full path a route was registered under.
    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// Walk the tree for a matching leaf and invoke its composed handler.
    /// No match anywhere is a 404 outcome, never an error.
    pub async fn serve(&self, mut req: HttpRequest) -> HttpResponse {
        let Some(rest) = req.path.strip_prefix('/') else {
            return HttpResponse::not_found();
        };
        let segments: Vec<&str> = rest.split('/').collect();

        let mut params = Vec::new();
        match find_leaf(&self.root, &segments, &req, &mut params) {
            Some(leaf) => {
                trace!(route = %leaf.route.name, path = %req.path, "dispatching");
                for (name, value) in params {
                    req.path_params.insert(name, value);
                }
                (leaf.handler)(req, HttpResponse::new()).await
            }
            None => {
                trace!(path = %req.path, "no matching leaf");
                HttpResponse::not_found()
            }
        }
    }
}

/// Depth-first walk. Leaves at the current node are tried first, in
/// attachment order, against the full remaining suffix; then the exact child
/// for the next segment; then placeholder children as single-segment
/// wildcards (in sorted key order, so ties resolve deterministically).
fn find_leaf<'a>(
    node: &'a PrefixNode,
    segments: &[&str],
    req: &HttpRequest,
    params: &mut Vec<(String, String)>,
) -> Option<&'a RouteLeaf> {
    for leaf in node.leaves() {
        if let Some(captured) = suffix_matches(&leaf.suffix, segments) {
            if constraints_hold(&leaf.route, req) {
                params.extend(captured);
                return Some(leaf);
            }
        }
    }

    let (first, rest) = segments.split_first()?;

    if let Some(child) = node.child(*first) {
        if let Some(found) = find_leaf(child, rest, req, params) {
            return Some(found);
        }
    }

    if first.is_empty() {
        return None;
    }
    let mut wildcard_keys: Vec<&String> = node
        .children()
        .keys()
        .filter(|key| is_placeholder(key))
        .collect();
    wildcard_keys.sort();
    for key in wildcard_keys {
        let Some(child) = node.child(key) else { continue };
        params.push((placeholder_name(key).to_string(), (*first).to_string()));
        if let Some(found) = find_leaf(child, rest, req, params) {
            return Some(found);
        }
        params.pop();
    }
    None
}

/// Match a leaf's suffix pattern against the remaining request segments,
/// returning placeholder captures on success.
fn suffix_matches(suffix: &[String], segments: &[&str]) -> Option<Vec<(String, String)>> {
    if suffix.len() != segments.len() {
        return None;
    }
    let mut captured = Vec::new();
    for (pattern, segment) in suffix.iter().zip(segments) {
        if is_placeholder(pattern) {
            if segment.is_empty() {
                return None;
            }
            captured.push((placeholder_name(pattern).to_string(), (*segment).to_string()));
        } else if pattern.as_str() != *segment {
            return None;
        }
    }
    Some(captured)
}
