use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::CompileError;
use crate::middleware::MiddlewareChain;
use crate::route::RouteDefinition;
use crate::tree::{segmentize, PrefixNode, RouteLeaf};

/// Builds a prefix-sharing tree from a flat ordered list of routes.
///
/// Routes are processed in input order. Each route reuses the deepest
/// already-built node covering a prefix of its path and only creates nodes
/// for the segments below it, so the tree holds exactly one node per
/// distinct ancestor prefix, not one per route.
///
/// The path registry is owned by the builder instance and dropped when
/// [`finish`](Self::finish) returns; nothing about construction survives
/// into the compiled tree.
pub struct PrefixTreeBuilder {
    root: PrefixNode,
    registry: FxHashSet<String>,
    names: FxHashMap<String, String>,
}

impl PrefixTreeBuilder {
    pub fn new() -> Self {
        let mut registry = FxHashSet::default();
        // the empty prefix is the root and always matches
        registry.insert(String::new());
        Self {
            root: PrefixNode::new(""),
            registry,
            names: FxHashMap::default(),
        }
    }

    /// Compile a whole route list in one call.
    pub fn build(
        routes: Vec<RouteDefinition>,
    ) -> Result<(PrefixNode, FxHashMap<String, String>), CompileError> {
        let mut builder = Self::new();
        for route in routes {
            builder.add_route(route)?;
        }
        Ok(builder.finish())
    }

    pub fn add_route(&mut self, mut route: RouteDefinition) -> Result<(), CompileError> {
        if route.path.is_empty() || !route.path.starts_with('/') {
            return Err(CompileError::MalformedRoute {
                name: route.name,
                path: route.path,
            });
        }
        if self.names.contains_key(&route.name) {
            return Err(CompileError::DuplicateRouteName(route.name));
        }
        self.names.insert(route.name.clone(), route.path.clone());

        let segments = segmentize(&route.path);

        // Walk back from the deepest candidate toward the root until a node
        // already covers the prefix. The full segment list is only a
        // candidate when the last segment is non-empty: node paths never end
        // in the empty index segment.
        let last_is_empty = segments.last().is_some_and(|s| s.is_empty());
        let mut cut = if last_is_empty {
            segments.len() - 1
        } else {
            segments.len()
        };
        while !self.registry.contains(&segments[..cut].join("/")) {
            cut -= 1;
        }

        // A full-length match means the path equals an existing prefix: the
        // route attaches directly on that node with an empty suffix.
        let (owned, suffix) = if cut == segments.len() {
            (&segments[..], Vec::new())
        } else {
            (
                &segments[..segments.len() - 1],
                vec![segments[segments.len() - 1].clone()],
            )
        };

        let mut node = &mut self.root;
        for (idx, segment) in owned.iter().enumerate() {
            node = node.child_entry(segment);
            if idx >= cut {
                self.registry.insert(segments[..=idx].join("/"));
            }
        }

        debug!(
            route = %route.name,
            reused = cut,
            created = owned.len().saturating_sub(cut),
            "attached route"
        );

        let handler = MiddlewareChain::from(route.middleware.clone()).compose(route.handler.clone());
        route.path = if suffix.is_empty() {
            String::new()
        } else {
            format!("/{}", suffix.join("/"))
        };
        node.attach_leaf(RouteLeaf {
            route,
            suffix,
            handler,
        });
        Ok(())
    }

    /// Hand the finished tree over; the construction registry dies here.
    pub fn finish(self) -> (PrefixNode, FxHashMap<String, String>) {
        (self.root, self.names)
    }
}

impl Default for PrefixTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
