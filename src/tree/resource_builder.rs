use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::CompileError;
use crate::middleware::MiddlewareChain;
use crate::route::{BoxFuture, Middleware, Resource};
use crate::tree::{segmentize, PrefixNode, RouteLeaf};

/// Builds a prefix tree from a nested resource hierarchy.
///
/// Each resource contributes its path segments as a node chain and its
/// middleware to every descendant. Sibling subresources are independent
/// subtrees: each is built on its own task and joined before the parent
/// level returns — strict fork-join, no partial results cross the barrier.
/// The first failure wins; remaining siblings run to completion but their
/// results are discarded.
pub struct ResourceTreeBuilder;

struct BuiltSubtree {
    /// The resource's own prefix segments, relative to its parent.
    segments: Vec<String>,
    /// Subtree rooted at the last of `segments` (contents only when
    /// `segments` is empty).
    node: PrefixNode,
    names: Vec<(String, String)>,
}

impl ResourceTreeBuilder {
    pub async fn build(
        resources: Vec<Resource>,
    ) -> Result<(PrefixNode, FxHashMap<String, String>), CompileError> {
        let mut root = PrefixNode::new("");
        let collected = join_siblings(&mut root, resources, Vec::new(), String::new()).await?;

        let mut names = FxHashMap::default();
        for (name, path) in collected {
            if names.insert(name.clone(), path).is_some() {
                return Err(CompileError::DuplicateRouteName(name));
            }
        }
        Ok((root, names))
    }
}

/// Fan sibling builds out onto independent tasks, await them all, then graft
/// each finished subtree onto `parent`. Every handle is awaited even after a
/// failure so in-flight siblings finish before the error propagates.
async fn join_siblings(
    parent: &mut PrefixNode,
    siblings: Vec<Resource>,
    inherited: Vec<Middleware>,
    base: String,
) -> Result<Vec<(String, String)>, CompileError> {
    debug!(base = %base, siblings = siblings.len(), "fanning out resource level");

    let mut handles = Vec::with_capacity(siblings.len());
    for resource in siblings {
        handles.push(tokio::spawn(build_resource(
            resource,
            inherited.clone(),
            base.clone(),
        )));
    }

    let mut names = Vec::new();
    let mut first_err = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(built)) => {
                if first_err.is_none() {
                    names.extend(built.names);
                    graft(parent, &built.segments, built.node);
                }
            }
            Ok(Err(e)) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
            Err(join_err) => {
                if first_err.is_none() {
                    first_err = Some(CompileError::from(join_err));
                }
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(names),
    }
}

fn build_resource(
    resource: Resource,
    inherited: Vec<Middleware>,
    base: String,
) -> BoxFuture<Result<BuiltSubtree, CompileError>> {
    Box::pin(async move {
        if resource.path.is_empty() || !resource.path.starts_with('/') {
            return Err(CompileError::MalformedRoute {
                name: "<resource>".to_string(),
                path: resource.path,
            });
        }

        let segments: Vec<String> = segmentize(&resource.path)
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        let prefix_path = if segments.is_empty() {
            base.clone()
        } else {
            format!("{}/{}", base, segments.join("/"))
        };

        // ancestor-first: the propagated set, then this resource's own
        let mut effective = inherited;
        effective.extend(resource.middleware.iter().cloned());

        let mut node = PrefixNode::new(segments.last().map(String::as_str).unwrap_or(""));
        let mut names = Vec::with_capacity(resource.routes.len());

        for route in resource.routes {
            if route.path.is_empty() || !route.path.starts_with('/') {
                return Err(CompileError::MalformedRoute {
                    name: route.name,
                    path: route.path,
                });
            }
            names.push((route.name.clone(), format!("{}{}", prefix_path, route.path)));

            let mut chain = effective.clone();
            chain.extend(route.middleware.iter().cloned());
            let handler = MiddlewareChain::from(chain).compose(route.handler.clone());
            let suffix = segmentize(&route.path);

            debug!(route = %route.name, node = %prefix_path, "attached resource route");
            node.attach_leaf(RouteLeaf {
                route,
                suffix,
                handler,
            });
        }

        let child_names =
            join_siblings(&mut node, resource.subresources, effective, prefix_path).await?;
        names.extend(child_names);

        Ok(BuiltSubtree {
            segments,
            node,
            names,
        })
    })
}

/// Attach a built subtree under `parent`, creating intermediate nodes for a
/// multi-segment resource path. Subtrees landing on an existing key are
/// merged structurally.
fn graft(parent: &mut PrefixNode, segments: &[String], subtree: PrefixNode) {
    match segments.split_last() {
        None => parent.merge(subtree),
        Some((last, ancestors)) => {
            let mut node = parent;
            for segment in ancestors {
                node = node.child_entry(segment);
            }
            node.child_entry(last).merge(subtree);
        }
    }
}
