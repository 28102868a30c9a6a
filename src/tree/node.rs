use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::route::{Handler, RouteDefinition};

/// Split a path into its ordered segments, dropping the leading empty
/// segment produced by the leading slash. A trailing slash yields a trailing
/// empty segment, which acts as the "index" suffix of a prefix.
pub(crate) fn segmentize(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').map(str::to_string).collect()
}

/// `{name}` segments are opaque to the tree builder but match any single
/// non-empty segment at dispatch time.
pub(crate) fn is_placeholder(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}

pub(crate) fn placeholder_name(segment: &str) -> &str {
    &segment[1..segment.len() - 1]
}

/// A route terminating at a [`PrefixNode`]: the original definition with its
/// path rewritten to the node-relative suffix, plus the fully composed
/// handler.
pub struct RouteLeaf {
    pub route: RouteDefinition,
    /// Suffix segments still to be consumed below the owning node. Empty
    /// when the route's path equals the node's own prefix exactly.
    pub suffix: Vec<String>,
    pub handler: Handler,
}

impl fmt::Debug for RouteLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteLeaf")
            .field("name", &self.route.name)
            .field("suffix", &self.suffix)
            .finish()
    }
}

/// One shared path component in the compiled dispatch tree.
///
/// Created lazily by a builder the first time a route needs the prefix,
/// never deleted; the tree is built once per compilation and read-only
/// afterwards.
pub struct PrefixNode {
    segment: String,
    children: FxHashMap<String, PrefixNode>,
    leaves: Vec<RouteLeaf>,
}

impl PrefixNode {
    pub(crate) fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            children: FxHashMap::default(),
            leaves: Vec::new(),
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn children(&self) -> &FxHashMap<String, PrefixNode> {
        &self.children
    }

    pub fn child(&self, segment: &str) -> Option<&PrefixNode> {
        self.children.get(segment)
    }

    /// Leaves in attachment order.
    pub fn leaves(&self) -> &[RouteLeaf] {
        &self.leaves
    }

    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(PrefixNode::node_count).sum::<usize>()
    }

    pub(crate) fn child_entry(&mut self, segment: &str) -> &mut PrefixNode {
        self.children
            .entry(segment.to_string())
            .or_insert_with(|| PrefixNode::new(segment))
    }

    pub(crate) fn attach_leaf(&mut self, leaf: RouteLeaf) {
        self.leaves.push(leaf);
    }

    /// Fold another node's contents into this one: children union, leaves
    /// appended in order. Used when sibling subtrees land on the same key.
    pub(crate) fn merge(&mut self, other: PrefixNode) {
        self.leaves.extend(other.leaves);
        for (segment, child) in other.children {
            self.children
                .entry(segment)
                .or_insert_with(|| PrefixNode::new(&child.segment))
                .merge(child);
        }
    }
}

// Children are printed in sorted key order so two structurally identical
// trees format identically regardless of build interleaving.
impl fmt::Debug for PrefixNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: BTreeMap<&String, &PrefixNode> = self.children.iter().collect();
        f.debug_struct("PrefixNode")
            .field("segment", &self.segment)
            .field("leaves", &self.leaves)
            .field("children", &children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmentize() {
        assert_eq!(segmentize("/users/x"), vec!["users", "x"]);
        assert_eq!(segmentize("/users/"), vec!["users", ""]);
        assert_eq!(segmentize("/"), vec![""]);
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder("{id}"));
        assert!(!is_placeholder("{}"));
        assert!(!is_placeholder("users"));
        assert_eq!(placeholder_name("{id}"), "id");
    }

    #[test]
    fn test_node_count_counts_self() {
        let mut root = PrefixNode::new("");
        root.child_entry("users").child_entry("admins");

        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn test_merge_unions_children() {
        let mut a = PrefixNode::new("users");
        a.child_entry("admins");

        let mut b = PrefixNode::new("users");
        b.child_entry("admins").child_entry("super");
        b.child_entry("profiles");

        a.merge(b);

        assert_eq!(a.node_count(), 4);
        assert!(a.child("admins").unwrap().child("super").is_some());
        assert!(a.child("profiles").is_some());
    }
}
