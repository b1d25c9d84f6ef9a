//! Compound hierarchy
//!
//! Parent/child forest over the real nodes, rooted at a virtual root that is
//! never itself a node. A node with no explicit parent is a direct child of
//! the root. The parent relation is kept acyclic by `would_cycle`, checked
//! before every reparenting.

use super::types::{FxIndexMap, FxIndexSet, NodeId};

#[derive(Debug, Clone, Default)]
pub(crate) struct Hierarchy {
    /// Explicit parents only; absence means the root
    parent: FxIndexMap<NodeId, NodeId>,

    /// Direct children of every real node
    children: FxIndexMap<NodeId, FxIndexSet<NodeId>>,

    /// Direct children of the root
    roots: FxIndexSet<NodeId>,
}

impl Hierarchy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a new node as a top-level node with no children.
    pub(crate) fn insert(&mut self, node: &NodeId) {
        self.children.entry(node.clone()).or_default();
        if !self.parent.contains_key(node.as_str()) {
            self.roots.insert(node.clone());
        }
    }

    pub(crate) fn parent(&self, node: &str) -> Option<&NodeId> {
        self.parent.get(node)
    }

    /// Direct children of `node`, or `None` if `node` is not registered
    pub(crate) fn children(&self, node: &str) -> Option<impl Iterator<Item = &NodeId>> {
        self.children.get(node).map(|set| set.iter())
    }

    pub(crate) fn roots(&self) -> impl Iterator<Item = &NodeId> {
        self.roots.iter()
    }

    /// True if making `parent` the parent of `node` would close a cycle,
    /// i.e. `node` is `parent` or one of its ancestors.
    pub(crate) fn would_cycle(&self, node: &str, parent: &str) -> bool {
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == node {
                return true;
            }
            ancestor = self.parent.get(current).map(NodeId::as_str);
        }
        false
    }

    /// Move `node` under `parent`, or under the root when `parent` is `None`.
    ///
    /// Both must already be registered and the move must not close a cycle.
    pub(crate) fn attach(&mut self, node: &NodeId, parent: Option<&NodeId>) {
        self.detach(node.as_str());
        match parent {
            Some(parent) => {
                self.parent.insert(node.clone(), parent.clone());
                self.children
                    .entry(parent.clone())
                    .or_default()
                    .insert(node.clone());
            }
            None => {
                self.roots.insert(node.clone());
            }
        }
    }

    /// Unregister `node`, handing its direct children to its former parent.
    ///
    /// Returns the children that were moved.
    pub(crate) fn remove(&mut self, node: &str) -> Vec<NodeId> {
        let former = self.parent.get(node).cloned();
        self.detach(node);
        let orphans: Vec<NodeId> = self
            .children
            .shift_remove(node)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();

        for child in &orphans {
            self.attach(child, former.as_ref());
        }
        orphans
    }

    /// Take `node` out of its current parent's child set.
    fn detach(&mut self, node: &str) {
        match self.parent.shift_remove(node) {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(parent.as_str()) {
                    siblings.shift_remove(node);
                }
            }
            None => {
                self.roots.shift_remove(node);
            }
        }
    }
}
