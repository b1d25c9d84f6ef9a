//! Per-node adjacency index
//!
//! Maintained incrementally on every edge insertion and removal:
//! - in/out edge maps keyed by edge identity
//! - predecessor/successor counters keyed by neighbor, counting parallel edges

use super::edge::{Edge, EdgeKey, EdgeKeyRef};
use super::types::{FxIndexMap, NodeId};

#[derive(Debug, Clone, Default)]
pub(crate) struct Adjacency {
    in_edges: FxIndexMap<EdgeKey, Edge>,
    out_edges: FxIndexMap<EdgeKey, Edge>,
    predecessors: FxIndexMap<NodeId, usize>,
    successors: FxIndexMap<NodeId, usize>,
}

impl Adjacency {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `edge` as pointing at this node.
    pub(crate) fn link_in(&mut self, key: EdgeKey, edge: &Edge) {
        increment(&mut self.predecessors, edge.v());
        self.in_edges.insert(key, edge.clone());
    }

    /// Record `edge` as leaving this node.
    pub(crate) fn link_out(&mut self, key: EdgeKey, edge: &Edge) {
        increment(&mut self.successors, edge.w());
        self.out_edges.insert(key, edge.clone());
    }

    pub(crate) fn unlink_in(&mut self, key: EdgeKeyRef<'_>) {
        decrement(&mut self.predecessors, key.v);
        self.in_edges.shift_remove(&key);
    }

    pub(crate) fn unlink_out(&mut self, key: EdgeKeyRef<'_>) {
        decrement(&mut self.successors, key.w);
        self.out_edges.shift_remove(&key);
    }

    pub(crate) fn in_edges(&self) -> impl Iterator<Item = &Edge> {
        self.in_edges.values()
    }

    pub(crate) fn out_edges(&self) -> impl Iterator<Item = &Edge> {
        self.out_edges.values()
    }

    pub(crate) fn in_degree(&self) -> usize {
        self.in_edges.len()
    }

    pub(crate) fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    pub(crate) fn predecessors(&self) -> impl Iterator<Item = &NodeId> {
        self.predecessors.keys()
    }

    pub(crate) fn successors(&self) -> impl Iterator<Item = &NodeId> {
        self.successors.keys()
    }

    pub(crate) fn has_predecessor(&self, node: &str) -> bool {
        self.predecessors.contains_key(node)
    }

    #[cfg(test)]
    pub(crate) fn has_successor(&self, node: &str) -> bool {
        self.successors.contains_key(node)
    }

    #[cfg(test)]
    /// Number of parallel edges arriving from `node`
    pub(crate) fn predecessor_count(&self, node: &str) -> usize {
        self.predecessors.get(node).copied().unwrap_or(0)
    }

    #[cfg(test)]
    /// Number of parallel edges leaving towards `node`
    pub(crate) fn successor_count(&self, node: &str) -> usize {
        self.successors.get(node).copied().unwrap_or(0)
    }

    /// Identities of every incident edge, in-edges first.
    pub(crate) fn incident_keys(&self) -> Vec<EdgeKey> {
        self.in_edges
            .keys()
            .chain(self.out_edges.keys())
            .cloned()
            .collect()
    }
}

fn increment(counts: &mut FxIndexMap<NodeId, usize>, node: &NodeId) {
    match counts.get_mut(node.as_str()) {
        Some(count) => *count += 1,
        None => {
            counts.insert(node.clone(), 1);
        }
    }
}

fn decrement(counts: &mut FxIndexMap<NodeId, usize>, node: &str) {
    if let Some(count) = counts.get_mut(node) {
        *count -= 1;
        if *count == 0 {
            counts.shift_remove(node);
        }
    }
}
