//! Node store entry
//!
//! A node exists iff its entry is present in the store; the entry owns the
//! node's value and its adjacency index so the two can never disagree.

use super::adjacency::Adjacency;

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry<N> {
    /// Associated value, `None` when absent
    pub(crate) value: Option<N>,

    pub(crate) adjacency: Adjacency,
}

impl<N> NodeEntry<N> {
    pub(crate) fn new(value: Option<N>) -> Self {
        NodeEntry {
            value,
            adjacency: Adjacency::new(),
        }
    }

    /// True if no edge points at this node
    pub(crate) fn is_source(&self) -> bool {
        self.adjacency.in_degree() == 0
    }

    /// True if no edge leaves this node
    pub(crate) fn is_sink(&self) -> bool {
        self.adjacency.out_degree() == 0
    }
}
