//! Graphlib
//!
//! An in-memory graph library for layout engines and other tools that need to
//! build a graph, query its adjacency, and react to its changes.
//!
//! # Features
//!
//! - Nodes identified by strings, each with an optional value
//! - Directed or undirected edges, with at most one unnamed edge per pair
//! - Multigraph mode: any number of named edges between the same pair
//! - Compound mode: nodes nest under parent nodes in an acyclic hierarchy
//! - Insertion-ordered enumeration of nodes, edges and neighbors
//! - Listeners notified synchronously after every mutation
//!
//! ## Example Usage
//!
//! ```rust
//! use graphlib::{EventKind, Graph, GraphOptions};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut g: Graph<&str, u32> = Graph::new(GraphOptions::new().multigraph(true));
//!
//! let created = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&created);
//! g.on(EventKind::SetEdge, move |event| {
//!     if !event.is_update() {
//!         *counter.borrow_mut() += 1;
//!     }
//! });
//!
//! g.set_node("a", Some("first"));
//! g.set_edge(("a", "b", "x"), Some(1)).unwrap();
//! g.set_edge(("a", "b", "y"), Some(2)).unwrap();
//!
//! assert_eq!(g.edge(("a", "b", "y")), Some(&2));
//! assert_eq!(g.successors("a").count(), 1);
//! assert_eq!(*created.borrow(), 2);
//!
//! g.remove_node("b");
//! assert_eq!(g.edge_count(), 0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeKey, EdgeRef, EventKind, Graph, GraphError, GraphEvent, GraphOptions, GraphResult,
    ListenerId, NodeId, PropertyValue,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
