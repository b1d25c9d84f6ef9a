//! Core graph implementation
//!
//! This module implements the graph data model with:
//! - Directed or undirected edges, canonicalized once at the API boundary
//! - Simple graphs or multigraphs with named parallel edges
//! - An optional compound hierarchy of parent/child nodes
//! - Insertion-ordered storage with hash-based adjacency indices
//! - Synchronous mutation events

pub mod edge;
pub mod event;
pub mod options;
pub mod property;
pub mod store;
pub mod types;

mod adjacency;
mod hierarchy;
mod node;

// Re-export main types
pub use edge::{Edge, EdgeKey, EdgeRef};
pub use event::{EventKind, GraphEvent, ListenerId, Notifier};
pub use options::GraphOptions;
pub use property::PropertyValue;
pub use store::{Graph, GraphError, GraphResult};
pub use types::{FxIndexMap, FxIndexSet, NodeId};
