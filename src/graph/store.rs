//! In-memory graph engine
//!
//! Uses insertion-ordered hash maps for O(1) lookups:
//! - nodes: NodeId -> value + adjacency (in/out edges, predecessor/successor counts)
//! - edges: EdgeKey -> descriptor + value
//! - hierarchy: parent/children forest, present only for compound graphs
//!
//! Every mutator validates first, then applies the whole change, then notifies
//! listeners. A failed call leaves the graph untouched.

use super::edge::{Edge, EdgeKey, EdgeKeyRef, EdgeRef};
use super::event::{EventKind, GraphEvent, ListenerId, Notifier};
use super::hierarchy::Hierarchy;
use super::node::NodeEntry;
use super::options::GraphOptions;
use super::property::PropertyValue;
use super::types::{FxIndexMap, NodeId};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by structural mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Cannot set named edge {v} -> {w} [{name}] when multigraph = false")]
    InvalidMultiEdge { v: NodeId, w: NodeId, name: String },

    #[error("Cannot set parent in a non-compound graph")]
    NotCompound,

    #[error("Setting {parent} as parent of {node} would create a cycle")]
    CycleViolation { node: NodeId, parent: NodeId },
}

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    edge: Edge,
    value: Option<E>,
}

/// Whether an edge write carries a value
enum EdgeValue<E> {
    /// No value argument: create with no value, or leave an existing value alone
    Untouched,
    /// Explicit value, `None` clears
    Set(Option<E>),
}

/// Directed or undirected, simple or multi, flat or compound graph
///
/// Node values are `N` and edge values are `E`, both optional per entity.
///
/// ```rust
/// use graphlib::{Graph, GraphOptions};
///
/// let mut g: Graph<&str, u32> = Graph::new(GraphOptions::default());
/// g.set_node("a", Some("start"));
/// g.set_path(&["a", "b", "c"], Some(1));
///
/// assert_eq!(g.node("a"), Some(&"start"));
/// assert_eq!(g.edge(("b", "c")), Some(&1));
/// assert_eq!(g.successors("a").collect::<Vec<_>>(), vec!["b"]);
/// ```
#[derive(Debug)]
pub struct Graph<N = PropertyValue, E = PropertyValue> {
    options: GraphOptions,
    nodes: FxIndexMap<NodeId, NodeEntry<N>>,
    edges: FxIndexMap<EdgeKey, EdgeEntry<E>>,
    hierarchy: Option<Hierarchy>,
    notifier: Notifier<N, E>,
}

impl<N, E> Graph<N, E> {
    pub fn new(options: GraphOptions) -> Self {
        Graph {
            options,
            nodes: FxIndexMap::default(),
            edges: FxIndexMap::default(),
            hierarchy: options.compound.then(Hierarchy::new),
            notifier: Notifier::new(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener for one kind of mutation event
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&GraphEvent<'_, N, E>) + 'static,
    {
        self.notifier.on(kind, handler)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.notifier.off(id)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.notifier.listener_count(kind)
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Nodes with no in-edges, in insertion order
    pub fn sources(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.is_source())
            .map(|(id, _)| id)
    }

    /// Nodes with no out-edges, in insertion order
    pub fn sinks(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.is_sink())
            .map(|(id, _)| id)
    }

    /// Create `id` or replace its value
    ///
    /// An existing node keeps its edges and hierarchy position; only the value
    /// changes, and the event reports `is_update = true`.
    pub fn set_node(&mut self, id: impl Into<NodeId>, value: Option<N>) -> &mut Self {
        let id = id.into();
        if let Some(entry) = self.nodes.get_mut(id.as_str()) {
            entry.value = value;
            trace!("Updated value of node {}", id);
            self.notifier.emit(&GraphEvent::NodeSet {
                id: &id,
                value: entry.value.as_ref(),
                is_update: true,
            });
            return self;
        }

        self.insert_node(id, value);
        self
    }

    /// Value of `id`; `None` both for a missing node and for a node without a value
    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id).and_then(|entry| entry.value.as_ref())
    }

    /// Mutable access to the value of `id`, without emitting an event
    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.nodes.get_mut(id).and_then(|entry| entry.value.as_mut())
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Remove `id` with every incident edge
    ///
    /// In a compound graph the node's direct children move up to the node's
    /// former parent. Returns false, doing nothing, if the node is absent.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let incident = match self.nodes.get(id) {
            Some(entry) => entry.adjacency.incident_keys(),
            None => return false,
        };
        for key in &incident {
            self.remove_edge_by_key(key.as_key_ref());
        }

        let Some((id, _)) = self.nodes.shift_remove_entry(id) else {
            return false;
        };
        if let Some(hierarchy) = self.hierarchy.as_mut() {
            let moved = hierarchy.remove(id.as_str());
            if !moved.is_empty() {
                debug!("Reparented {} children of removed node {}", moved.len(), id);
            }
        }

        debug!("Removed node {} ({} incident edges)", id, incident.len());
        self.notifier.emit(&GraphEvent::NodeRemoved { id: &id });
        true
    }

    /// Create `id` with no value unless it already exists.
    fn ensure_node(&mut self, id: &str) {
        if !self.nodes.contains_key(id) {
            self.insert_node(NodeId::from(id), None);
        }
    }

    fn insert_node(&mut self, id: NodeId, value: Option<N>) {
        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.insert(&id);
        }
        let (index, _) = self.nodes.insert_full(id, NodeEntry::new(value));

        if let Some((id, entry)) = self.nodes.get_index(index) {
            trace!("Created node {}", id);
            self.notifier.emit(&GraphEvent::NodeSet {
                id,
                value: entry.value.as_ref(),
                is_update: false,
            });
        }
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edge descriptors in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().map(|entry| &entry.edge)
    }

    /// Create an edge or replace its value
    ///
    /// Missing endpoints are created. An existing edge keeps its identity and
    /// gets `value` (a `None` clears it), reported as an update.
    ///
    /// Fails with [`GraphError::InvalidMultiEdge`] when a named edge is
    /// created on a graph that is not a multigraph.
    pub fn set_edge<'a>(
        &mut self,
        edge: impl Into<EdgeRef<'a>>,
        value: Option<E>,
    ) -> GraphResult<&mut Self> {
        self.put_edge(edge.into(), EdgeValue::Set(value))?;
        Ok(self)
    }

    /// Create an edge with no value if it does not exist yet
    ///
    /// An existing edge is left as is and no event fires.
    pub fn ensure_edge<'a>(&mut self, edge: impl Into<EdgeRef<'a>>) -> GraphResult<&mut Self> {
        self.put_edge(edge.into(), EdgeValue::Untouched)?;
        Ok(self)
    }

    /// Create an edge between every consecutive pair of `path`
    ///
    /// With `Some(value)` each edge gets a clone of it; with `None` existing
    /// edges keep their values. Paths shorter than two nodes do nothing.
    pub fn set_path(&mut self, path: &[&str], value: Option<E>) -> &mut Self
    where
        E: Clone,
    {
        for pair in path.windows(2) {
            let key = EdgeKeyRef::canonical(self.options.directed, pair[0], pair[1], None);
            let value = match &value {
                Some(value) => EdgeValue::Set(Some(value.clone())),
                None => EdgeValue::Untouched,
            };
            self.upsert_edge(key, value);
        }
        self
    }

    /// Value of an edge; `None` both for a missing edge and for an edge without a value
    pub fn edge<'a>(&self, edge: impl Into<EdgeRef<'a>>) -> Option<&E> {
        let key = edge.into().resolve(self.options.directed);
        self.edges
            .get(&key)
            .and_then(|entry| entry.value.as_ref())
    }

    /// Mutable access to the value of an edge, without emitting an event
    pub fn edge_mut<'a>(&mut self, edge: impl Into<EdgeRef<'a>>) -> Option<&mut E> {
        let key = edge.into().resolve(self.options.directed);
        self.edges
            .get_mut(&key)
            .and_then(|entry| entry.value.as_mut())
    }

    pub fn has_edge<'a>(&self, edge: impl Into<EdgeRef<'a>>) -> bool {
        let key = edge.into().resolve(self.options.directed);
        self.edges.contains_key(&key)
    }

    /// Remove an edge, keeping its endpoints
    ///
    /// Returns false, doing nothing, if the edge is absent.
    pub fn remove_edge<'a>(&mut self, edge: impl Into<EdgeRef<'a>>) -> bool {
        let key = edge.into().resolve(self.options.directed);
        self.remove_edge_by_key(key)
    }

    /// Edges pointing at `v`, optionally only those coming from `u`
    pub fn in_edges<'a>(&'a self, v: &str, u: Option<&'a str>) -> impl Iterator<Item = &'a Edge> {
        self.nodes
            .get(v)
            .into_iter()
            .flat_map(|entry| entry.adjacency.in_edges())
            .filter(move |edge| u.map_or(true, |u| edge.v() == u))
    }

    /// Edges leaving `v`, optionally only those going to `w`
    pub fn out_edges<'a>(&'a self, v: &str, w: Option<&'a str>) -> impl Iterator<Item = &'a Edge> {
        self.nodes
            .get(v)
            .into_iter()
            .flat_map(|entry| entry.adjacency.out_edges())
            .filter(move |edge| w.map_or(true, |w| edge.w() == w))
    }

    /// Every edge incident to `v`, in-edges first, optionally only those also
    /// touching `w`
    ///
    /// This is the view to use on undirected graphs, where each edge is stored
    /// as an in-edge of one endpoint and an out-edge of the other.
    pub fn node_edges<'a>(&'a self, v: &str, w: Option<&'a str>) -> impl Iterator<Item = &'a Edge> {
        self.in_edges(v, w).chain(self.out_edges(v, w))
    }

    /// Distinct nodes with an edge into `v`
    pub fn predecessors(&self, v: &str) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .get(v)
            .into_iter()
            .flat_map(|entry| entry.adjacency.predecessors())
    }

    /// Distinct nodes with an edge out of `v`
    pub fn successors(&self, v: &str) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .get(v)
            .into_iter()
            .flat_map(|entry| entry.adjacency.successors())
    }

    /// Distinct adjacent nodes: predecessors first, then successors not
    /// already listed
    pub fn neighbors(&self, v: &str) -> impl Iterator<Item = &NodeId> {
        self.nodes.get(v).into_iter().flat_map(|entry| {
            let adjacency = &entry.adjacency;
            adjacency.predecessors().chain(
                adjacency
                    .successors()
                    .filter(move |node| !adjacency.has_predecessor(node.as_str())),
            )
        })
    }

    /// True if `v` has no successors (directed) or no neighbors (undirected)
    pub fn is_leaf(&self, v: &str) -> bool {
        if self.options.directed {
            self.successors(v).next().is_none()
        } else {
            self.neighbors(v).next().is_none()
        }
    }

    fn put_edge(&mut self, edge: EdgeRef<'_>, value: EdgeValue<E>) -> GraphResult<()> {
        let key = edge.resolve(self.options.directed);
        if let Some(name) = key.name {
            if !self.options.multigraph {
                return Err(GraphError::InvalidMultiEdge {
                    v: NodeId::from(key.v),
                    w: NodeId::from(key.w),
                    name: name.to_string(),
                });
            }
        }
        self.upsert_edge(key, value);
        Ok(())
    }

    fn upsert_edge(&mut self, key: EdgeKeyRef<'_>, value: EdgeValue<E>) {
        if let Some(entry) = self.edges.get_mut(&key) {
            if let EdgeValue::Set(value) = value {
                entry.value = value;
                trace!("Updated value of edge {}", entry.edge);
                self.notifier.emit(&GraphEvent::EdgeSet {
                    edge: &entry.edge,
                    value: entry.value.as_ref(),
                    is_update: true,
                });
            }
            return;
        }

        self.ensure_node(key.v);
        self.ensure_node(key.w);

        let edge = key.to_edge();
        if let Some(target) = self.nodes.get_mut(key.w) {
            target.adjacency.link_in(key.to_key(), &edge);
        }
        if let Some(source) = self.nodes.get_mut(key.v) {
            source.adjacency.link_out(key.to_key(), &edge);
        }

        let value = match value {
            EdgeValue::Set(value) => value,
            EdgeValue::Untouched => None,
        };
        let (index, _) = self.edges.insert_full(key.to_key(), EdgeEntry { edge, value });

        if let Some((_, entry)) = self.edges.get_index(index) {
            trace!("Created edge {}", entry.edge);
            self.notifier.emit(&GraphEvent::EdgeSet {
                edge: &entry.edge,
                value: entry.value.as_ref(),
                is_update: false,
            });
        }
    }

    fn remove_edge_by_key(&mut self, key: EdgeKeyRef<'_>) -> bool {
        let Some((_, entry)) = self.edges.shift_remove_entry(&key) else {
            return false;
        };

        let edge = entry.edge;
        let key = edge.key_ref();
        if let Some(target) = self.nodes.get_mut(key.w) {
            target.adjacency.unlink_in(key);
        }
        if let Some(source) = self.nodes.get_mut(key.v) {
            source.adjacency.unlink_out(key);
        }

        debug!("Removed edge {}", edge);
        self.notifier.emit(&GraphEvent::EdgeRemoved { edge: &edge });
        true
    }

    // ------------------------------------------------------------------
    // Compound hierarchy
    // ------------------------------------------------------------------

    /// Make `parent` the parent of `node`, creating either if absent
    ///
    /// Fails with [`GraphError::NotCompound`] on a flat graph and with
    /// [`GraphError::CycleViolation`] when `parent` is `node` or one of its
    /// descendants. On failure nothing changes.
    pub fn set_parent(&mut self, node: &str, parent: &str) -> GraphResult<&mut Self> {
        let hierarchy = self.hierarchy.as_ref().ok_or(GraphError::NotCompound)?;
        if hierarchy.would_cycle(node, parent) {
            return Err(GraphError::CycleViolation {
                node: NodeId::from(node),
                parent: NodeId::from(parent),
            });
        }

        self.ensure_node(parent);
        self.ensure_node(node);
        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.attach(&NodeId::from(node), Some(&NodeId::from(parent)));
        }
        debug!("Set parent of {} to {}", node, parent);
        Ok(self)
    }

    /// Make `node` a top-level node, creating it if absent
    ///
    /// Fails with [`GraphError::NotCompound`] on a flat graph.
    pub fn clear_parent(&mut self, node: &str) -> GraphResult<&mut Self> {
        if self.hierarchy.is_none() {
            return Err(GraphError::NotCompound);
        }

        self.ensure_node(node);
        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.attach(&NodeId::from(node), None);
        }
        debug!("Cleared parent of {}", node);
        Ok(self)
    }

    /// Explicit parent of `node`
    ///
    /// `None` for top-level nodes, missing nodes, and flat graphs.
    pub fn parent(&self, node: &str) -> Option<&NodeId> {
        self.hierarchy
            .as_ref()
            .and_then(|hierarchy| hierarchy.parent(node))
    }

    /// Direct children of `node`, or the top-level nodes when `node` is `None`
    ///
    /// In a flat graph every node is top-level and no node has children.
    pub fn children<'a>(&'a self, node: Option<&str>) -> Box<dyn Iterator<Item = &'a NodeId> + 'a> {
        match (&self.hierarchy, node) {
            (Some(hierarchy), Some(node)) => match hierarchy.children(node) {
                Some(children) => Box::new(children),
                None => Box::new(std::iter::empty()),
            },
            (Some(hierarchy), None) => Box::new(hierarchy.roots()),
            (None, None) => Box::new(self.nodes.keys()),
            (None, Some(_)) => Box::new(std::iter::empty()),
        }
    }
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}
