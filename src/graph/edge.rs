//! Edge identity codec
//!
//! Maps `(v, w, name?)` to the canonical identity used to store an edge and to
//! the immutable descriptor handed back to callers. Undirected graphs order the
//! endpoints before either is built, so `{v, w}` and `{w, v}` share one identity.
//!
//! The "no name" sentinel is `None`. It cannot collide with any user-chosen
//! name, including the empty string.

use super::types::NodeId;
use indexmap::Equivalent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Immutable edge descriptor
///
/// Returned from enumeration APIs and carried by edge events. Endpoints are
/// canonical (possibly swapped in undirected graphs) and `name` is present only
/// for explicitly named multigraph edges. A descriptor obtained from a graph
/// can be passed back to any edge query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    v: NodeId,
    w: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Edge {
    /// Create an unnamed edge descriptor
    pub fn new(v: impl Into<NodeId>, w: impl Into<NodeId>) -> Self {
        Edge {
            v: v.into(),
            w: w.into(),
            name: None,
        }
    }

    /// Create a named (multigraph) edge descriptor
    pub fn named(v: impl Into<NodeId>, w: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Edge {
            v: v.into(),
            w: w.into(),
            name: Some(name.into()),
        }
    }

    /// Source endpoint
    pub fn v(&self) -> &NodeId {
        &self.v
    }

    /// Target endpoint
    pub fn w(&self) -> &NodeId {
        &self.w
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if this edge touches `node` at either end
    pub fn is_incident(&self, node: &str) -> bool {
        self.v == *node || self.w == *node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint
    pub fn opposite(&self, node: &str) -> Option<&NodeId> {
        if self.v == *node {
            Some(&self.w)
        } else if self.w == *node {
            Some(&self.v)
        } else {
            None
        }
    }

    pub(crate) fn key_ref(&self) -> EdgeKeyRef<'_> {
        EdgeKeyRef {
            v: self.v.as_str(),
            w: self.w.as_str(),
            name: self.name.as_deref(),
        }
    }

    /// Identity of this descriptor, taken as already canonical
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            v: self.v.clone(),
            w: self.w.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} -> {} [{}]", self.v, self.w, name),
            None => write!(f, "{} -> {}", self.v, self.w),
        }
    }
}

/// Canonical edge identity
///
/// Owned key of the edge store and of the per-node in/out edge maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeKey {
    v: NodeId,
    w: NodeId,
    name: Option<String>,
}

impl EdgeKey {
    pub fn v(&self) -> &NodeId {
        &self.v
    }

    pub fn w(&self) -> &NodeId {
        &self.w
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn as_key_ref(&self) -> EdgeKeyRef<'_> {
        EdgeKeyRef {
            v: self.v.as_str(),
            w: self.w.as_str(),
            name: self.name.as_deref(),
        }
    }
}

// Must hash exactly like `EdgeKeyRef` so borrowed lookups find owned keys.
impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.as_str().hash(state);
        self.w.as_str().hash(state);
        self.name.as_deref().hash(state);
    }
}

/// Borrowed canonical identity, used for lookups without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeKeyRef<'a> {
    pub(crate) v: &'a str,
    pub(crate) w: &'a str,
    pub(crate) name: Option<&'a str>,
}

impl<'a> EdgeKeyRef<'a> {
    /// Apply undirected canonicalization to raw call arguments.
    pub(crate) fn canonical(directed: bool, v: &'a str, w: &'a str, name: Option<&'a str>) -> Self {
        let (v, w) = if !directed && v > w { (w, v) } else { (v, w) };
        EdgeKeyRef { v, w, name }
    }

    pub(crate) fn to_key(self) -> EdgeKey {
        EdgeKey {
            v: NodeId::from(self.v),
            w: NodeId::from(self.w),
            name: self.name.map(str::to_string),
        }
    }

    pub(crate) fn to_edge(self) -> Edge {
        Edge {
            v: NodeId::from(self.v),
            w: NodeId::from(self.w),
            name: self.name.map(str::to_string),
        }
    }
}

impl Hash for EdgeKeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
        self.name.hash(state);
    }
}

impl Equivalent<EdgeKey> for EdgeKeyRef<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == *self.v && key.w == *self.w && key.name.as_deref() == self.name
    }
}

/// The call forms accepted wherever an edge is addressed
///
/// Resolved once at the API boundary into a canonical identity:
///
/// ```rust
/// use graphlib::{Edge, EdgeRef};
///
/// let plain: EdgeRef = ("a", "b").into();
/// let named: EdgeRef = ("a", "b", "x").into();
/// let edge = Edge::named("a", "b", "x");
/// let by_descriptor: EdgeRef = (&edge).into();
/// assert_eq!(named.name(), by_descriptor.name());
/// assert_eq!(plain.name(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum EdgeRef<'a> {
    Endpoints {
        v: &'a str,
        w: &'a str,
        name: Option<&'a str>,
    },
    Descriptor(&'a Edge),
}

impl<'a> EdgeRef<'a> {
    pub fn v(&self) -> &'a str {
        match *self {
            EdgeRef::Endpoints { v, .. } => v,
            EdgeRef::Descriptor(edge) => edge.v.as_str(),
        }
    }

    pub fn w(&self) -> &'a str {
        match *self {
            EdgeRef::Endpoints { w, .. } => w,
            EdgeRef::Descriptor(edge) => edge.w.as_str(),
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        match *self {
            EdgeRef::Endpoints { name, .. } => name,
            EdgeRef::Descriptor(edge) => edge.name.as_deref(),
        }
    }

    pub(crate) fn resolve(self, directed: bool) -> EdgeKeyRef<'a> {
        EdgeKeyRef::canonical(directed, self.v(), self.w(), self.name())
    }
}

impl<'a> From<(&'a str, &'a str)> for EdgeRef<'a> {
    fn from((v, w): (&'a str, &'a str)) -> Self {
        EdgeRef::Endpoints { v, w, name: None }
    }
}

impl<'a> From<(&'a str, &'a str, &'a str)> for EdgeRef<'a> {
    fn from((v, w, name): (&'a str, &'a str, &'a str)) -> Self {
        EdgeRef::Endpoints {
            v,
            w,
            name: Some(name),
        }
    }
}

impl<'a> From<(&'a str, &'a str, Option<&'a str>)> for EdgeRef<'a> {
    fn from((v, w, name): (&'a str, &'a str, Option<&'a str>)) -> Self {
        EdgeRef::Endpoints { v, w, name }
    }
}

impl<'a> From<(&'a NodeId, &'a NodeId)> for EdgeRef<'a> {
    fn from((v, w): (&'a NodeId, &'a NodeId)) -> Self {
        EdgeRef::Endpoints {
            v: v.as_str(),
            w: w.as_str(),
            name: None,
        }
    }
}

impl<'a> From<&'a Edge> for EdgeRef<'a> {
    fn from(edge: &'a Edge) -> Self {
        EdgeRef::Descriptor(edge)
    }
}
