//! Graph construction options

use serde::{Deserialize, Serialize};

/// Mode flags fixed at construction time
///
/// Missing fields take their defaults when deserialized, so a partial config
/// such as `{"compound": true}` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Edges are ordered (v -> w) rather than symmetric
    pub directed: bool,
    /// Multiple named edges may join the same pair of nodes
    pub multigraph: bool,
    /// Nodes form a parent/child hierarchy besides the edges
    pub compound: bool,
}

impl GraphOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = multigraph;
        self
    }

    pub fn compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: true,
            multigraph: false,
            compound: false,
        }
    }
}
