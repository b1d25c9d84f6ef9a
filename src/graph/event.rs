//! Graph mutation events
//!
//! Every successful mutation is announced synchronously, after it has fully
//! applied, to the listeners registered for that kind of event. Listeners
//! receive borrowed payloads and run to completion before the mutator
//! returns; a panicking listener unwinds through the mutator that fired it.

use super::edge::Edge;
use super::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names the four kinds of mutation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    SetNode,
    RemoveNode,
    SetEdge,
    RemoveEdge,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::SetNode,
        EventKind::RemoveNode,
        EventKind::SetEdge,
        EventKind::RemoveEdge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SetNode => "setNode",
            EventKind::RemoveNode => "removeNode",
            EventKind::SetEdge => "setEdge",
            EventKind::RemoveEdge => "removeEdge",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post-mutation payload handed to listeners
///
/// `is_update` is false when the node or edge was just created and true when
/// an existing one had its value replaced.
#[derive(Debug)]
pub enum GraphEvent<'a, N, E> {
    NodeSet {
        id: &'a NodeId,
        value: Option<&'a N>,
        is_update: bool,
    },
    NodeRemoved {
        id: &'a NodeId,
    },
    EdgeSet {
        edge: &'a Edge,
        value: Option<&'a E>,
        is_update: bool,
    },
    EdgeRemoved {
        edge: &'a Edge,
    },
}

// Manual impls: the payload only borrows, so N and E need not be Clone.
impl<N, E> Clone for GraphEvent<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for GraphEvent<'_, N, E> {}

impl<'a, N, E> GraphEvent<'a, N, E> {
    pub fn kind(&self) -> EventKind {
        match self {
            GraphEvent::NodeSet { .. } => EventKind::SetNode,
            GraphEvent::NodeRemoved { .. } => EventKind::RemoveNode,
            GraphEvent::EdgeSet { .. } => EventKind::SetEdge,
            GraphEvent::EdgeRemoved { .. } => EventKind::RemoveEdge,
        }
    }

    /// The node this event is about, if it is a node event
    pub fn node(&self) -> Option<&'a NodeId> {
        match *self {
            GraphEvent::NodeSet { id, .. } | GraphEvent::NodeRemoved { id } => Some(id),
            _ => None,
        }
    }

    /// The edge this event is about, if it is an edge event
    pub fn edge(&self) -> Option<&'a Edge> {
        match *self {
            GraphEvent::EdgeSet { edge, .. } | GraphEvent::EdgeRemoved { edge } => Some(edge),
            _ => None,
        }
    }

    pub fn is_update(&self) -> bool {
        match *self {
            GraphEvent::NodeSet { is_update, .. } | GraphEvent::EdgeSet { is_update, .. } => {
                is_update
            }
            _ => false,
        }
    }
}

/// Handle returned by listener registration, used to remove the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<N, E> = Box<dyn FnMut(&GraphEvent<'_, N, E>)>;

/// Listener registry and synchronous dispatcher
pub struct Notifier<N, E> {
    listeners: Vec<(ListenerId, EventKind, Listener<N, E>)>,
    next_id: u64,
}

impl<N, E> Notifier<N, E> {
    pub fn new() -> Self {
        Notifier {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Register `handler` for events of `kind`. Listeners of one kind run in
    /// registration order.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&GraphEvent<'_, N, E>) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, Box::new(handler)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _, _)| *listener != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: &GraphEvent<'_, N, E>) {
        let kind = event.kind();
        for (_, listens_to, handler) in self.listeners.iter_mut() {
            if *listens_to == kind {
                handler(event);
            }
        }
    }
}

impl<N, E> Default for Notifier<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> fmt::Debug for Notifier<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
