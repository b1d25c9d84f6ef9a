//! Mutation event tests
//!
//! Listeners record what they see into shared logs so each test can assert
//! the exact payloads and their order.

use graphlib::*;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    NodeSet(String, Option<u32>, bool),
    NodeRemoved(String),
    EdgeSet(Edge, Option<u32>, bool),
    EdgeRemoved(Edge),
}

fn record(event: &GraphEvent<'_, u32, u32>) -> Seen {
    match *event {
        GraphEvent::NodeSet {
            id,
            value,
            is_update,
        } => Seen::NodeSet(id.to_string(), value.copied(), is_update),
        GraphEvent::NodeRemoved { id } => Seen::NodeRemoved(id.to_string()),
        GraphEvent::EdgeSet {
            edge,
            value,
            is_update,
        } => Seen::EdgeSet(edge.clone(), value.copied(), is_update),
        GraphEvent::EdgeRemoved { edge } => Seen::EdgeRemoved(edge.clone()),
    }
}

fn watched(options: GraphOptions) -> (Graph<u32, u32>, Rc<RefCell<Vec<Seen>>>) {
    let mut g: Graph<u32, u32> = Graph::new(options);
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let log = Rc::clone(&log);
        g.on(kind, move |event| log.borrow_mut().push(record(event)));
    }
    (g, log)
}

#[test]
fn test_node_events() {
    let (mut g, log) = watched(GraphOptions::default());
    g.set_node("a", Some(1));
    g.set_node("a", Some(2));
    g.set_node("a", None);
    g.remove_node("a");
    g.remove_node("a");

    assert_eq!(
        *log.borrow(),
        vec![
            Seen::NodeSet("a".into(), Some(1), false),
            Seen::NodeSet("a".into(), Some(2), true),
            Seen::NodeSet("a".into(), None, true),
            Seen::NodeRemoved("a".into()),
        ]
    );
}

#[test]
fn test_edge_creation_announces_endpoints_first() {
    let (mut g, log) = watched(GraphOptions::default());
    g.set_node("a", None);
    log.borrow_mut().clear();

    g.set_edge(("a", "b"), Some(5)).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![
            Seen::NodeSet("b".into(), None, false),
            Seen::EdgeSet(Edge::new("a", "b"), Some(5), false),
        ]
    );
}

#[test]
fn test_touch_is_silent_and_set_is_update() {
    let (mut g, log) = watched(GraphOptions::default());
    g.set_edge(("a", "b"), Some(1)).unwrap();
    log.borrow_mut().clear();

    g.ensure_edge(("a", "b")).unwrap();
    assert!(log.borrow().is_empty());

    g.set_edge(("a", "b"), None).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![Seen::EdgeSet(Edge::new("a", "b"), None, true)]
    );
}

#[test]
fn test_remove_node_cascade_order() {
    let (mut g, log) = watched(GraphOptions::new().directed(false));
    g.ensure_edge(("x", "hub")).unwrap();
    g.ensure_edge(("hub", "y")).unwrap();
    log.borrow_mut().clear();

    g.remove_node("hub");
    assert_eq!(
        *log.borrow(),
        vec![
            Seen::EdgeRemoved(Edge::new("hub", "x")),
            Seen::EdgeRemoved(Edge::new("hub", "y")),
            Seen::NodeRemoved("hub".into()),
        ]
    );
}

#[test]
fn test_failed_mutation_emits_nothing() {
    let (mut g, log) = watched(GraphOptions::default());
    assert!(g.set_edge(("a", "b", "name"), Some(1)).is_err());
    assert!(g.set_parent("a", "b").is_err());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_off_stops_delivery() {
    let mut g: Graph<u32, u32> = Graph::default();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let id = g.on(EventKind::SetNode, move |_| *counter.borrow_mut() += 1);
    assert_eq!(g.listener_count(EventKind::SetNode), 1);
    assert_eq!(g.listener_count(EventKind::SetEdge), 0);

    g.set_node("a", None);
    assert!(g.off(id));
    g.set_node("b", None);

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(g.listener_count(EventKind::SetNode), 0);
    assert!(!g.off(id));
}

#[test]
fn test_edge_event_payload() {
    let mut g: Graph<u32, u32> = Graph::new(GraphOptions::new().multigraph(true));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    g.on(EventKind::SetEdge, move |event| {
        if let Some(edge) = event.edge() {
            sink.borrow_mut().push((edge.to_string(), event.kind()));
        }
    });

    g.set_edge(("a", "b", "x"), Some(1)).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![("a -> b [x]".to_string(), EventKind::SetEdge)]
    );
}

#[test]
fn test_listener_panic_propagates() {
    let mut g: Graph<u32, u32> = Graph::default();
    g.on(EventKind::SetNode, |_| panic!("listener failed"));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        g.set_node("a", None);
    }));
    assert!(result.is_err());
    // The mutation was applied before the listener ran
    assert!(g.has_node("a"));
}
