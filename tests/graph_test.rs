//! End-to-end tests for the node, edge and adjacency operations
//!
//! Covers the directed, undirected and multigraph modes together with
//! self-loops and removal bookkeeping.

use graphlib::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn ids<'a>(iter: impl Iterator<Item = &'a NodeId>) -> Vec<&'a str> {
    iter.map(NodeId::as_str).collect()
}

#[test]
fn test_directed_scenario() {
    init_tracing();
    let mut g: Graph = Graph::default();
    for node in ["a", "b", "c", "d", "e"] {
        g.set_node(node, None);
    }
    for (v, w) in [("a", "b"), ("b", "c"), ("d", "e"), ("e", "b")] {
        g.ensure_edge((v, w)).unwrap();
    }

    let in_edges: Vec<&Edge> = g.in_edges("b", None).collect();
    assert_eq!(in_edges, vec![&Edge::new("a", "b"), &Edge::new("e", "b")]);
    assert_eq!(ids(g.successors("b")), vec!["c"]);

    let mut neighbors = ids(g.neighbors("b"));
    neighbors.sort();
    assert_eq!(neighbors, vec!["a", "c", "e"]);

    assert!(!g.has_edge(("b", "a")));
    assert_eq!(ids(g.sources()), vec!["a", "d"]);
    assert_eq!(ids(g.sinks()), vec!["c"]);
}

#[test]
fn test_property_values() {
    let mut g: Graph = Graph::default();
    let person: PropertyValue = [
        ("name", PropertyValue::from("Alice")),
        ("age", PropertyValue::from(30i64)),
    ]
    .into_iter()
    .collect();

    g.set_node("alice", Some(person));
    g.set_edge(("alice", "bob"), Some(PropertyValue::from(0.5))).unwrap();

    let alice = g.node("alice").unwrap();
    assert_eq!(alice.get("name").and_then(PropertyValue::as_str), Some("Alice"));
    assert_eq!(alice.get("age").and_then(PropertyValue::as_integer), Some(30));
    assert_eq!(g.node("bob"), None);
    assert!(g.has_node("bob"));
    assert_eq!(
        g.edge(("alice", "bob")).and_then(PropertyValue::as_float),
        Some(0.5)
    );
}

#[test]
fn test_undirected_symmetry() {
    init_tracing();
    let mut g: Graph<(), &str> = Graph::new(GraphOptions::new().directed(false));
    g.set_edge(("b", "a"), Some("ab")).unwrap();
    g.set_edge(("c", "d"), Some("cd")).unwrap();

    for (v, w) in [("a", "b"), ("c", "d"), ("a", "c")] {
        assert_eq!(g.has_edge((v, w)), g.has_edge((w, v)));
        assert_eq!(g.edge((v, w)), g.edge((w, v)));
    }
    assert_eq!(g.edge(("a", "b")), Some(&"ab"));

    // Updating through the reversed pair hits the same edge
    g.set_edge(("a", "b"), Some("updated")).unwrap();
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.edge(("b", "a")), Some(&"updated"));

    assert_eq!(g.node_edges("a", None).count(), 1);
    assert_eq!(g.node_edges("b", None).count(), 1);
    assert_eq!(ids(g.neighbors("a")), vec!["b"]);
    assert_eq!(ids(g.neighbors("b")), vec!["a"]);
    assert!(!g.is_leaf("a"));
}

#[test]
fn test_directed_is_not_symmetric() {
    let mut g: Graph<(), ()> = Graph::default();
    g.ensure_edge(("a", "b")).unwrap();
    assert!(g.has_edge(("a", "b")));
    assert!(!g.has_edge(("b", "a")));
}

#[test]
fn test_multigraph_parallel_edges() {
    let mut g: Graph<(), u32> = Graph::new(GraphOptions::new().multigraph(true));
    g.set_edge(("v", "w", "a"), Some(1)).unwrap();
    g.set_edge(("v", "w", "b"), Some(2)).unwrap();
    g.ensure_edge(("v", "w")).unwrap();

    assert_eq!(g.edge(("v", "w", "a")), Some(&1));
    assert_eq!(g.edge(("v", "w", "b")), Some(&2));
    assert_eq!(g.edge(("v", "w")), None);
    assert_eq!(g.node_edges("v", None).count(), 3);
    assert_eq!(g.out_edges("v", Some("w")).count(), 3);
    assert_eq!(g.in_edges("w", None).count(), 3);
    assert_eq!(ids(g.successors("v")), vec!["w"]);

    let names: Vec<Option<&str>> = g.edges().map(Edge::name).collect();
    assert_eq!(names, vec![Some("a"), Some("b"), None]);
}

#[test]
fn test_multigraph_self_loops() {
    let mut g: Graph<(), &str> = Graph::new(GraphOptions::new().multigraph(true));
    g.ensure_edge(("a", "b")).unwrap();
    g.set_edge(("b", "b", "first"), Some("first")).unwrap();
    g.set_edge(("b", "b", "second"), Some("second")).unwrap();

    assert_eq!(g.in_edges("b", None).count(), 3);
    assert_eq!(ids(g.predecessors("b")), vec!["a", "b"]);
    assert_eq!(ids(g.successors("b")), vec!["b"]);
    assert_eq!(ids(g.neighbors("b")), vec!["a", "b"]);

    g.remove_edge(("b", "b", "first"));
    assert_eq!(ids(g.predecessors("b")), vec!["a", "b"]);
    g.remove_edge(("b", "b", "second"));
    assert_eq!(ids(g.predecessors("b")), vec!["a"]);
    assert!(g.is_leaf("b"));
}

#[test]
fn test_named_edge_rejected_without_multigraph() {
    let mut g: Graph<(), ()> = Graph::default();
    let err = g.ensure_edge(("a", "b", "name")).unwrap_err();
    assert!(matches!(err, GraphError::InvalidMultiEdge { .. }));
    assert_eq!(
        err.to_string(),
        "Cannot set named edge a -> b [name] when multigraph = false"
    );
    assert!(!g.has_node("a"));

    // Unnamed and explicitly unnamed forms are fine
    g.ensure_edge(("a", "b", None::<&str>)).unwrap();
    assert!(g.has_edge(("a", "b")));
}

#[test]
fn test_remove_node_drops_degree_many_edges() {
    init_tracing();
    let mut g: Graph<(), ()> = Graph::new(GraphOptions::new().multigraph(true));
    g.ensure_edge(("a", "hub")).unwrap();
    g.ensure_edge(("b", "hub")).unwrap();
    g.ensure_edge(("hub", "c")).unwrap();
    g.ensure_edge(("hub", "c", "twice")).unwrap();
    g.ensure_edge(("hub", "hub")).unwrap();
    g.ensure_edge(("a", "c")).unwrap();

    let degree = g.in_edges("hub", None).count() + g.out_edges("hub", None).count() - 1;
    let before = g.edge_count();
    assert!(g.remove_node("hub"));
    assert_eq!(g.edge_count(), before - degree);

    assert_eq!(ids(g.successors("a")), vec!["c"]);
    assert_eq!(ids(g.predecessors("c")), vec!["a"]);
    assert_eq!(g.edges().cloned().collect::<Vec<_>>(), vec![Edge::new("a", "c")]);
}

#[test]
fn test_removal_counts_decrease_by_one() {
    let mut g: Graph<(), ()> = Graph::new(GraphOptions::new().multigraph(true));
    g.ensure_edge(("a", "b", "x")).unwrap();
    g.ensure_edge(("a", "b", "y")).unwrap();

    assert!(g.remove_edge(("a", "b", "x")));
    assert_eq!(ids(g.successors("a")), vec!["b"]);
    assert!(!g.remove_edge(("a", "b", "x")));
    assert!(g.remove_edge(("a", "b", "y")));
    assert_eq!(g.successors("a").count(), 0);
    assert_eq!(g.predecessors("b").count(), 0);
    assert!(g.has_node("a"));
    assert!(g.has_node("b"));
}

#[test]
fn test_descriptors_address_edges() {
    let mut g: Graph<(), u32> = Graph::new(GraphOptions::new().multigraph(true).directed(false));
    g.set_edge(("z", "a", "n"), Some(7)).unwrap();

    let edge = g.edges().next().cloned().unwrap();
    assert_eq!(edge, Edge::named("a", "z", "n"));
    assert_eq!(g.edge(&edge), Some(&7));

    if let Some(value) = g.edge_mut(&edge) {
        *value = 8;
    }
    assert_eq!(g.edge(("z", "a", "n")), Some(&8));
    assert!(g.remove_edge(&edge));
    assert!(!g.has_edge(("a", "z", "n")));
}

#[test]
fn test_set_path_touch_keeps_values() {
    let mut g: Graph<(), u32> = Graph::default();
    g.set_edge(("a", "b"), Some(1)).unwrap();
    g.set_path(&["a", "b", "c", "d"], None);

    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.edge(("a", "b")), Some(&1));
    assert_eq!(g.edge(("c", "d")), None);
    assert_eq!(ids(g.nodes()), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_options_from_json() {
    let options: GraphOptions =
        serde_json::from_str(r#"{"directed": false, "multigraph": true}"#).unwrap();
    let g: Graph<(), ()> = Graph::new(options);
    assert!(!g.is_directed());
    assert!(g.is_multigraph());
    assert!(!g.is_compound());
    assert_eq!(g.options(), options);
}

#[test]
fn test_edges_serialize() {
    let mut g: Graph<(), ()> = Graph::new(GraphOptions::new().multigraph(true));
    g.ensure_edge(("a", "b")).unwrap();
    g.ensure_edge(("a", "b", "x")).unwrap();

    let edges: Vec<&Edge> = g.edges().collect();
    assert_eq!(
        serde_json::to_string(&edges).unwrap(),
        r#"[{"v":"a","w":"b"},{"v":"a","w":"b","name":"x"}]"#
    );
}
