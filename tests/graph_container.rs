use ordgraph::{Graph, GraphError};

fn keyed(keys: &[&'static str]) -> Graph<&'static str, usize, u32> {
    let mut g = Graph::new();
    for (i, k) in keys.iter().enumerate() {
        g.insert_vertex(*k, i).unwrap();
    }
    g
}

#[test]
fn insert_then_find_returns_equal_data() {
    let mut g = keyed(&["a", "b"]);
    let id = g.insert_vertex("c", 42).unwrap();
    assert_eq!(g.find_vertex("c"), Some(id));
    assert_eq!(g.key(id), Some(&"c"));
    assert_eq!(g.value(id), Some(&42));
}

#[test]
fn duplicate_vertex_is_rejected_without_overwrite() {
    let mut g = keyed(&["a", "b"]);
    assert_eq!(g.insert_vertex("a", 99), Err(GraphError::Duplicate));
    assert_eq!(g.vertex_count(), 2);
    let a = g.find_vertex("a").unwrap();
    assert_eq!(g.value(a), Some(&0));
}

#[test]
fn edge_insertion_counts_and_rejects_duplicates() {
    let mut g = keyed(&["a", "b", "c"]);
    g.insert_edge("a", "b", 7).unwrap();
    assert!(g.is_adjacent("a", "b"));
    assert!(!g.is_adjacent("b", "a"));
    assert_eq!(g.edge_count(), 1);

    assert_eq!(g.insert_edge("a", "b", 8), Err(GraphError::Duplicate));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.find_edge("a", "b"), Some(&7));
}

#[test]
fn edge_with_missing_endpoint_is_rejected() {
    let mut g = keyed(&["a"]);
    assert_eq!(g.insert_edge("a", "zz", 1), Err(GraphError::MissingEndpoint));
    assert_eq!(g.insert_edge("zz", "a", 1), Err(GraphError::MissingEndpoint));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn remove_vertex_requires_isolation() {
    let mut g = keyed(&["a", "b", "c"]);
    g.insert_edge("a", "b", 1).unwrap();

    // Source side.
    assert_eq!(g.is_isolated("a"), Ok(false));
    assert_eq!(g.remove_vertex("a"), Err(GraphError::NotIsolated));
    // Target side: no outgoing edges but still referenced.
    assert_eq!(g.is_isolated("b"), Ok(false));
    assert_eq!(g.remove_vertex("b"), Err(GraphError::NotIsolated));
    assert_eq!(g.vertex_count(), 3);
    assert_eq!(g.edge_count(), 1);

    assert_eq!(g.is_isolated("c"), Ok(true));
    assert_eq!(g.remove_vertex("c"), Ok(("c", 2)));
    assert_eq!(g.find_vertex("c"), None);

    assert_eq!(g.remove_edge("a", "b"), Ok(1));
    assert_eq!(g.remove_vertex("b"), Ok(("b", 1)));
    assert_eq!(g.remove_vertex("a"), Ok(("a", 0)));
    assert!(g.is_empty());
}

#[test]
fn remove_missing_vertex_or_edge() {
    let mut g = keyed(&["a", "b"]);
    assert_eq!(g.remove_vertex("zz"), Err(GraphError::NotFound));
    assert_eq!(g.is_isolated("zz"), Err(GraphError::NotFound));
    assert_eq!(g.remove_edge("a", "b"), Err(GraphError::MissingEndpoint));
    assert_eq!(g.remove_edge("a", "zz"), Err(GraphError::MissingEndpoint));
}

#[test]
fn undirected_edge_is_two_directed_edges() {
    let mut g = keyed(&["a", "b"]);
    g.insert_undirected_edge("a", "b", 5).unwrap();
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.find_edge("b", "a"), Some(&5));

    g.insert_undirected_edge("a", "a", 1).unwrap();
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn traversal_follows_insertion_order() {
    let mut g = keyed(&["x", "y", "z"]);
    g.insert_edge("y", "z", 2).unwrap();
    g.insert_edge("y", "x", 1).unwrap();
    g.insert_edge("x", "y", 3).unwrap();

    let mut vertices = Vec::new();
    g.for_each_vertex(|k, v| vertices.push((*k, *v)));
    assert_eq!(vertices, vec![("x", 0), ("y", 1), ("z", 2)]);

    let mut edges = Vec::new();
    g.for_each_edge(|from, to, w| edges.push((*from, *to, *w)));
    assert_eq!(edges, vec![("x", "y", 3), ("y", "z", 2), ("y", "x", 1)]);
}

#[test]
fn value_mut_updates_payload() {
    let mut g = keyed(&["a"]);
    let a = g.find_vertex("a").unwrap();
    *g.value_mut(a).unwrap() += 10;
    assert_eq!(g.value(a), Some(&10));
}

#[test]
fn owned_keys_are_found_by_borrowed_form() {
    let mut g: Graph<String> = Graph::new();
    g.insert_vertex("alpha".to_string(), ()).unwrap();
    g.insert_vertex("beta".to_string(), ()).unwrap();
    g.insert_edge("alpha", "beta", ()).unwrap();
    assert!(g.contains_vertex("alpha"));
    assert!(g.is_adjacent("alpha", "beta"));
}

#[test]
fn clear_empties_everything() {
    let mut g = keyed(&["a", "b"]);
    g.insert_edge("a", "b", 1).unwrap();
    g.clear();
    assert_eq!(g.vertex_count(), 0);
    assert_eq!(g.edge_count(), 0);
    assert!(g.validate_invariants());
}
