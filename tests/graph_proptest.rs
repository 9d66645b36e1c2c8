use ordgraph::algorithms::{depth_first, shortest_paths};
use ordgraph::{Graph, GraphError};
use petgraph::graph::NodeIndex;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
enum Operation {
    InsertVertex(u8),
    InsertEdge(u8, u8),
    RemoveEdge(u8, u8),
    RemoveVertex(u8),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0u8..16).prop_map(Operation::InsertVertex),
        (0u8..16, 0u8..16).prop_map(|(u, v)| Operation::InsertEdge(u, v)),
        (0u8..16, 0u8..16).prop_map(|(u, v)| Operation::RemoveEdge(u, v)),
        (0u8..16).prop_map(Operation::RemoveVertex),
    ]
}

proptest! {
    #[test]
    fn test_container_matches_model(ops in proptest::collection::vec(operation(), 1..200)) {
        let mut graph: Graph<u8, (), ()> = Graph::new();
        let mut vertices = BTreeSet::new();
        let mut edges = BTreeSet::new();

        for op in ops {
            match op {
                Operation::InsertVertex(k) => {
                    let res = graph.insert_vertex(k, ());
                    if vertices.insert(k) {
                        prop_assert!(res.is_ok());
                    } else {
                        prop_assert_eq!(res, Err(GraphError::Duplicate));
                    }
                }
                Operation::InsertEdge(u, v) => {
                    let res = graph.insert_edge(&u, &v, ());
                    if !vertices.contains(&u) || !vertices.contains(&v) {
                        prop_assert_eq!(res, Err(GraphError::MissingEndpoint));
                    } else if edges.insert((u, v)) {
                        prop_assert_eq!(res, Ok(()));
                    } else {
                        prop_assert_eq!(res, Err(GraphError::Duplicate));
                    }
                }
                Operation::RemoveEdge(u, v) => {
                    let res = graph.remove_edge(&u, &v);
                    if edges.remove(&(u, v)) {
                        prop_assert_eq!(res, Ok(()));
                    } else {
                        prop_assert_eq!(res, Err(GraphError::MissingEndpoint));
                    }
                }
                Operation::RemoveVertex(k) => {
                    let res = graph.remove_vertex(&k);
                    let touched = edges.iter().any(|&(u, v)| u == k || v == k);
                    if !vertices.contains(&k) {
                        prop_assert_eq!(res, Err(GraphError::NotFound));
                    } else if touched {
                        prop_assert_eq!(res, Err(GraphError::NotIsolated));
                    } else {
                        prop_assert_eq!(res, Ok((k, ())));
                        vertices.remove(&k);
                    }
                }
            }
        }

        prop_assert!(graph.validate_invariants());
        prop_assert_eq!(graph.vertex_count(), vertices.len());
        prop_assert_eq!(graph.edge_count(), edges.len());
        for &(u, v) in &edges {
            prop_assert!(graph.is_adjacent(&u, &v));
        }
    }

    #[test]
    fn test_dijkstra_matches_petgraph(
        n in 1usize..24,
        raw_edges in proptest::collection::vec((0usize..24, 0usize..24, 0u32..100), 0..80),
    ) {
        let mut graph: Graph<usize, (), u32> = Graph::new();
        let mut oracle = petgraph::Graph::<(), u32>::new();
        let nodes: Vec<NodeIndex> = (0..n).map(|_| oracle.add_node(())).collect();
        for k in 0..n {
            graph.insert_vertex(k, ()).unwrap();
        }
        for (u, v, w) in raw_edges {
            let (u, v) = (u % n, v % n);
            if graph.insert_edge(&u, &v, w).is_ok() {
                oracle.add_edge(nodes[u], nodes[v], w);
            }
        }

        let ours = shortest_paths(&graph, &0).unwrap();
        let expected = petgraph::algo::dijkstra(&oracle, nodes[0], None, |e| *e.weight());

        prop_assert_eq!(ours.len(), expected.len());
        for k in 0..n {
            prop_assert_eq!(ours.distance(&k), expected.get(&nodes[k]).copied());
        }
        for entry in &ours {
            if let Some(parent) = entry.parent {
                let parent_key = *graph.key(parent).unwrap();
                let w = *graph.find_edge(&parent_key, &entry.key).unwrap();
                prop_assert_eq!(ours.distance(&parent_key).map(|d| d + w), Some(entry.distance));
            }
        }
    }

    #[test]
    fn test_dfs_orders_random_dags(
        n in 1u16..40,
        raw_edges in proptest::collection::vec((0u16..40, 0u16..40), 0..120),
    ) {
        let mut graph: Graph<u16> = Graph::new();
        for k in 0..n {
            graph.insert_vertex(k, ()).unwrap();
        }
        // Edges only point from smaller to larger keys.
        let mut edges = Vec::new();
        for (a, b) in raw_edges {
            let (a, b) = (a % n, b % n);
            if a < b && graph.insert_edge(&a, &b, ()).is_ok() {
                edges.push((a, b));
            }
        }

        let order = depth_first(&graph).unwrap();
        prop_assert_eq!(order.len(), n as usize);
        let pos: HashMap<u16, usize> = order.iter().enumerate().map(|(i, v)| (v.key, i)).collect();
        prop_assert_eq!(pos.len(), n as usize);
        for (a, b) in edges {
            prop_assert!(pos[&a] < pos[&b]);
        }
    }
}
