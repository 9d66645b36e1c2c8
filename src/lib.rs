//! # `ordgraph` - Ordered Graph Toolkit
//!
//! A key-addressed directed graph whose vertices and adjacency lists keep
//! their insertion order, plus the classical \(O(V^2)\) algorithms built on
//! top of it.
//!
//! ## Architecture
//!
//! 1. **Ordered sequences** ([`OrderedSeq`]):
//!    - Arena-backed singly linked lists with free-slot reuse
//!    - Stable [`Cursor`] handles, insert-after / remove-after
//!
//! 2. **Graph container** ([`Graph`]):
//!    - Vertices identified by a key type's `Eq + Hash`
//!    - Lookups by any borrowed form of the key
//!    - Duplicate vertices and edges are rejected, never overwritten
//!    - A vertex can only be removed once it is isolated
//!
//! 3. **Algorithms** ([`graph::algorithms`]):
//!    - Dijkstra shortest paths and Prim spanning trees by array scan
//!    - Nearest-neighbour travelling-salesman tour over plane points
//!    - Breadth-first hop counts and multi-component depth-first ordering
//!
//! Per-run vertex state (color, distance, parent) lives in side tables owned
//! by the algorithm, never in the graph. Parent links are [`VertexId`]
//! handles. Ties are broken by insertion order everywhere.
//!
//! ## Logging
//!
//! Mutations and algorithm runs emit `tracing` events and spans. The crate
//! never installs a subscriber.
//!
//! ## Example
//!
//! ```rust
//! use ordgraph::{algorithms::shortest_paths, Graph};
//!
//! let mut g: Graph<&str, (), u32> = Graph::new();
//! for k in ["a", "b", "c"] {
//!     g.insert_vertex(k, ()).unwrap();
//! }
//! g.insert_edge("a", "b", 4).unwrap();
//! g.insert_edge("a", "c", 1).unwrap();
//! g.insert_edge("c", "b", 2).unwrap();
//!
//! let paths = shortest_paths(&g, "a").unwrap();
//! assert_eq!(paths.distance("b"), Some(3));
//! assert_eq!(paths.path_to("b"), Some(vec!["a", "c", "b"]));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod error;
pub mod graph;

pub use collections::{Cursor, OrderedSeq};
pub use error::{GraphError, Result};
pub use graph::algorithms;
pub use graph::algorithms::Color;
pub use graph::{Disposed, EdgeRef, Graph, VertexId, VertexRef};

const _: () = {
    use core::mem;

    // Handles are plain indices.
    assert!(mem::size_of::<VertexId>() == mem::size_of::<usize>());
    assert!(mem::size_of::<Cursor>() == mem::size_of::<usize>());
    assert!(mem::size_of::<Option<VertexId>>() <= 2 * mem::size_of::<usize>());
};
