//! The key-addressed directed graph and the algorithms built on it.
//!
//! - [`Graph`]: insertion-ordered vertices, each owning its adjacency list
//! - [`algorithms`]: shortest paths, spanning tree, TSP heuristic, BFS, DFS

pub mod algorithms;
pub(crate) mod container;
mod invariant;

pub use container::{Disposed, EdgeRef, Graph, VertexId, VertexRef};
