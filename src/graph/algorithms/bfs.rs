//! Breadth-first search.
//!
//! [`breadth_first`] computes hop counts from a start vertex with the
//! three-colour scheme; [`Bfs`] is a lazy iterator yielding vertices in
//! discovery order.

use super::{output_buffer, state_table, Color};
use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use core::borrow::Borrow;
use core::hash::Hash;
use std::collections::VecDeque;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final state of one vertex reached by [`breadth_first`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BfsVertex<K> {
    /// The vertex handle.
    pub vertex: VertexId,
    /// The vertex key.
    pub key: K,
    /// Always [`Color::Black`] for reported vertices.
    pub color: Color,
    /// Number of edges on a shortest unweighted path from the start.
    pub hops: usize,
}

/// Runs a breadth-first search from `start` and reports hop counts.
///
/// The start vertex is gray with zero hops, every other vertex white and
/// unreached. While the FIFO queue is non-empty, the front vertex's white
/// neighbours turn gray, get `hops(front) + 1` and are enqueued; then the
/// front is dequeued and turns black.
///
/// The result holds every reached vertex in graph insertion order, not in
/// discovery order. Unreached vertices are left out.
///
/// # Errors
/// - `NotFound` if `start` is not a vertex.
/// - `AllocationFailure` if the queue, a state table or the result cannot grow.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn breadth_first<K, V, E, Q>(graph: &Graph<K, V, E>, start: &Q) -> Result<Vec<BfsVertex<K>>>
where
    K: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    let start = graph.find_vertex(start).ok_or(GraphError::NotFound)?;

    let bound = graph.slot_bound();
    let mut color = state_table(bound, Color::White)?;
    let mut hops: Vec<Option<usize>> = state_table(bound, None)?;
    let mut queue = VecDeque::new();
    queue.try_reserve(graph.vertex_count())?;

    color[start.index()] = Color::Gray;
    hops[start.index()] = Some(0);
    queue.push_back(start);

    while let Some(&front) = queue.front() {
        let next_hops = hops[front.index()].map_or(0, |h| h + 1);
        for (v, _) in graph.adjacency(front) {
            if color[v.index()] == Color::White {
                color[v.index()] = Color::Gray;
                hops[v.index()] = Some(next_hops);
                queue.push_back(v);
            }
        }
        queue.pop_front();
        color[front.index()] = Color::Black;
        trace!(vertex = %front, queued = queue.len(), "vertex explored");
    }

    let mut out = output_buffer(graph.vertex_count())?;
    for id in graph.vertex_ids() {
        if let (Some(h), Some(key)) = (hops[id.index()], graph.key(id)) {
            out.push(BfsVertex {
                vertex: id,
                key: key.clone(),
                color: color[id.index()],
                hops: h,
            });
        }
    }
    Ok(out)
}

/// An iterator for breadth-first search.
///
/// Yields vertex handles in discovery order, starting with the start vertex.
pub struct Bfs<'g, K, V, E> {
    graph: &'g Graph<K, V, E>,
    visited: Vec<bool>,
    queue: VecDeque<VertexId>,
}

impl<'g, K, V, E> Bfs<'g, K, V, E>
where
    K: Eq + Hash + Clone,
{
    /// Creates a BFS iterator starting at `start`.
    ///
    /// Yields nothing if `start` does not name a vertex. Each vertex is queued
    /// at most once, so the queue is sized for every vertex up front.
    ///
    /// # Errors
    /// `AllocationFailure` if the visited table or the queue cannot be
    /// allocated.
    pub fn new(graph: &'g Graph<K, V, E>, start: VertexId) -> Result<Self> {
        let mut visited = state_table(graph.slot_bound(), false)?;
        let mut queue = VecDeque::new();
        queue.try_reserve(graph.vertex_count())?;

        if graph.key(start).is_some() {
            visited[start.index()] = true;
            queue.push_back(start);
        }

        Ok(Self {
            graph,
            visited,
            queue,
        })
    }
}

impl<K, V, E> Iterator for Bfs<'_, K, V, E>
where
    K: Eq + Hash + Clone,
{
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for (v, _) in self.graph.adjacency(u) {
            if !self.visited[v.index()] {
                self.visited[v.index()] = true;
                self.queue.push_back(v);
            }
        }

        Some(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph<u32> {
        // 0 -> 2 -> 1 -> 3, plus 0 -> 1
        let mut g = Graph::new();
        for k in 0..4 {
            g.insert_vertex(k, ()).unwrap();
        }
        g.insert_edge(&0, &2, ()).unwrap();
        g.insert_edge(&2, &1, ()).unwrap();
        g.insert_edge(&1, &3, ()).unwrap();
        g.insert_edge(&0, &1, ()).unwrap();
        g
    }

    #[test]
    fn test_hops_in_insertion_order() {
        let g = chain();
        let out = breadth_first(&g, &0).unwrap();
        let got: Vec<(u32, usize)> = out.iter().map(|v| (v.key, v.hops)).collect();
        assert_eq!(got, vec![(0, 0), (1, 1), (2, 1), (3, 2)]);
        assert!(out.iter().all(|v| v.color == Color::Black));
    }

    #[test]
    fn test_iterator_discovery_order() {
        let g = chain();
        let start = g.find_vertex(&0).unwrap();
        let keys: Vec<u32> = Bfs::new(&g, start).unwrap().map(|id| *g.key(id).unwrap()).collect();
        assert_eq!(keys, vec![0, 2, 1, 3]);
    }
}
