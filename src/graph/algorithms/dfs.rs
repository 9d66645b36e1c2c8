//! Depth-first search over every component of the graph.
//!
//! The visit is driven by an explicit stack of `(vertex, remaining edges)`
//! frames, so component size is bounded by heap memory rather than the native
//! call stack. The frames reproduce the visitation order of the recursive
//! formulation exactly.

use super::{state_table, Color};
use crate::collections::ordered_seq::OrderedSeq;
use crate::error::{GraphError, Result};
use crate::graph::container::Adjacency;
use crate::graph::{Graph, VertexId};
use core::hash::Hash;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One vertex reported by [`depth_first`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DfsVertex<K> {
    /// The vertex handle.
    pub vertex: VertexId,
    /// The vertex key.
    pub key: K,
    /// Always [`Color::Black`] for reported vertices.
    pub color: Color,
}

/// Visits every vertex and returns them in reverse order of completion.
///
/// Roots are taken in insertion order among still-white vertices. A vertex
/// turns gray when entered and black once all of its edges are explored; at
/// that moment it is inserted at the head of the result. On an acyclic graph
/// the result is therefore a topological order.
///
/// # Errors
/// `AllocationFailure` if a state table, the frame stack or the result
/// cannot grow.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn depth_first<K, V, E>(graph: &Graph<K, V, E>) -> Result<Vec<DfsVertex<K>>>
where
    K: Eq + Hash + Clone,
{
    let finished = finish_order(graph, false)?;
    let mut out = Vec::new();
    out.try_reserve_exact(finished.len())?;
    for id in finished.iter().copied() {
        if let Some(key) = graph.key(id) {
            out.push(DfsVertex {
                vertex: id,
                key: key.clone(),
                color: Color::Black,
            });
        }
    }
    Ok(out)
}

/// Orders the keys so that every edge points from an earlier to a later key.
///
/// # Errors
/// - `Cycle` if an edge reaches a vertex that is still being explored.
/// - `AllocationFailure` if a state table, the frame stack or the result
///   cannot grow.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn topological_sort<K, V, E>(graph: &Graph<K, V, E>) -> Result<Vec<K>>
where
    K: Eq + Hash + Clone,
{
    let finished = finish_order(graph, true)?;
    let mut out = Vec::new();
    out.try_reserve_exact(finished.len())?;
    out.extend(finished.iter().filter_map(|&id| graph.key(id).cloned()));
    Ok(out)
}

/// Runs the DFS sweep, head-inserting each vertex as it turns black.
///
/// With `reject_cycles`, an edge into a gray vertex aborts with `Cycle`.
fn finish_order<K, V, E>(graph: &Graph<K, V, E>, reject_cycles: bool) -> Result<OrderedSeq<VertexId>>
where
    K: Eq + Hash + Clone,
{
    let mut color = state_table(graph.slot_bound(), Color::White)?;
    let mut finished = OrderedSeq::new();
    finished.try_reserve(graph.vertex_count())?;
    let mut stack: Vec<(VertexId, Adjacency<'_, E>)> = Vec::new();

    for root in graph.vertex_ids() {
        if color[root.index()] != Color::White {
            continue;
        }
        trace!(root = %root, "component visit started");
        color[root.index()] = Color::Gray;
        stack.try_reserve(1)?;
        stack.push((root, graph.adjacency(root)));

        loop {
            let Some((u, edges)) = stack.last_mut() else { break };
            let u = *u;
            match edges.next() {
                Some((v, _)) => match color[v.index()] {
                    Color::White => {
                        color[v.index()] = Color::Gray;
                        stack.try_reserve(1)?;
                        stack.push((v, graph.adjacency(v)));
                    }
                    Color::Gray if reject_cycles => {
                        debug!(from = %u, to = %v, "back edge found");
                        return Err(GraphError::Cycle);
                    }
                    _ => {}
                },
                None => {
                    stack.pop();
                    color[u.index()] = Color::Black;
                    finished.try_push_front(u)?;
                }
            }
        }
    }

    Ok(finished)
}

/// An iterator for depth-first search.
///
/// Yields vertex handles in preorder (the order they turn gray), following
/// edges in insertion order, starting with the start vertex. Only the
/// component reachable from the start is visited.
pub struct Dfs<'g, K, V, E> {
    graph: &'g Graph<K, V, E>,
    visited: Vec<bool>,
    stack: Vec<(VertexId, Adjacency<'g, E>)>,
    pending: Option<VertexId>,
}

impl<'g, K, V, E> Dfs<'g, K, V, E>
where
    K: Eq + Hash + Clone,
{
    /// Creates a DFS iterator starting at `start`.
    ///
    /// Yields nothing if `start` does not name a vertex. The visited table
    /// and the frame stack are allocated up front, so iteration never grows
    /// them.
    ///
    /// # Errors
    /// `AllocationFailure` if the visited table or the frame stack cannot be
    /// allocated.
    pub fn new(graph: &'g Graph<K, V, E>, start: VertexId) -> Result<Self> {
        let mut visited = state_table(graph.slot_bound(), false)?;
        let mut stack = Vec::new();
        stack.try_reserve_exact(graph.vertex_count())?;
        let mut pending = None;

        if graph.key(start).is_some() {
            visited[start.index()] = true;
            stack.push((start, graph.adjacency(start)));
            pending = Some(start);
        }

        Ok(Self {
            graph,
            visited,
            stack,
            pending,
        })
    }
}

impl<K, V, E> Iterator for Dfs<'_, K, V, E>
where
    K: Eq + Hash + Clone,
{
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.pending.take() {
            return Some(start);
        }

        while let Some((_, edges)) = self.stack.last_mut() {
            match edges.next() {
                Some((v, _)) if !self.visited[v.index()] => {
                    self.visited[v.index()] = true;
                    self.stack.push((v, self.graph.adjacency(v)));
                    return Some(v);
                }
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
