//! Classical graph algorithms over [`Graph`](crate::graph::Graph).
//!
//! Every algorithm keeps its per-vertex state (color, distance/key/hops,
//! parent) in tables indexed by [`VertexId::index`], separate from the edge
//! weights stored in the graph, and returns a freshly built result. Parent
//! links are plain [`VertexId`] handles, never owning pointers.
//!
//! All sweeps scan vertices in graph insertion order, so ties are always
//! broken in favour of the vertex inserted first.
//!
//! | Algorithm | Entry point | Complexity |
//! |-----------|-------------|------------|
//! | Dijkstra | [`shortest_paths`] | \(O(V^2 + E)\) |
//! | Prim | [`minimum_spanning_tree`] | \(O(V^2 + E)\) |
//! | Nearest-neighbour TSP | [`nearest_neighbor_tour`] | \(O(V^2)\) |
//! | BFS | [`breadth_first`] | \(O(V + E)\) |
//! | DFS | [`depth_first`], [`topological_sort`] | \(O(V + E)\) |

pub mod bfs;
pub mod dfs;
pub mod shortest_path;
pub mod spanning_tree;
pub mod tsp;

pub use bfs::{breadth_first, Bfs, BfsVertex};
pub use dfs::{depth_first, topological_sort, Dfs, DfsVertex};
pub use shortest_path::{shortest_paths, PathVertex, PathWeight, ShortestPaths};
pub use spanning_tree::{minimum_spanning_tree, SpanningTree, TreeVertex};
pub use tsp::{nearest_neighbor_tour, Tour, TourStop, TspPoint};

use crate::error::Result;
use crate::graph::VertexId;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Traversal state of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    /// Not yet discovered (or, for the O(V^2) sweeps, not yet finalized).
    #[default]
    White,
    /// Discovered, still being explored.
    Gray,
    /// Finished.
    Black,
}

/// Allocates a per-vertex state table of `len` copies of `init`.
pub(crate) fn state_table<T: Clone>(len: usize, init: T) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table.try_reserve_exact(len)?;
    table.resize(len, init);
    Ok(table)
}

/// Allocates an empty output buffer able to hold `len` records without growing.
pub(crate) fn output_buffer<T>(len: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    Ok(out)
}

/// Picks the white vertex with the strictly smallest finite score.
///
/// Vertices are scanned in `order`; the first one wins a tie. A vertex whose
/// score is `None` (infinite) is never picked.
pub(crate) fn select_min_white<W>(
    order: &[VertexId],
    color: &[Color],
    score: &[Option<W>],
) -> Option<VertexId>
where
    W: PartialOrd + Copy,
{
    let mut best: Option<(VertexId, W)> = None;
    for &id in order {
        if color[id.index()] != Color::White {
            continue;
        }
        let Some(s) = score[id.index()] else { continue };
        let better = match best {
            None => true,
            Some((_, b)) => s < b,
        };
        if better {
            best = Some((id, s));
        }
    }
    best.map(|(id, _)| id)
}

/// Position of each vertex's record inside a result vector.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntryIndex {
    positions: HashMap<VertexId, usize>,
}

impl EntryIndex {
    pub(crate) fn build<T>(entries: &[T], id_of: impl Fn(&T) -> VertexId) -> Result<Self> {
        let mut positions = HashMap::new();
        positions.try_reserve(entries.len())?;
        for (pos, entry) in entries.iter().enumerate() {
            positions.insert(id_of(entry), pos);
        }
        Ok(Self { positions })
    }

    #[inline]
    pub(crate) fn get(&self, id: VertexId) -> Option<usize> {
        self.positions.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_select_min_white_prefers_first_on_tie() {
        let mut g: Graph<u8> = Graph::new();
        let ids: Vec<_> = (0..3).map(|k| g.insert_vertex(k, ()).unwrap()).collect();
        let color = vec![Color::White; 3];
        let score = vec![Some(5), Some(2), Some(2)];
        assert_eq!(select_min_white(&ids, &color, &score), Some(ids[1]));
    }

    #[test]
    fn test_select_min_white_skips_black_and_infinite() {
        let mut g: Graph<u8> = Graph::new();
        let ids: Vec<_> = (0..3).map(|k| g.insert_vertex(k, ()).unwrap()).collect();
        let color = vec![Color::Black, Color::White, Color::White];
        let score = vec![Some(0), None, Some(9)];
        assert_eq!(select_min_white(&ids, &color, &score), Some(ids[2]));

        let score: Vec<Option<i32>> = vec![Some(0), None, None];
        assert_eq!(select_min_white(&ids, &color, &score), None);
    }
}
