//! Single-source shortest paths (Dijkstra, array-scan variant).
//!
//! Instead of a priority queue, every round scans the vertices in insertion
//! order for the white vertex with the strictly smallest tentative distance.
//! The chosen vertex is colored black and its outgoing edges are relaxed.
//!
//! Negative edge weights are neither detected nor supported: the sweep still
//! runs to completion but the reported distances are not meaningful, and the
//! parent links may form a cycle (see [`ShortestPaths::path_to`]).
//!
//! Path lengths are extended through [`PathWeight::checked_extend`]. For
//! integer weights a sum past the type's range is treated as "no
//! improvement", never as a wrapped or panicking addition.

use super::{output_buffer, select_min_white, state_table, Color, EntryIndex};
use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use core::borrow::Borrow;
use core::hash::Hash;
use num_traits::Zero;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Edge weight usable by [`shortest_paths`].
pub trait PathWeight: Copy + PartialOrd + Zero {
    /// Returns `self + weight`, or `None` if the sum is not representable.
    fn checked_extend(self, weight: Self) -> Option<Self>;
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {$(
        impl PathWeight for $t {
            #[inline]
            fn checked_extend(self, weight: Self) -> Option<Self> {
                self.checked_add(weight)
            }
        }
    )*};
}

macro_rules! impl_float_weight {
    ($($t:ty),*) => {$(
        impl PathWeight for $t {
            #[inline]
            fn checked_extend(self, weight: Self) -> Option<Self> {
                Some(self + weight)
            }
        }
    )*};
}

impl_integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_float_weight!(f32, f64);

/// Final state of one vertex reached by [`shortest_paths`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathVertex<K, W> {
    /// The vertex handle.
    pub vertex: VertexId,
    /// The vertex key.
    pub key: K,
    /// Always [`Color::Black`] for reported vertices.
    pub color: Color,
    /// Length of the shortest path from the start vertex.
    pub distance: W,
    /// Predecessor on that path; `None` for the start vertex.
    pub parent: Option<VertexId>,
}

/// Result of [`shortest_paths`]: one record per reachable vertex.
#[derive(Debug, Clone)]
pub struct ShortestPaths<K, W> {
    entries: Vec<PathVertex<K, W>>,
    index: EntryIndex,
}

impl<K, W> ShortestPaths<K, W> {
    /// Number of reachable vertices, start included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no vertex was reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in graph insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, PathVertex<K, W>> {
        self.entries.iter()
    }

    /// Records in graph insertion order.
    pub fn as_slice(&self) -> &[PathVertex<K, W>] {
        &self.entries
    }

    /// Consumes the result, returning the records.
    pub fn into_entries(self) -> Vec<PathVertex<K, W>> {
        self.entries
    }

    /// Record of the vertex `id`, if it was reached.
    pub fn by_id(&self, id: VertexId) -> Option<&PathVertex<K, W>> {
        self.index.get(id).map(|pos| &self.entries[pos])
    }

    /// Record of the vertex with this key, if it was reached.
    pub fn get<Q>(&self, key: &Q) -> Option<&PathVertex<K, W>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries.iter().find(|e| Borrow::<Q>::borrow(&e.key) == key)
    }

    /// Shortest distance to `key`.
    pub fn distance<Q>(&self, key: &Q) -> Option<W>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        W: Copy,
    {
        self.get(key).map(|e| e.distance)
    }

    /// Key of the predecessor of `key` on its shortest path.
    pub fn parent<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let parent = self.get(key)?.parent?;
        self.by_id(parent).map(|e| &e.key)
    }

    /// Vertices on the shortest path to `key`, start first.
    ///
    /// Follows parent links back to the start vertex. Returns `None` if `key`
    /// was not reached, or if the chain does not end at the start within
    /// [`len`](Self::len) steps, which only happens after negative weights
    /// have linked parents into a cycle.
    pub fn path_to<Q>(&self, key: &Q) -> Option<Vec<K>>
    where
        K: Borrow<Q> + Clone,
        Q: Eq + ?Sized,
    {
        let mut entry = self.get(key)?;
        let mut path = Vec::new();
        for _ in 0..self.entries.len() {
            path.push(entry.key.clone());
            match entry.parent {
                None => {
                    path.reverse();
                    return Some(path);
                }
                Some(p) => entry = self.by_id(p)?,
            }
        }
        None
    }
}

impl<'a, K, W> IntoIterator for &'a ShortestPaths<K, W> {
    type Item = &'a PathVertex<K, W>;
    type IntoIter = core::slice::Iter<'a, PathVertex<K, W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Computes shortest paths from `start` to every vertex reachable from it.
///
/// Runs at most `vertex_count` rounds. Each round finalizes the white vertex
/// with the strictly smallest distance (first in insertion order on a tie)
/// and relaxes its edges: if `distance(v) > distance(u) + w`, then `v` takes
/// the new distance and `u` as its parent. Unreachable vertices are never
/// finalized and are left out of the result.
///
/// The result lists finalized vertices in graph insertion order, not in
/// distance order.
///
/// A candidate `distance(u) + w` that overflows the weight type does not
/// relax `v`; a vertex reachable only through such sums is left out.
///
/// # Errors
/// - `NotFound` if `start` is not a vertex.
/// - `AllocationFailure` if a state table or the result cannot be allocated.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn shortest_paths<K, V, W, Q>(graph: &Graph<K, V, W>, start: &Q) -> Result<ShortestPaths<K, W>>
where
    K: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    W: PathWeight,
{
    let start = graph.find_vertex(start).ok_or(GraphError::NotFound)?;

    let bound = graph.slot_bound();
    let mut order = output_buffer(graph.vertex_count())?;
    order.extend(graph.vertex_ids());
    let mut color = state_table(bound, Color::White)?;
    let mut distance: Vec<Option<W>> = state_table(bound, None)?;
    let mut parent: Vec<Option<VertexId>> = state_table(bound, None)?;
    distance[start.index()] = Some(W::zero());

    for round in 0..graph.vertex_count() {
        let Some(u) = select_min_white(&order, &color, &distance) else {
            trace!(round, "no reachable white vertex left");
            break;
        };
        color[u.index()] = Color::Black;
        let Some(du) = distance[u.index()] else { break };
        trace!(round, vertex = %u, "vertex finalized");

        for (v, &w) in graph.adjacency(u) {
            let Some(candidate) = du.checked_extend(w) else {
                trace!(from = %u, to = %v, "candidate distance overflows");
                continue;
            };
            let improves = match distance[v.index()] {
                None => true,
                Some(dv) => dv > candidate,
            };
            if improves {
                distance[v.index()] = Some(candidate);
                parent[v.index()] = Some(u);
            }
        }
    }

    let mut entries = output_buffer(graph.vertex_count())?;
    for id in order {
        let i = id.index();
        if let (Color::Black, Some(d), Some(key)) = (color[i], distance[i], graph.key(id)) {
            entries.push(PathVertex {
                vertex: id,
                key: key.clone(),
                color: Color::Black,
                distance: d,
                parent: parent[i],
            });
        }
    }
    let index = EntryIndex::build(&entries, |e| e.vertex)?;

    Ok(ShortestPaths { entries, index })
}
