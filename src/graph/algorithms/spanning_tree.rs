//! Minimum spanning tree (Prim, array-scan variant).
//!
//! The sweep mirrors [`shortest_paths`](super::shortest_paths): each round
//! finalizes the white vertex with the strictly smallest key. The update rule
//! differs: a white neighbour takes the edge weight itself as its new key
//! when that weight is smaller, with no accumulation along the path.
//!
//! The graph should model an undirected graph (every edge present in both
//! directions, see [`Graph::insert_undirected_edge`]).

use super::{output_buffer, select_min_white, state_table, Color, EntryIndex};
use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use core::borrow::Borrow;
use core::hash::Hash;
use num_traits::Zero;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final state of one vertex spanned by [`minimum_spanning_tree`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeVertex<K, W> {
    /// The vertex handle.
    pub vertex: VertexId,
    /// The vertex key.
    pub key: K,
    /// Always [`Color::Black`] for reported vertices.
    pub color: Color,
    /// Weight of the tree edge connecting this vertex to its parent
    /// (zero for the root).
    pub weight: W,
    /// The other end of the tree edge; `None` for the root.
    pub parent: Option<VertexId>,
}

/// Result of [`minimum_spanning_tree`].
#[derive(Debug, Clone)]
pub struct SpanningTree<K, W> {
    entries: Vec<TreeVertex<K, W>>,
    index: EntryIndex,
}

impl<K, W> SpanningTree<K, W> {
    /// Number of spanned vertices, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no vertex was spanned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in graph insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, TreeVertex<K, W>> {
        self.entries.iter()
    }

    /// Records in graph insertion order.
    pub fn as_slice(&self) -> &[TreeVertex<K, W>] {
        &self.entries
    }

    /// Consumes the result, returning the records.
    pub fn into_entries(self) -> Vec<TreeVertex<K, W>> {
        self.entries
    }

    /// Record of the vertex `id`, if it was spanned.
    pub fn by_id(&self, id: VertexId) -> Option<&TreeVertex<K, W>> {
        self.index.get(id).map(|pos| &self.entries[pos])
    }

    /// Record of the vertex with this key, if it was spanned.
    pub fn get<Q>(&self, key: &Q) -> Option<&TreeVertex<K, W>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries.iter().find(|e| Borrow::<Q>::borrow(&e.key) == key)
    }

    /// Tree edges as `(parent key, child key, weight)`, in child insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K, &W)> + '_ {
        self.entries.iter().filter_map(move |child| {
            let parent = self.by_id(child.parent?)?;
            Some((&parent.key, &child.key, &child.weight))
        })
    }

    /// Number of tree edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Sum of the tree edge weights.
    pub fn total_weight(&self) -> W
    where
        W: Copy + Zero,
    {
        self.edges().fold(W::zero(), |acc, (_, _, &w)| acc + w)
    }
}

impl<'a, K, W> IntoIterator for &'a SpanningTree<K, W> {
    type Item = &'a TreeVertex<K, W>;
    type IntoIter = core::slice::Iter<'a, TreeVertex<K, W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Computes a minimum spanning tree of the component containing `start`.
///
/// Every vertex starts white with an infinite key; `start` gets key zero.
/// Each round blackens the white vertex with the strictly smallest key
/// (first in insertion order on a tie). For every edge `u -> v` of the chosen
/// vertex, if `v` is still white and `w < key(v)`, then `key(v) = w` and
/// `parent(v) = u`.
///
/// The result lists spanned vertices in graph insertion order; the
/// `(parent, vertex)` pairs are the tree edges.
///
/// # Errors
/// - `NotFound` if `start` is not a vertex.
/// - `AllocationFailure` if a state table or the result cannot be allocated.
#[tracing::instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn minimum_spanning_tree<K, V, W, Q>(
    graph: &Graph<K, V, W>,
    start: &Q,
) -> Result<SpanningTree<K, W>>
where
    K: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    W: Copy + PartialOrd + Zero,
{
    let start = graph.find_vertex(start).ok_or(GraphError::NotFound)?;

    let bound = graph.slot_bound();
    let mut order = output_buffer(graph.vertex_count())?;
    order.extend(graph.vertex_ids());
    let mut color = state_table(bound, Color::White)?;
    let mut key: Vec<Option<W>> = state_table(bound, None)?;
    let mut parent: Vec<Option<VertexId>> = state_table(bound, None)?;
    key[start.index()] = Some(W::zero());

    for round in 0..graph.vertex_count() {
        let Some(u) = select_min_white(&order, &color, &key) else {
            trace!(round, "no reachable white vertex left");
            break;
        };
        color[u.index()] = Color::Black;
        trace!(round, vertex = %u, "vertex added to tree");

        for (v, &w) in graph.adjacency(u) {
            if color[v.index()] != Color::White {
                continue;
            }
            let lighter = match key[v.index()] {
                None => true,
                Some(kv) => w < kv,
            };
            if lighter {
                key[v.index()] = Some(w);
                parent[v.index()] = Some(u);
            }
        }
    }

    let mut entries = output_buffer(graph.vertex_count())?;
    for id in order {
        let i = id.index();
        if let (Color::Black, Some(k), Some(vertex_key)) = (color[i], key[i], graph.key(id)) {
            entries.push(TreeVertex {
                vertex: id,
                key: vertex_key.clone(),
                color: Color::Black,
                weight: k,
                parent: parent[i],
            });
        }
    }
    let index = EntryIndex::build(&entries, |e| e.vertex)?;

    Ok(SpanningTree { entries, index })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_update_does_not_accumulate() {
        // a -1- b -1- c and a -3- c: Prim picks a-b, b-c (total 2).
        let mut g: Graph<char, (), u32> = Graph::new();
        for k in ['a', 'b', 'c'] {
            g.insert_vertex(k, ()).unwrap();
        }
        g.insert_undirected_edge(&'a', &'b', 1).unwrap();
        g.insert_undirected_edge(&'b', &'c', 1).unwrap();
        g.insert_undirected_edge(&'a', &'c', 3).unwrap();

        let tree = minimum_spanning_tree(&g, &'a').unwrap();
        assert_eq!(tree.total_weight(), 2);
        assert_eq!(tree.get(&'c').unwrap().parent, g.find_vertex(&'b'));
        assert_eq!(tree.edge_count(), 2);
    }

    #[test]
    fn test_disconnected_component_is_not_spanned() {
        let mut g: Graph<char, (), u32> = Graph::new();
        for k in ['a', 'b', 'z'] {
            g.insert_vertex(k, ()).unwrap();
        }
        g.insert_undirected_edge(&'a', &'b', 4).unwrap();
        let tree = minimum_spanning_tree(&g, &'b').unwrap();
        assert_eq!(tree.len(), 2);
        assert!(tree.get(&'z').is_none());
        assert_eq!(tree.get(&'b').unwrap().weight, 0);
    }
}
