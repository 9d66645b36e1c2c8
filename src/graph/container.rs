//! A key-addressed, insertion-ordered directed graph.
//!
//! Vertices are stored in an [`OrderedSeq`] so every traversal visits them in
//! insertion order, and each vertex owns an adjacency [`OrderedSeq`] of its
//! outgoing edges. A `HashMap` from key to [`VertexId`] replaces the linear
//! lookup scan, and a per-slot in-degree table turns the isolation check into
//! an \(O(1)\) query while keeping its meaning: a vertex is isolated iff it has
//! no outgoing edges and no other vertex's adjacency list names it.
//!
//! Vertex identity is the key type's `Eq + Hash`. Lookups take any borrowed
//! form of the key, so a caller never needs a fully built payload to search.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `insert_vertex` | \(O(1)\) amortized | Rejects duplicate keys |
//! | `insert_edge` | \(O(\text{out-degree})\) | Scans for an existing edge first |
//! | `remove_vertex` | \(O(n)\) | Locates the predecessor in the vertex sequence |
//! | `remove_edge` | \(O(\text{out-degree})\) | Linear scan of the adjacency list |
//! | `find_vertex` | \(O(1)\) | Hash lookup |
//! | `is_isolated` | \(O(1)\) | In-degree table plus out-degree |

use crate::collections::ordered_seq::{self, Cursor, OrderedSeq};
use crate::error::{GraphError, Result};
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A non-owning handle to a vertex.
///
/// Handles are slot indices: they stay valid until the vertex is removed, and
/// a later insertion may reuse the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexId(usize);

impl VertexId {
    /// Returns the slot index of this vertex.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    #[inline]
    fn cursor(self) -> Cursor {
        Cursor::from_index(self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// An outgoing edge, identified by the vertex it points to.
#[derive(Clone)]
pub(crate) struct Edge<E> {
    pub(crate) target: VertexId,
    pub(crate) weight: E,
}

#[derive(Clone)]
struct VertexSlot<K, V, E> {
    key: K,
    value: V,
    adjacency: OrderedSeq<Edge<E>>,
}

/// Read-only view of a vertex yielded by [`Graph::vertices`].
#[derive(Debug, Clone, Copy)]
pub struct VertexRef<'a, K, V> {
    /// The vertex handle.
    pub id: VertexId,
    /// The vertex key.
    pub key: &'a K,
    /// The vertex payload.
    pub value: &'a V,
}

/// Read-only view of an edge yielded by [`Graph::neighbors`].
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a, K, E> {
    /// Handle of the vertex the edge points to.
    pub target: VertexId,
    /// Key of the vertex the edge points to.
    pub target_key: &'a K,
    /// The edge payload.
    pub weight: &'a E,
}

/// One payload released by [`Graph::dispose_with`].
#[derive(Debug)]
pub enum Disposed<K, V, E> {
    /// An edge payload, released before the vertex that owned it.
    Edge(E),
    /// A vertex key and payload, released after all of its edges.
    Vertex(K, V),
}

/// Iterator over the outgoing edges of one vertex as `(target, &weight)`.
pub(crate) struct Adjacency<'a, E> {
    inner: Option<ordered_seq::Iter<'a, Edge<E>>>,
}

impl<'a, E> Iterator for Adjacency<'a, E> {
    type Item = (VertexId, &'a E);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.inner.as_mut()?.next()?;
        Some((edge.target, &edge.weight))
    }
}

/// A directed graph keyed by `K`, with vertex payload `V` and edge payload `E`.
///
/// An undirected edge is two directed edges, see
/// [`insert_undirected_edge`](Graph::insert_undirected_edge).
///
/// The graph is plain single-threaded state. Sharing it across threads needs
/// external synchronisation, as with any `std` collection.
#[derive(Clone)]
pub struct Graph<K, V = (), E = ()> {
    vertices: OrderedSeq<VertexSlot<K, V, E>>,
    index: HashMap<K, VertexId>,
    /// Incoming edge count per vertex slot.
    in_degree: Vec<usize>,
    edge_count: usize,
}

impl<K, V, E> Graph<K, V, E>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: OrderedSeq::new(),
            index: HashMap::new(),
            in_degree: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty graph with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: OrderedSeq::with_capacity(vertices),
            index: HashMap::with_capacity(vertices),
            in_degree: Vec::with_capacity(vertices),
            edge_count: 0,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Inserts a vertex.
    ///
    /// # Errors
    /// - `Duplicate` if a vertex with an equal key exists; the graph is unchanged.
    /// - `AllocationFailure` if a backing table cannot grow.
    pub fn insert_vertex(&mut self, key: K, value: V) -> Result<VertexId> {
        if self.index.contains_key(&key) {
            debug!(vertices = self.vertex_count(), "duplicate vertex rejected");
            return Err(GraphError::Duplicate);
        }

        self.index.try_reserve(1)?;
        self.in_degree.try_reserve(1)?;

        let cursor = self.vertices.try_push_back(VertexSlot {
            key: key.clone(),
            value,
            adjacency: OrderedSeq::new(),
        })?;
        let id = VertexId(cursor.index());

        if id.0 < self.in_degree.len() {
            self.in_degree[id.0] = 0;
        } else {
            self.in_degree.push(0);
        }
        self.index.insert(key, id);

        debug!(vertex = %id, vertices = self.vertex_count(), "vertex inserted");
        Ok(id)
    }

    /// Inserts the directed edge `from -> to` carrying `weight`.
    ///
    /// # Errors
    /// - `MissingEndpoint` if either endpoint is absent.
    /// - `Duplicate` if `to` is already adjacent to `from`.
    /// - `AllocationFailure` if the adjacency list cannot grow.
    pub fn insert_edge<Q>(&mut self, from: &Q, to: &Q, weight: E) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (Some(source), Some(target)) = (self.find_vertex(from), self.find_vertex(to)) else {
            debug!("edge insertion rejected: missing endpoint");
            return Err(GraphError::MissingEndpoint);
        };
        self.link(source, target, weight)
    }

    /// Inserts `u -> v` and `v -> u`, both carrying `weight`.
    ///
    /// A self-loop (`u == v`) is inserted once. Nothing is inserted unless
    /// both directions can be.
    ///
    /// # Errors
    /// - `MissingEndpoint` if either endpoint is absent.
    /// - `Duplicate` if either direction already exists.
    /// - `AllocationFailure` if an adjacency list cannot grow.
    pub fn insert_undirected_edge<Q>(&mut self, u: &Q, v: &Q, weight: E) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        E: Clone,
    {
        let (Some(a), Some(b)) = (self.find_vertex(u), self.find_vertex(v)) else {
            debug!("undirected edge insertion rejected: missing endpoint");
            return Err(GraphError::MissingEndpoint);
        };
        if a == b {
            return self.link(a, b, weight);
        }
        if self.has_edge(a, b) || self.has_edge(b, a) {
            debug!(from = %a, to = %b, "undirected edge insertion rejected: duplicate");
            return Err(GraphError::Duplicate);
        }

        self.link(a, b, weight.clone())?;
        if let Err(e) = self.link(b, a, weight) {
            self.unlink(a, b);
            return Err(e);
        }
        Ok(())
    }

    /// Removes an isolated vertex and returns its key and payload.
    ///
    /// # Errors
    /// - `NotFound` if no vertex has this key.
    /// - `NotIsolated` if the vertex has outgoing or incoming edges; the graph
    ///   is unchanged.
    pub fn remove_vertex<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.find_vertex(key).ok_or(GraphError::NotFound)?;
        if !self.is_isolated_id(id) {
            debug!(vertex = %id, "vertex removal rejected: not isolated");
            return Err(GraphError::NotIsolated);
        }

        let prev = self
            .vertices
            .cursors()
            .take_while(|c| c.index() != id.0)
            .last();
        let slot = self
            .vertices
            .remove_after(prev)
            .ok_or(GraphError::NotFound)?;
        self.index.remove(key);

        debug!(vertex = %id, vertices = self.vertex_count(), "vertex removed");
        Ok((slot.key, slot.value))
    }

    /// Removes the directed edge `from -> to` and returns its payload.
    ///
    /// # Errors
    /// `MissingEndpoint` if either endpoint or the edge itself is absent.
    pub fn remove_edge<Q>(&mut self, from: &Q, to: &Q) -> Result<E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (Some(source), Some(target)) = (self.find_vertex(from), self.find_vertex(to)) else {
            return Err(GraphError::MissingEndpoint);
        };
        let weight = self.unlink(source, target).ok_or(GraphError::MissingEndpoint)?;
        debug!(from = %source, to = %target, edges = self.edge_count, "edge removed");
        Ok(weight)
    }

    /// Looks up a vertex by key.
    #[inline]
    pub fn find_vertex<Q>(&self, key: &Q) -> Option<VertexId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Returns `true` if a vertex with this key exists.
    pub fn contains_vertex<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Looks up the edge `from -> to` and returns its payload.
    pub fn find_edge<Q>(&self, from: &Q, to: &Q) -> Option<&E>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let source = self.find_vertex(from)?;
        let target = self.find_vertex(to)?;
        self.slot(source)?
            .adjacency
            .iter()
            .find(|e| e.target == target)
            .map(|e| &e.weight)
    }

    /// Returns `true` if the edge `u -> v` exists.
    pub fn is_adjacent<Q>(&self, u: &Q, v: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_edge(u, v).is_some()
    }

    /// Returns `true` if the vertex has no outgoing and no incoming edges.
    ///
    /// # Errors
    /// `NotFound` if no vertex has this key.
    pub fn is_isolated<Q>(&self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.find_vertex(key).ok_or(GraphError::NotFound)?;
        Ok(self.is_isolated_id(id))
    }

    /// Key of the vertex `id`.
    #[inline]
    pub fn key(&self, id: VertexId) -> Option<&K> {
        self.slot(id).map(|s| &s.key)
    }

    /// Payload of the vertex `id`.
    #[inline]
    pub fn value(&self, id: VertexId) -> Option<&V> {
        self.slot(id).map(|s| &s.value)
    }

    /// Mutable payload of the vertex `id`.
    #[inline]
    pub fn value_mut(&mut self, id: VertexId) -> Option<&mut V> {
        self.vertices.get_mut(id.cursor()).map(|s| &mut s.value)
    }

    /// Number of outgoing edges of `id`.
    pub fn out_degree(&self, id: VertexId) -> Option<usize> {
        self.slot(id).map(|s| s.adjacency.len())
    }

    /// Number of incoming edges of `id`.
    pub fn in_degree(&self, id: VertexId) -> Option<usize> {
        self.slot(id).map(|_| self.in_degree[id.0])
    }

    /// Iterates over the vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'_, K, V>> + '_ {
        self.vertices.cursors().filter_map(move |c| {
            self.vertices.get(c).map(|slot| VertexRef {
                id: VertexId(c.index()),
                key: &slot.key,
                value: &slot.value,
            })
        })
    }

    /// Iterates over the outgoing edges of `id` in insertion order.
    ///
    /// Yields nothing if `id` does not name a vertex.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = EdgeRef<'_, K, E>> + '_ {
        self.adjacency(id).filter_map(move |(target, weight)| {
            self.key(target).map(|target_key| EdgeRef {
                target,
                target_key,
                weight,
            })
        })
    }

    /// Calls `f` with every vertex key and payload, in insertion order.
    pub fn for_each_vertex<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for slot in &self.vertices {
            f(&slot.key, &slot.value);
        }
    }

    /// Calls `f` with `(from, to, weight)` for every edge.
    ///
    /// Vertices are visited in insertion order, and each vertex's edges in the
    /// order they were inserted.
    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&K, &K, &E),
    {
        for slot in &self.vertices {
            for edge in &slot.adjacency {
                if let Some(target) = self.key(edge.target) {
                    f(&slot.key, target, &edge.weight);
                }
            }
        }
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.index.clear();
        self.in_degree.clear();
        self.edge_count = 0;
    }

    /// Tears the graph down, handing every payload to `f`.
    ///
    /// Vertices are released in insertion order; each vertex's edge payloads
    /// are released, in adjacency order, before its own key and payload.
    pub fn dispose_with<F>(self, mut f: F)
    where
        F: FnMut(Disposed<K, V, E>),
    {
        let Self { mut vertices, .. } = self;
        for mut slot in vertices.drain() {
            for edge in slot.adjacency.drain() {
                f(Disposed::Edge(edge.weight));
            }
            f(Disposed::Vertex(slot.key, slot.value));
        }
    }

    /// Checks the container's structural invariants.
    ///
    /// - the key index names exactly the stored vertices
    /// - `edge_count` equals the sum of the adjacency list lengths
    /// - every edge targets a live vertex, at most once per source
    /// - the in-degree table agrees with the adjacency lists
    ///
    /// Debug builds panic on the first violation; release builds report it
    /// through the return value.
    pub fn validate_invariants(&self) -> bool {
        use super::invariant::invariant_assert;

        let mut ok = true;
        let mut check = |cond: bool, msg: &str| {
            invariant_assert(cond, msg);
            ok &= cond;
        };

        check(
            self.index.len() == self.vertices.len(),
            "index size must equal the vertex count",
        );

        let mut counted = vec![0usize; self.vertices.slot_bound()];
        let mut edges = 0usize;
        for v in self.vertices() {
            check(
                self.index.get(v.key) == Some(&v.id),
                "index must map each key to its own vertex",
            );
            let mut seen = Vec::new();
            for (target, _) in self.adjacency(v.id) {
                check(self.slot(target).is_some(), "edge target must be a live vertex");
                check(!seen.contains(&target), "a source may reach a target at most once");
                seen.push(target);
                if let Some(c) = counted.get_mut(target.0) {
                    *c += 1;
                }
                edges += 1;
            }
        }
        check(edges == self.edge_count, "edge count must equal the adjacency total");

        for v in self.vertices() {
            check(
                counted[v.id.0] == self.in_degree[v.id.0],
                "in-degree table must match the adjacency lists",
            );
        }

        ok
    }

    /// Vertex handles in insertion order.
    pub(crate) fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.cursors().map(|c| VertexId(c.index()))
    }

    /// Length a side table indexed by [`VertexId::index`] must have.
    #[inline]
    pub(crate) fn slot_bound(&self) -> usize {
        self.vertices.slot_bound()
    }

    /// Outgoing edges of `id` as `(target, &weight)`.
    #[inline]
    pub(crate) fn adjacency(&self, id: VertexId) -> Adjacency<'_, E> {
        Adjacency {
            inner: self.slot(id).map(|s| s.adjacency.iter()),
        }
    }

    #[inline]
    fn slot(&self, id: VertexId) -> Option<&VertexSlot<K, V, E>> {
        self.vertices.get(id.cursor())
    }

    #[inline]
    fn is_isolated_id(&self, id: VertexId) -> bool {
        self.out_degree(id) == Some(0) && self.in_degree[id.0] == 0
    }

    fn has_edge(&self, source: VertexId, target: VertexId) -> bool {
        self.adjacency(source).any(|(t, _)| t == target)
    }

    fn link(&mut self, source: VertexId, target: VertexId, weight: E) -> Result<()> {
        let slot = self
            .vertices
            .get_mut(source.cursor())
            .ok_or(GraphError::MissingEndpoint)?;
        if slot.adjacency.contains_by(|e| e.target == target) {
            debug!(from = %source, to = %target, "duplicate edge rejected");
            return Err(GraphError::Duplicate);
        }
        slot.adjacency.try_push_back(Edge { target, weight })?;
        self.in_degree[target.0] += 1;
        self.edge_count += 1;

        debug!(from = %source, to = %target, edges = self.edge_count, "edge inserted");
        Ok(())
    }

    fn unlink(&mut self, source: VertexId, target: VertexId) -> Option<E> {
        let slot = self.vertices.get_mut(source.cursor())?;
        let (prev, _) = slot.adjacency.find(|e| e.target == target)?;
        let edge = slot.adjacency.remove_after(prev)?;
        self.in_degree[target.0] -= 1;
        self.edge_count -= 1;
        Some(edge.weight)
    }
}

impl<K, V, E> Default for Graph<K, V, E>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> fmt::Debug for Graph<K, V, E>
where
    K: Eq + Hash + Clone + fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for v in self.vertices() {
            let edges: Vec<_> = self
                .neighbors(v.id)
                .map(|e| (e.target_key, e.weight))
                .collect();
            map.entry(v.key, &edges);
        }
        map.finish()
    }
}
