//! `OrderedSeq` — an arena-backed, singly linked, insertion-ordered sequence.
//!
//! Nodes live in a single `Vec` of slots and link to each other by index.
//! Removed slots go on a free list and are reused by later insertions, so a
//! [`Cursor`] stays valid until the element it names is removed.
//!
//! The sequence is the substrate for both the graph's vertex collection and
//! every per-vertex adjacency list: forward-only traversal, insert-after,
//! remove-after and predicate search.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `insert_after` | \(O(1)\) amortized | Reuses a free slot when one exists |
//! | `remove_after` | \(O(1)\) | Requires the predecessor cursor |
//! | `find` | \(O(n)\) | Returns the predecessor alongside the match |
//! | `iter` | \(O(n)\) | Follows `next` links, not slot order |

use crate::error::{GraphError, Result};
use core::fmt;

/// A stable handle to an element of an [`OrderedSeq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor(usize);

impl Cursor {
    /// Returns the slot index this cursor names.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Cursor(index)
    }
}

#[derive(Clone)]
struct Node<T> {
    next: Option<usize>,
    value: T,
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Free(Option<usize>),
}

/// A singly linked sequence that preserves insertion order.
#[derive(Clone)]
pub struct OrderedSeq<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> OrderedSeq<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty sequence with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Reserves room for `additional` more elements.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if the slot vector cannot grow.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let free = self.slots.len() - self.len;
        self.slots.try_reserve(additional.saturating_sub(free))?;
        Ok(())
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the largest slot index ever handed out.
    ///
    /// Side tables indexed by [`Cursor::index`] must be at least this long.
    #[inline]
    pub fn slot_bound(&self) -> usize {
        self.slots.len()
    }

    /// Cursor to the first element.
    #[inline]
    pub fn head(&self) -> Option<Cursor> {
        self.head.map(Cursor)
    }

    /// Cursor to the last element.
    #[inline]
    pub fn tail(&self) -> Option<Cursor> {
        self.tail.map(Cursor)
    }

    /// Cursor to the element following `cursor`.
    #[inline]
    pub fn next(&self, cursor: Cursor) -> Option<Cursor> {
        self.node(cursor.0).and_then(|n| n.next).map(Cursor)
    }

    /// Returns the element at `cursor`, or `None` if the slot is vacant.
    #[inline]
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        self.node(cursor.0).map(|n| &n.value)
    }

    /// Returns the element at `cursor` mutably.
    #[inline]
    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        match self.slots.get_mut(cursor.0) {
            Some(Slot::Occupied(node)) => Some(&mut node.value),
            _ => None,
        }
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Option<&T> {
        self.head().and_then(|c| self.get(c))
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Option<&T> {
        self.tail().and_then(|c| self.get(c))
    }

    /// Inserts `value` after `after`, or at the head when `after` is `None`.
    ///
    /// # Errors
    /// - `InvalidCursor` if `after` names a vacant slot; nothing is inserted.
    /// - `AllocationFailure` if the slot vector cannot grow.
    pub fn try_insert_after(&mut self, after: Option<Cursor>, value: T) -> Result<Cursor> {
        let next = match after {
            Some(c) => self.node(c.0).ok_or(GraphError::InvalidCursor)?.next,
            None => self.head,
        };

        let idx = self.alloc(Node { next, value })?;

        match after {
            Some(c) => {
                if let Some(Slot::Occupied(prev)) = self.slots.get_mut(c.0) {
                    prev.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        if next.is_none() {
            self.tail = Some(idx);
        }

        self.len += 1;
        Ok(Cursor(idx))
    }

    /// Infallible form of [`try_insert_after`](Self::try_insert_after).
    ///
    /// # Panics
    /// Panics on allocation failure or if `after` names a vacant slot.
    pub fn insert_after(&mut self, after: Option<Cursor>, value: T) -> Cursor {
        match self.try_insert_after(after, value) {
            Ok(c) => c,
            Err(e) => panic!("OrderedSeq::insert_after: {e}"),
        }
    }

    /// Appends `value` at the tail.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if the slot vector cannot grow.
    pub fn try_push_back(&mut self, value: T) -> Result<Cursor> {
        self.try_insert_after(self.tail(), value)
    }

    /// Prepends `value` at the head.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if the slot vector cannot grow.
    pub fn try_push_front(&mut self, value: T) -> Result<Cursor> {
        self.try_insert_after(None, value)
    }

    /// Appends `value` at the tail.
    pub fn push_back(&mut self, value: T) -> Cursor {
        self.insert_after(self.tail(), value)
    }

    /// Prepends `value` at the head.
    pub fn push_front(&mut self, value: T) -> Cursor {
        self.insert_after(None, value)
    }

    /// Removes the element following `after`, or the head when `after` is `None`.
    ///
    /// Returns `None` when there is no such element.
    pub fn remove_after(&mut self, after: Option<Cursor>) -> Option<T> {
        let target = match after {
            Some(c) => self.node(c.0)?.next?,
            None => self.head?,
        };

        let node = match core::mem::replace(&mut self.slots[target], Slot::Free(self.free_head)) {
            Slot::Occupied(node) => node,
            Slot::Free(_) => unreachable!("linked slot {target} was vacant"),
        };
        self.free_head = Some(target);

        match after {
            Some(c) => {
                if let Some(Slot::Occupied(prev)) = self.slots.get_mut(c.0) {
                    prev.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        if self.tail == Some(target) {
            self.tail = after.map(|c| c.0);
        }

        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_after(None)
    }

    /// Finds the first element satisfying `pred`.
    ///
    /// Returns `(predecessor, cursor)` so the match can be handed to
    /// [`remove_after`](Self::remove_after).
    pub fn find<F>(&self, mut pred: F) -> Option<(Option<Cursor>, Cursor)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut prev = None;
        let mut curr = self.head;
        while let Some(idx) = curr {
            let node = self.node(idx)?;
            if pred(&node.value) {
                return Some((prev.map(Cursor), Cursor(idx)));
            }
            prev = Some(idx);
            curr = node.next;
        }
        None
    }

    /// Returns `true` if any element satisfies `pred`.
    pub fn contains_by<F>(&self, pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.find(pred).is_some()
    }

    /// Iterates over the elements front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            seq: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Iterates over the cursors front to back.
    pub fn cursors(&self) -> Cursors<'_, T> {
        Cursors {
            seq: self,
            current: self.head,
        }
    }

    /// Calls `f` on every element front to back, with mutable access.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let mut curr = self.head;
        while let Some(idx) = curr {
            match &mut self.slots[idx] {
                Slot::Occupied(node) => {
                    f(&mut node.value);
                    curr = node.next;
                }
                Slot::Free(_) => break,
            }
        }
    }

    /// Removes every element, front to back, yielding each by value.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { seq: self }
    }

    /// Removes every element and releases all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    #[inline]
    fn node(&self, idx: usize) -> Option<&Node<T>> {
        match self.slots.get(idx) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn alloc(&mut self, node: Node<T>) -> Result<usize> {
        if let Some(idx) = self.free_head {
            self.free_head = match self.slots[idx] {
                Slot::Free(next_free) => next_free,
                Slot::Occupied(_) => unreachable!("free head points to occupied slot"),
            };
            self.slots[idx] = Slot::Occupied(node);
            Ok(idx)
        } else {
            self.slots.try_reserve(1)?;
            let idx = self.slots.len();
            self.slots.push(Slot::Occupied(node));
            Ok(idx)
        }
    }
}

impl<T> Default for OrderedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for OrderedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut seq = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            seq.push_back(value);
        }
        seq
    }
}

impl<'a, T> IntoIterator for &'a OrderedSeq<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over an [`OrderedSeq`].
pub struct Iter<'a, T> {
    seq: &'a OrderedSeq<T>,
    current: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.seq.node(self.current?)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Front-to-back iterator over the cursors of an [`OrderedSeq`].
pub struct Cursors<'a, T> {
    seq: &'a OrderedSeq<T>,
    current: Option<usize>,
}

impl<T> Iterator for Cursors<'_, T> {
    type Item = Cursor;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        self.current = self.seq.node(idx)?.next;
        Some(Cursor(idx))
    }
}

/// Draining iterator returned by [`OrderedSeq::drain`].
///
/// Elements not consumed are dropped, front to back, when the iterator is dropped.
pub struct Drain<'a, T> {
    seq: &'a mut OrderedSeq<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.seq.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.seq.len, Some(self.seq.len))
    }
}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        while self.seq.pop_front().is_some() {}
        self.seq.clear();
    }
}
