//! Container collaborators used by the graph.
//!
//! - `ordered_seq`: an arena-backed, singly linked, insertion-ordered sequence

pub mod ordered_seq;

pub use ordered_seq::{Cursor, OrderedSeq};
