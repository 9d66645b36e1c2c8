//! Structural assertion helpers.
//!
//! The container keeps its invariants explicit through these helpers while
//! release builds leave reporting to the caller.

/// Debug-asserts a structural invariant with a message.
#[inline(always)]
pub(crate) fn invariant_assert(condition: bool, message: &str) {
    debug_assert!(condition, "Graph invariant violated: {}", message);
}
