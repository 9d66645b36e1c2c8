//! Nearest-neighbour heuristic for the travelling-salesman problem.
//!
//! The input is a flat list of points in the Euclidean plane, treated as a
//! complete graph; no [`Graph`](crate::graph::Graph) is involved. From the
//! start point the tour repeatedly moves to the closest unvisited point and
//! finally returns to the start.

use super::{output_buffer, state_table, Color};
use crate::error::{GraphError, Result};
use core::borrow::Borrow;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A keyed point in the plane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TspPoint<K> {
    /// Identifies the point.
    pub key: K,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl<K> TspPoint<K> {
    /// Creates a point.
    pub fn new(key: K, x: f64, y: f64) -> Self {
        Self { key, x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to<J>(&self, other: &TspPoint<J>) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One stop of a [`Tour`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TourStop<K> {
    /// Position of the point in the input slice.
    pub index: usize,
    /// Key of the point.
    pub key: K,
}

/// A closed tour: every point once, then the start again.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour<K> {
    stops: Vec<TourStop<K>>,
    length: f64,
}

impl<K> Tour<K> {
    /// Stops in visitation order, the closing return to the start included.
    pub fn stops(&self) -> &[TourStop<K>] {
        &self.stops
    }

    /// Keys in visitation order, the closing return to the start included.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.stops.iter().map(|s| &s.key)
    }

    /// Number of stops (point count plus one).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Total Euclidean length of the closed tour.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Consumes the tour, returning its stops.
    pub fn into_stops(self) -> Vec<TourStop<K>> {
        self.stops
    }
}

/// Builds a closed tour over `points` with the nearest-neighbour rule.
///
/// The first point whose key equals `start` opens the tour and is colored
/// black; all others start white. For `points.len() - 1` rounds the white
/// point strictly closest to the current position (first in slice order on a
/// tie) is blackened and appended. The start point is appended once more to
/// close the tour.
///
/// # Errors
/// - `NotFound` if no point has the key `start`.
/// - `AllocationFailure` if the colour table or the tour cannot be allocated.
#[tracing::instrument(skip_all, fields(points = points.len()))]
pub fn nearest_neighbor_tour<K, Q>(points: &[TspPoint<K>], start: &Q) -> Result<Tour<K>>
where
    K: Borrow<Q> + Clone,
    Q: Eq + ?Sized,
{
    let start_idx = points
        .iter()
        .position(|p| Borrow::<Q>::borrow(&p.key) == start)
        .ok_or(GraphError::NotFound)?;

    let mut color = state_table(points.len(), Color::White)?;
    let mut stops = output_buffer(points.len() + 1)?;

    color[start_idx] = Color::Black;
    stops.push(TourStop {
        index: start_idx,
        key: points[start_idx].key.clone(),
    });

    let mut current = start_idx;
    let mut length = 0.0;
    for round in 1..points.len() {
        let mut selection: Option<(usize, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            if color[i] != Color::White {
                continue;
            }
            let d = points[current].distance_to(p);
            let closer = match selection {
                None => true,
                Some((_, best)) => d < best,
            };
            if closer {
                selection = Some((i, d));
            }
        }

        let Some((next, d)) = selection else { break };
        color[next] = Color::Black;
        length += d;
        stops.push(TourStop {
            index: next,
            key: points[next].key.clone(),
        });
        trace!(round, point = next, distance = d, "point visited");
        current = next;
    }

    length += points[current].distance_to(&points[start_idx]);
    stops.push(TourStop {
        index: start_idx,
        key: points[start_idx].key.clone(),
    });

    Ok(Tour { stops, length })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_tour() {
        let points = vec![TspPoint::new("only", 3.0, 4.0)];
        let tour = nearest_neighbor_tour(&points, "only").unwrap();
        assert_eq!(tour.keys().copied().collect::<Vec<_>>(), vec!["only", "only"]);
        assert_eq!(tour.length(), 0.0);
    }

    #[test]
    fn test_equidistant_points_take_slice_order() {
        let points = vec![
            TspPoint::new(0, 0.0, 0.0),
            TspPoint::new(1, 1.0, 0.0),
            TspPoint::new(2, -1.0, 0.0),
        ];
        let tour = nearest_neighbor_tour(&points, &0).unwrap();
        assert_eq!(tour.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 0]);
        assert!((tour.length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_start_and_empty_input() {
        let points = vec![TspPoint::new('a', 0.0, 0.0)];
        assert_eq!(nearest_neighbor_tour(&points, &'z'), Err(GraphError::NotFound));
        let empty: Vec<TspPoint<char>> = Vec::new();
        assert_eq!(nearest_neighbor_tour(&empty, &'a'), Err(GraphError::NotFound));
    }

    #[test]
    fn test_distance_is_euclidean() {
        let a = TspPoint::new((), 0.0, 0.0);
        let b = TspPoint::new((), 3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
