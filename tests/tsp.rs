use ordgraph::algorithms::{nearest_neighbor_tour, TspPoint};
use std::collections::HashSet;

fn seven_points() -> Vec<TspPoint<char>> {
    vec![
        TspPoint::new('a', 2.0, 1.0),
        TspPoint::new('b', 1.0, 3.0),
        TspPoint::new('c', 2.0, 4.0),
        TspPoint::new('d', 4.0, 3.0),
        TspPoint::new('e', 5.0, 2.0),
        TspPoint::new('f', 5.0, 5.0),
        TspPoint::new('g', 6.0, 3.0),
    ]
}

#[test]
fn tour_visits_every_point_once_and_closes() {
    let points = seven_points();
    let tour = nearest_neighbor_tour(&points, &'a').unwrap();

    assert_eq!(tour.len(), points.len() + 1);
    let keys: Vec<char> = tour.keys().copied().collect();
    assert_eq!(keys.first(), Some(&'a'));
    assert_eq!(keys.last(), Some(&'a'));

    let distinct: HashSet<char> = keys[..points.len()].iter().copied().collect();
    assert_eq!(distinct.len(), points.len());
}

#[test]
fn tour_follows_nearest_neighbour_rule() {
    let points = seven_points();
    let tour = nearest_neighbor_tour(&points, &'a').unwrap();
    let keys: String = tour.keys().collect();
    assert_eq!(keys, "abcdegfa");
}

#[test]
fn tour_length_sums_the_legs() {
    let points = seven_points();
    let tour = nearest_neighbor_tour(&points, &'a').unwrap();
    let expected: f64 = tour
        .stops()
        .windows(2)
        .map(|w| points[w[0].index].distance_to(&points[w[1].index]))
        .sum();
    assert!((tour.length() - expected).abs() < 1e-9);
}

#[test]
fn each_step_picks_the_closest_unvisited_point() {
    let points = seven_points();
    let tour = nearest_neighbor_tour(&points, &'a').unwrap();
    let stops = tour.stops();
    let mut visited = HashSet::new();
    visited.insert(stops[0].index);
    for pair in stops[..points.len()].windows(2) {
        let here = &points[pair[0].index];
        let chosen = here.distance_to(&points[pair[1].index]);
        for (i, p) in points.iter().enumerate() {
            if !visited.contains(&i) {
                assert!(chosen <= here.distance_to(p));
            }
        }
        assert!(visited.insert(pair[1].index), "point revisited");
    }
}
