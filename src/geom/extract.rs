use ahash::AHashSet;
use geo::{LineString, Point};

use crate::geom::CoordKey;

/// Collect the terminal points (first and last coordinate) of every line,
/// deduplicated by exact coordinate equality. First-seen order is preserved
/// so downstream ID assignment is deterministic.
pub fn endpoints(lines: &[LineString<f64>]) -> Vec<Point<f64>> {
    let mut seen = AHashSet::with_capacity(lines.len() * 2);
    let mut points = Vec::new();
    for line in lines {
        for coord in [line.0.first(), line.0.last()].into_iter().flatten() {
            if seen.insert(CoordKey::from(*coord)) {
                points.push(Point::from(*coord));
            }
        }
    }
    points
}

/// Collect every coordinate of every line (endpoints and interior bends),
/// deduplicated by exact coordinate equality, in first-seen order.
pub fn vertices(lines: &[LineString<f64>]) -> Vec<Point<f64>> {
    let mut seen = AHashSet::new();
    let mut points = Vec::new();
    for line in lines {
        for coord in &line.0 {
            if seen.insert(CoordKey::from(*coord)) {
                points.push(Point::from(*coord));
            }
        }
    }
    points
}
