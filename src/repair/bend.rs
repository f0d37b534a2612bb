use geo::{Distance, Euclidean, Intersects, LineString, Point};

use crate::error::TopologyError;
use crate::geom::almost_equal;

/// Move one vertex of `line` to the coordinate of `to`.
///
/// `where_` must lie on the line (vertex, interior point, or endpoint);
/// otherwise the call fails with [`TopologyError::InvalidGeometry`].
///
/// If `where_` coincides with an existing vertex within `eps`, that vertex
/// moves. Otherwise the vertex nearest to `where_` moves, ties resolving to
/// the lowest index. The returned line has the same point count; the input
/// is left untouched.
pub fn bend_towards(
    line: &LineString<f64>,
    where_: Point<f64>,
    to: Point<f64>,
    eps: f64,
) -> Result<LineString<f64>, TopologyError> {
    if !line.intersects(&where_) {
        return Err(TopologyError::InvalidGeometry {
            x: where_.x(),
            y: where_.y(),
        });
    }

    let mut coords = line.0.clone();

    // Easy case: where_ is (within eps) a vertex of the line.
    for coord in coords.iter_mut() {
        if almost_equal(*coord, where_.0, eps) {
            *coord = to.0;
            return Ok(LineString::new(coords));
        }
    }

    // Hard case: where_ lies between vertices, so move the nearest one.
    let mut min_k = 0;
    let mut min_dist = f64::INFINITY;
    for (k, coord) in coords.iter().enumerate() {
        let dist = Euclidean.distance(where_, Point::from(*coord));
        if dist < min_dist {
            min_dist = dist;
            min_k = k;
        }
    }
    coords[min_k] = to.0;
    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    #[test]
    fn bends_exact_vertex() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        let bent = bend_towards(&line, Point::new(1.0, 0.0), Point::new(1.0, 0.5), 1e-8).unwrap();
        assert_eq!(
            bent,
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.5), (x: 2.0, y: 0.0)]
        );
    }

    #[test]
    fn bends_nearest_vertex_for_interior_point() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        // (0.4, 0) lies on the first segment, nearest vertex is index 0.
        let bent = bend_towards(&line, Point::new(0.4, 0.0), Point::new(-1.0, 0.0), 1e-8).unwrap();
        assert_eq!(bent.0[0], geo::coord! { x: -1.0, y: 0.0 });
    }

    #[test]
    fn preserves_point_count_and_touches_target() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        let to = Point::new(0.0, 2.0);
        let bent = bend_towards(&line, Point::new(1.0, 1.0), to, 1e-8).unwrap();
        assert_eq!(bent.0.len(), line.0.len());
        assert!(bent.intersects(&to));
    }

    #[test]
    fn rejects_point_off_the_line() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let err =
            bend_towards(&line, Point::new(0.5, 1.0), Point::new(0.0, 0.0), 1e-8).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidGeometry { .. }));
    }

    #[test]
    fn tie_breaks_to_lowest_vertex_index() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)];
        // Midpoint is equidistant from both vertices; index 0 must move.
        let bent = bend_towards(&line, Point::new(1.0, 0.0), Point::new(9.0, 9.0), 1e-8).unwrap();
        assert_eq!(bent.0[0], geo::coord! { x: 9.0, y: 9.0 });
        assert_eq!(bent.0[1], geo::coord! { x: 2.0, y: 0.0 });
    }
}
