use geo::{Distance, Euclidean, LineString, Point, Polygon};

use crate::error::TopologyError;

/// The closed set of geometry kinds the repair routines operate on.
///
/// Exhaustive matching replaces dynamic dispatch: new kinds are a compile
/// error in every consumer, not a runtime surprise.
#[derive(Clone, Copy, Debug)]
pub enum GeometryRef<'a> {
    Point(&'a Point<f64>),
    Line(&'a LineString<f64>),
    Polygon(&'a Polygon<f64>),
}

impl GeometryRef<'_> {
    /// Euclidean distance from `point` to this geometry.
    pub fn distance_to(&self, point: Point<f64>) -> f64 {
        match self {
            GeometryRef::Point(p) => Euclidean.distance(point, **p),
            GeometryRef::Line(line) => Euclidean.distance(&point, *line),
            GeometryRef::Polygon(poly) => Euclidean.distance(&point, *poly),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            GeometryRef::Point(_) => "point",
            GeometryRef::Line(_) => "line",
            GeometryRef::Polygon(_) => "polygon",
        }
    }
}

/// Project `point` onto the straight segment `a`-`b`.
///
/// If the scalar projection parameter falls outside `[0, 1]` (with a small
/// epsilon above zero to avoid numeric flicker at the segment start), the
/// closer segment endpoint is returned; otherwise the perpendicular foot.
/// A degenerate zero-length segment projects onto `a`.
pub fn project_point_to_segment(point: Point<f64>, a: Point<f64>, b: Point<f64>) -> Point<f64> {
    let magnitude = Euclidean.distance(a, b);
    if magnitude == 0.0 {
        return a;
    }

    let u = ((point.x() - a.x()) * (b.x() - a.x()) + (point.y() - a.y()) * (b.y() - a.y()))
        / (magnitude * magnitude);

    if !(1e-5..=1.0).contains(&u) {
        // Closest point is outside the segment interior; take the nearer end.
        if Euclidean.distance(point, a) > Euclidean.distance(point, b) {
            b
        } else {
            a
        }
    } else {
        Point::new(a.x() + u * (b.x() - a.x()), a.y() + u * (b.y() - a.y()))
    }
}

/// Project `point` onto the nearest point of `geometry`.
///
/// Iterates every consecutive coordinate pair of a line, or of a polygon's
/// exterior ring, keeping the globally closest projection. Any other
/// geometry kind is a precondition violation.
pub fn project_point_to_object(
    point: Point<f64>,
    geometry: GeometryRef<'_>,
) -> Result<Point<f64>, TopologyError> {
    let coords: &[geo::Coord<f64>] = match geometry {
        GeometryRef::Line(line) => &line.0,
        GeometryRef::Polygon(poly) => &poly.exterior().0,
        other => {
            return Err(TopologyError::UnsupportedGeometry { kind: other.kind() });
        }
    };

    let mut nearest = None;
    let mut min_dist = f64::INFINITY;
    for pair in coords.windows(2) {
        let candidate =
            project_point_to_segment(point, Point::from(pair[0]), Point::from(pair[1]));
        let dist = Euclidean.distance(point, candidate);
        if dist < min_dist {
            min_dist = dist;
            nearest = Some(candidate);
        }
    }

    // A LineString has >= 2 coordinates and a polygon ring is closed, so the
    // windows loop always produced at least one candidate.
    nearest.ok_or(TopologyError::InvalidGeometry {
        x: point.x(),
        y: point.y(),
    })
}

/// Find the geometry with minimum distance to `point`.
///
/// Returns `(index, distance)` of the winner, or `None` for an empty slice.
/// Ties resolve to the lowest index.
pub fn closest_object(geometries: &[GeometryRef<'_>], point: Point<f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (k, geometry) in geometries.iter().enumerate() {
        let dist = geometry.distance_to(point);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((k, dist));
        }
    }
    best
}
