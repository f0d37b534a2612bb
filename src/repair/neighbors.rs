use geo::{LineString, Point, Relate};

/// Find the indices of all lines that touch `lines[target]`.
///
/// "Touches" is the DE-9IM relation: the geometries share at least one
/// boundary point and their interiors are disjoint. A line crossing the
/// target through both interiors is NOT a neighbor. O(n) scan.
pub fn neighbors(lines: &[LineString<f64>], target: usize) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(k, line)| *k != target && line.relate(&lines[target]).is_touches())
        .map(|(k, _)| k)
        .collect()
}

/// Find endpoints that touch no other line in the collection.
///
/// An endpoint lying in the *interior* of another line (a T-junction that
/// has not been noded yet) does not touch it in the DE-9IM sense and is
/// therefore reported as isolated; the snapper will pull it onto a vertex.
/// O(n²) over the collection.
pub fn find_isolated_endpoints(lines: &[LineString<f64>]) -> Vec<Point<f64>> {
    let mut isolated = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        for coord in [line.0.first(), line.0.last()].into_iter().flatten() {
            let endpoint = Point::from(*coord);
            let touches_other = lines
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && endpoint.relate(other).is_touches());
            if !touches_other {
                isolated.push(endpoint);
            }
        }
    }
    isolated
}
