use ahash::AHashMap;
use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Distance, Euclidean, Length, LineString, Point};

use crate::geom::{almost_equal, CoordKey};

/// Merge lines at endpoints where exactly two line ends meet.
///
/// Degree-2 chains collapse into maximal paths; junctions where one, three
/// or more line ends meet stay endpoints. Joining requires bit-identical
/// coordinates (run the snapper first to establish that invariant).
/// Deterministic given input order.
pub fn linemerge(lines: &[LineString<f64>]) -> Vec<LineString<f64>> {
    // Incidence of line ends per coordinate: (line index, end is start?).
    let mut incidence: AHashMap<CoordKey, Vec<(usize, bool)>> = AHashMap::new();
    for (i, line) in lines.iter().enumerate() {
        let (Some(first), Some(last)) = (line.0.first(), line.0.last()) else {
            continue;
        };
        incidence.entry(CoordKey::from(*first)).or_default().push((i, true));
        incidence.entry(CoordKey::from(*last)).or_default().push((i, false));
    }

    let mut visited = vec![false; lines.len()];
    let mut merged = Vec::new();

    for i in 0..lines.len() {
        if visited[i] || lines[i].0.len() < 2 {
            continue;
        }
        visited[i] = true;
        let mut coords = lines[i].0.clone();

        // Grow at the tail, then flip and grow at the head.
        for _ in 0..2 {
            extend_chain(&mut coords, lines, &incidence, &mut visited);
            coords.reverse();
        }
        merged.push(LineString::new(coords));
    }
    merged
}

/// Append lines onto the tail of `coords` while the tail coordinate has
/// exactly two incident line ends.
fn extend_chain(
    coords: &mut Vec<Coord<f64>>,
    lines: &[LineString<f64>],
    incidence: &AHashMap<CoordKey, Vec<(usize, bool)>>,
    visited: &mut [bool],
) {
    loop {
        let Some(tail) = coords.last().copied() else { return };
        let Some(entries) = incidence.get(&CoordKey::from(tail)) else { return };
        if entries.len() != 2 {
            return;
        }
        let Some(&(j, starts_here)) = entries.iter().find(|(j, _)| !visited[*j]) else {
            return;
        };
        visited[j] = true;
        let mut next = lines[j].0.clone();
        if !starts_here {
            next.reverse();
        }
        coords.extend(next.into_iter().skip(1));
    }
}

/// Split every line at each point where another line crosses or ends on it,
/// then merge degree-2 chains, so each output line runs from junction to
/// junction with endpoints at crossings and ONLY there.
pub fn one_linestring_per_intersection(
    lines: &[LineString<f64>],
    eps: f64,
) -> Vec<LineString<f64>> {
    linemerge(&node_lines(lines, eps))
}

/// Cut each line at its intersections with every other line.
fn node_lines(lines: &[LineString<f64>], eps: f64) -> Vec<LineString<f64>> {
    let mut noded = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let mut cuts: Vec<(f64, Coord<f64>)> = Vec::new();
        for (si, seg) in line.lines().enumerate() {
            let seg_length = Euclidean.length(&seg);
            for (j, other) in lines.iter().enumerate() {
                if j == i {
                    continue;
                }
                for seg_b in other.lines() {
                    match line_intersection(seg, seg_b) {
                        Some(LineIntersection::SinglePoint { intersection, .. }) => {
                            push_cut(&mut cuts, si, seg.start, seg_length, intersection);
                        }
                        Some(LineIntersection::Collinear { intersection }) => {
                            push_cut(&mut cuts, si, seg.start, seg_length, intersection.start);
                            push_cut(&mut cuts, si, seg.start, seg_length, intersection.end);
                        }
                        None => {}
                    }
                }
            }
        }
        noded.extend(split_line(line, cuts, eps));
    }
    noded
}

/// Record a cut as a fractional position along the whole line.
fn push_cut(
    cuts: &mut Vec<(f64, Coord<f64>)>,
    segment: usize,
    seg_start: Coord<f64>,
    seg_length: f64,
    at: Coord<f64>,
) {
    let t = if seg_length > 0.0 {
        Euclidean.distance(Point::from(seg_start), Point::from(at)) / seg_length
    } else {
        0.0
    };
    cuts.push((segment as f64 + t.clamp(0.0, 1.0), at));
}

/// Split `line` at the given (position, coordinate) cuts. Cuts coinciding
/// with the line's own endpoints are no-ops; cuts on an interior vertex
/// split there without inserting a new coordinate.
fn split_line(
    line: &LineString<f64>,
    mut cuts: Vec<(f64, Coord<f64>)>,
    eps: f64,
) -> Vec<LineString<f64>> {
    let (Some(&first), Some(&last)) = (line.0.first(), line.0.last()) else {
        return Vec::new();
    };
    cuts.retain(|(_, c)| !almost_equal(*c, first, eps) && !almost_equal(*c, last, eps));
    if cuts.is_empty() {
        return vec![line.clone()];
    }

    // Interleave vertices and cuts by position along the line.
    let mut events: Vec<(f64, Coord<f64>, bool)> = line
        .0
        .iter()
        .enumerate()
        .map(|(k, c)| (k as f64, *c, false))
        .collect();
    events.extend(cuts.into_iter().map(|(pos, c)| (pos, c, true)));
    events.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut pieces = Vec::new();
    let mut current: Vec<Coord<f64>> = Vec::new();
    for (_, coord, is_cut) in events {
        let duplicate = current.last().is_some_and(|c| almost_equal(*c, coord, eps));
        if !duplicate {
            current.push(coord);
        }
        if is_cut && current.len() >= 2 {
            let joint = current[current.len() - 1];
            pieces.push(LineString::new(std::mem::replace(&mut current, vec![joint])));
        }
    }
    if current.len() >= 2 {
        pieces.push(LineString::new(current));
    }
    pieces.retain(|p| Euclidean.length(p) > 0.0);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    #[test]
    fn degree_two_chain_collapses() {
        let lines = vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)],
        ];
        let merged = linemerge(&lines);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0],
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)]
        );
    }

    #[test]
    fn junction_of_three_is_preserved() {
        let lines = vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
        ];
        let merged = linemerge(&lines);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_reverses_lines_when_needed() {
        // Second line points away from the junction.
        let lines = vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 2.0, y: 0.0), (x: 1.0, y: 0.0)],
        ];
        let merged = linemerge(&lines);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].0.len(), 3);
    }

    #[test]
    fn crossing_lines_are_noded_into_four() {
        let lines = vec![
            line_string![(x: -1.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 0.0, y: -1.0), (x: 0.0, y: 1.0)],
        ];
        let result = one_linestring_per_intersection(&lines, 1e-8);
        // The crossing point has degree 4, so all four arms stay separate.
        assert_eq!(result.len(), 4);
        for line in &result {
            assert!(line.0.contains(&geo::coord! { x: 0.0, y: 0.0 }));
        }
    }

    #[test]
    fn t_junction_splits_the_through_line() {
        let lines = vec![
            line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
        ];
        let result = one_linestring_per_intersection(&lines, 1e-8);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn touching_pair_with_no_junction_merges_to_one() {
        let lines = vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 1.0)],
        ];
        let result = one_linestring_per_intersection(&lines, 1e-8);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0.len(), 3);
    }

    #[test]
    fn cut_on_interior_vertex_splits_there() {
        let lines = vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
        ];
        let result = one_linestring_per_intersection(&lines, 1e-8);
        assert_eq!(result.len(), 3);
        for line in &result {
            assert_eq!(line.0.len(), 2);
        }
    }
}
