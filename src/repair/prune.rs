use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Centroid, Length, Euclidean, LineString, Point};

use crate::error::TopologyError;
use crate::repair::{bend_towards, neighbors};

/// Remove every line shorter than `min_length`, contracting neighbors.
///
/// Before a doomed line is dropped, each touching neighbor has its contact
/// vertex bent towards the doomed line's centroid, so the short segment's
/// footprint collapses into its neighbors instead of leaving a gap.
///
/// Single pass by design: neighbors bent below `min_length` during the pass
/// are not re-examined. The output is deterministic given input order.
pub fn prune_short_lines(
    lines: &[LineString<f64>],
    min_length: f64,
    eps: f64,
) -> Result<Vec<LineString<f64>>, TopologyError> {
    let mut pruned: Vec<LineString<f64>> = lines.to_vec();
    let mut to_prune = vec![false; pruned.len()];

    for i in 0..pruned.len() {
        if Euclidean.length(&pruned[i]) >= min_length {
            continue;
        }
        to_prune[i] = true;

        let Some(centroid) = pruned[i].centroid() else {
            continue;
        };
        for n in neighbors(&pruned, i) {
            let Some(contact) = contact_point(&pruned[i], &pruned[n]) else {
                continue;
            };
            pruned[n] = bend_towards(&pruned[n], contact, centroid, eps)?;
        }
    }

    Ok(pruned
        .into_iter()
        .zip(to_prune)
        .filter(|(_, doomed)| !doomed)
        .map(|(line, _)| line)
        .collect())
}

/// First intersection point between two touching lines, scanning segment
/// pairs in order. Collinear overlaps contribute their start coordinate.
fn contact_point(a: &LineString<f64>, b: &LineString<f64>) -> Option<Point<f64>> {
    for seg_a in a.lines() {
        for seg_b in b.lines() {
            match line_intersection(seg_a, seg_b) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    return Some(Point::from(intersection));
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    return Some(Point::from(intersection.start));
                }
                None => {}
            }
        }
    }
    None
}
