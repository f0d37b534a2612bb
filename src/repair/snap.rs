use geo::{Distance, Euclidean, Length, LineString, Point, Relate};
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::error::TopologyError;
use crate::geom::vertices;
use crate::repair::{bend_towards, find_isolated_endpoints};

/// Candidate entry: coordinate plus stable insertion index, so nearest
/// queries can tie-break deterministically on candidate order.
type PoolEntry = GeomWithData<[f64; 2], usize>;

/// Mutable pool of snap candidates over an r-tree.
///
/// Coordinates can be updated in place (remove + reinsert) so that once an
/// endpoint has snapped onto a candidate, later endpoints chain-snap onto
/// the joined coordinate rather than the stale one.
struct SnapPool {
    points: Vec<Point<f64>>,
    tree: RTree<PoolEntry>,
}

impl SnapPool {
    fn new(points: Vec<Point<f64>>) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .map(|(i, p)| PoolEntry::new([p.x(), p.y()], i))
            .collect();
        Self {
            points,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Nearest candidate to `point` within `max_distance`, excluding
    /// candidates at distance 0 (the query point itself and exact
    /// duplicates). Ties resolve to the lowest candidate index.
    fn nearest_within(&self, point: Point<f64>, max_distance: f64) -> Option<usize> {
        let mut best: Option<(f64, usize)> = None;
        for entry in self
            .tree
            .locate_within_distance([point.x(), point.y()], max_distance * max_distance)
        {
            let candidate = self.points[entry.data];
            let dist = Euclidean.distance(point, candidate);
            if dist == 0.0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((d, i)) => dist < d || (dist == d && entry.data < i),
            };
            if better {
                best = Some((dist, entry.data));
            }
        }
        best.map(|(_, i)| i)
    }

    /// Lowest-index candidate whose current coordinate equals `point`.
    fn find_exact(&self, point: Point<f64>) -> Option<usize> {
        self.tree
            .locate_all_at_point(&[point.x(), point.y()])
            .map(|entry| entry.data)
            .min()
    }

    fn point(&self, index: usize) -> Point<f64> {
        self.points[index]
    }

    fn update(&mut self, index: usize, to: Point<f64>) {
        let old = self.points[index];
        self.tree.remove(&PoolEntry::new([old.x(), old.y()], index));
        self.tree.insert(PoolEntry::new([to.x(), to.y()], index));
        self.points[index] = to;
    }
}

/// Find the nearest point among `candidates` within `max_distance` of
/// `point`, excluding `point` itself (distance 0). Ties resolve to the
/// first candidate in iteration order.
pub fn nearest_neighbor_within(
    candidates: &[Point<f64>],
    point: Point<f64>,
    max_distance: f64,
) -> Option<Point<f64>> {
    let pool = SnapPool::new(candidates.to_vec());
    pool.nearest_within(point, max_distance).map(|i| pool.point(i))
}

/// Snap isolated line endpoints onto nearby vertices.
///
/// Every vertex of the input is a snap candidate. Each isolated endpoint is
/// processed in input order: if a candidate other than the endpoint itself
/// lies within `max_distance`, the owning line's endpoint is bent onto it
/// and the candidate pool entry for the endpoint is moved to the joined
/// coordinate. Endpoint-by-endpoint and order-dependent by design; there is
/// no global minimum-displacement guarantee, but results are reproducible.
///
/// Lines whose length collapses to exactly 0 are dropped afterwards.
pub fn snappy_endings(
    lines: &[LineString<f64>],
    max_distance: f64,
    eps: f64,
) -> Result<Vec<LineString<f64>>, TopologyError> {
    let mut snapped: Vec<LineString<f64>> = lines.to_vec();
    let mut pool = SnapPool::new(vertices(&snapped));

    // Only isolated endpoints move; everything else is already joined.
    let isolated = find_isolated_endpoints(&snapped);

    for endpoint in isolated {
        let Some(target_index) = pool.nearest_within(endpoint, max_distance) else {
            continue;
        };
        let target = pool.point(target_index);

        // Bend the first line owning this endpoint.
        for line in snapped.iter_mut() {
            if endpoint.relate(line).is_touches() {
                *line = bend_towards(line, endpoint, target, eps)?;
                break;
            }
        }

        // Keep the pool consistent so later endpoints chain onto the join.
        if let Some(moved) = pool.find_exact(endpoint) {
            pool.update(moved, target);
        }
    }

    snapped.retain(|line| Euclidean.length(line) > 0.0);
    Ok(snapped)
}
