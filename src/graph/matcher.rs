use std::fmt;

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geom::almost_equal;

/// One row of the edge table: the vertex IDs an edge's endpoints matched.
///
/// `vertex1 <= vertex2` always holds when both are present, giving edges a
/// canonical orientation-independent representation. A missing ID means the
/// matcher found fewer than two vertices for the edge; such rows come with
/// a [`MatchWarning`] and must be treated as data-quality failures by
/// downstream consumers, not crashed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeIds {
    pub vertex1: Option<u32>,
    pub vertex2: Option<u32>,
}

impl EdgeIds {
    /// True if the edge matched exactly two vertices.
    pub fn is_complete(&self) -> bool {
        self.vertex1.is_some() && self.vertex2.is_some()
    }
}

/// Non-fatal report of an edge that matched a wrong number of vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchWarning {
    /// Index of the offending edge in the input collection.
    pub edge: usize,
    /// The vertex IDs that were found (0, 1, or more than 2 of them).
    pub matched: SmallVec<[u32; 2]>,
}

impl fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edge {} has wrong number of endpoints: {:?}",
            self.edge,
            self.matched.as_slice()
        )
    }
}

/// Match each edge's endpoints against the vertex table.
///
/// A vertex (ID = its index in `vertices`) matches an edge when it
/// coincides, within `eps`, with one of the edge's two terminal
/// coordinates. Every edge is expected to match exactly 2 vertices; any
/// other count produces a [`MatchWarning`] while whatever was found is
/// still recorded — warn and continue, never abort the batch.
///
/// IDs are stored smaller-first. O(n·m) scan; fine for network-sized
/// inputs.
pub fn match_vertices_and_edges(
    vertices: &[Point<f64>],
    edges: &[LineString<f64>],
    eps: f64,
) -> (Vec<EdgeIds>, Vec<MatchWarning>) {
    let mut rows = Vec::with_capacity(edges.len());
    let mut warnings = Vec::new();

    for (e, line) in edges.iter().enumerate() {
        let terminals = [line.0.first(), line.0.last()];
        let mut matched: SmallVec<[u32; 2]> = SmallVec::new();
        for (k, vertex) in vertices.iter().enumerate() {
            let hit = terminals
                .iter()
                .flatten()
                .any(|end| almost_equal(vertex.0, **end, eps));
            if hit {
                matched.push(k as u32);
            }
        }

        if matched.len() != 2 {
            warnings.push(MatchWarning {
                edge: e,
                matched: matched.clone(),
            });
        }

        rows.push(EdgeIds {
            vertex1: matched.iter().min().copied(),
            vertex2: if matched.len() >= 2 {
                matched.iter().max().copied()
            } else {
                None
            },
        });
    }

    (rows, warnings)
}
