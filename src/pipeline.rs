use anyhow::Result;
use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::geom::endpoints;
use crate::graph::{match_vertices_and_edges, EdgeIds, MatchWarning};
use crate::repair::{one_linestring_per_intersection, prune_short_lines, snappy_endings};

/// Parameters for the repair pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairParams {
    /// Tolerance for almost-equal coordinate comparisons.
    pub eps: f64,
    /// Lines shorter than this are pruned; 0 disables pruning.
    pub min_length: f64,
    /// Maximum distance an isolated endpoint may snap; 0 disables snapping.
    pub snap_distance: f64,
    /// Node and merge lines so each runs junction-to-junction.
    pub merge: bool,
    /// Stage logging on stderr when > 0.
    pub verbose: u8,
}

impl Default for RepairParams {
    fn default() -> Self {
        Self {
            eps: 1e-8,
            min_length: 0.0,
            snap_distance: 0.0,
            merge: true,
            verbose: 0,
        }
    }
}

/// Result of a full repair run: the cleaned line collection and the graph
/// tables derived from it.
#[derive(Clone, Debug)]
pub struct RepairReport {
    /// Cleaned lines, one per graph edge.
    pub lines: Vec<LineString<f64>>,
    /// Vertex table; IDs are indices.
    pub vertices: Vec<Point<f64>>,
    /// Edge table, parallel to `lines`, with `vertex1 <= vertex2`.
    pub edges: Vec<EdgeIds>,
    /// Edges that matched a wrong number of vertices.
    pub warnings: Vec<MatchWarning>,
}

/// Run the whole repair pipeline: prune → snap → merge → match.
///
/// Each stage takes the previous stage's output and returns a new
/// collection; the input is never mutated. Geometric precondition
/// violations abort the run; topology irregularities end up as warnings in
/// the report.
pub fn repair(lines: &[LineString<f64>], params: &RepairParams) -> Result<RepairReport> {
    let mut lines = lines.to_vec();

    if params.min_length > 0.0 {
        let before = lines.len();
        lines = prune_short_lines(&lines, params.min_length, params.eps)?;
        if params.verbose > 0 {
            eprintln!(
                "[prune] removed {} lines below length {}",
                before - lines.len(),
                params.min_length
            );
        }
    }

    if params.snap_distance > 0.0 {
        let before = lines.len();
        lines = snappy_endings(&lines, params.snap_distance, params.eps)?;
        if params.verbose > 0 {
            eprintln!(
                "[snap] {} lines in, {} out (zero-length joins dropped)",
                before,
                lines.len()
            );
        }
    }

    if params.merge {
        let before = lines.len();
        lines = one_linestring_per_intersection(&lines, params.eps);
        if params.verbose > 0 {
            eprintln!("[merge] {} lines -> {} junction-to-junction runs", before, lines.len());
        }
    }

    let vertices = endpoints(&lines);
    let (edges, warnings) = match_vertices_and_edges(&vertices, &lines, params.eps);
    if params.verbose > 0 {
        eprintln!(
            "[match] {} vertices, {} edges, {} warnings",
            vertices.len(),
            edges.len(),
            warnings.len()
        );
        for warning in &warnings {
            eprintln!("[match] {warning}");
        }
    }

    Ok(RepairReport {
        lines,
        vertices,
        edges,
        warnings,
    })
}
