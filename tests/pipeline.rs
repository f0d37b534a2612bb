// End-to-end pipeline runs and the shapefile adapter round-trip.

use geo::{line_string, LineString};

use linetopo::io::{read_polylines, write_graph, write_polylines};
use linetopo::{repair, RepairParams};

fn noisy_network() -> Vec<LineString<f64>> {
    vec![
        // Main run with a dangling gap at the junction.
        line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
        line_string![(x: 1.05, y: 0.0), (x: 2.0, y: 0.0)],
        // Spur off the second segment's end.
        line_string![(x: 2.0, y: 0.0), (x: 2.0, y: 1.0)],
        // Sub-threshold stub that should be pruned away.
        line_string![(x: 2.0, y: 1.0), (x: 2.0, y: 1.1)],
    ]
}

#[test]
fn pipeline_produces_canonical_edge_table() {
    let params = RepairParams {
        min_length: 0.2,
        snap_distance: 0.1,
        merge: false,
        ..RepairParams::default()
    };
    let report = repair(&noisy_network(), &params).unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(report.lines.len(), report.edges.len());
    for row in &report.edges {
        assert!(row.is_complete());
        assert!(row.vertex1 <= row.vertex2);
    }
}

#[test]
fn pipeline_with_merge_collapses_degree_two_chains() {
    let params = RepairParams {
        min_length: 0.2,
        snap_distance: 0.1,
        merge: true,
        ..RepairParams::default()
    };
    let report = repair(&noisy_network(), &params).unwrap();

    // After pruning the stub and snapping the gap, the whole network is one
    // path: every interior junction has degree 2 and merges away.
    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.vertices.len(), 2);
    assert!(report.warnings.is_empty());
    assert_eq!(report.edges[0].vertex1, Some(0));
    assert_eq!(report.edges[0].vertex2, Some(1));
}

#[test]
fn crossing_lines_become_four_edges() {
    let lines = vec![
        line_string![(x: -1.0, y: 0.0), (x: 1.0, y: 0.0)],
        line_string![(x: 0.0, y: -1.0), (x: 0.0, y: 1.0)],
    ];
    let report = repair(&lines, &RepairParams::default()).unwrap();
    assert_eq!(report.lines.len(), 4);
    assert_eq!(report.vertices.len(), 5);
    assert!(report.warnings.is_empty());
    for row in &report.edges {
        assert!(row.is_complete());
    }
}

#[test]
fn shapefile_round_trip_preserves_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.shp");

    let lines = vec![
        line_string![(x: 0.0, y: 0.0), (x: 1.5, y: 0.25), (x: 2.0, y: 0.0)],
        line_string![(x: 2.0, y: 0.0), (x: 3.0, y: -1.0)],
    ];
    write_polylines(&path, &lines).unwrap();
    let read_back = read_polylines(&path).unwrap();
    assert_eq!(read_back, lines);
}

#[test]
fn graph_tables_are_written_alongside_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let vertices_path = dir.path().join("vertices.shp");
    let edges_path = dir.path().join("edges.shp");

    let lines = vec![
        line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
        line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)],
    ];
    let report = repair(&lines, &RepairParams { merge: false, ..RepairParams::default() }).unwrap();
    write_graph(
        &vertices_path,
        &edges_path,
        &report.vertices,
        &report.lines,
        &report.edges,
    )
    .unwrap();

    assert!(vertices_path.exists());
    assert!(edges_path.exists());
    let edges_back = read_polylines(&edges_path).unwrap();
    assert_eq!(edges_back, report.lines);
}
