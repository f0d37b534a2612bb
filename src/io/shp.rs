//! Thin shapefile adapter.
//!
//! Marshals between `.shp`/`.dbf` files and the in-memory shape the core
//! consumes (ordered `Vec<LineString<f64>>` plus vertex/edge tables). No
//! algorithmic depth lives here; the core has no file-format knowledge.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, Point};
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Polyline, Shape};

use crate::graph::EdgeIds;

/// Read every part of every polyline record from a `.shp` file, in file
/// order. Multi-part polylines contribute one line per part.
pub fn read_polylines(path: &Path) -> Result<Vec<LineString<f64>>> {
    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut lines = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, _record) = result.context("Error reading shape+record")?;
        match shape {
            Shape::Polyline(polyline) => {
                for part in polyline.parts() {
                    lines.push(LineString::new(
                        part.iter().map(|p| Coord { x: p.x, y: p.y }).collect(),
                    ));
                }
            }
            Shape::NullShape => {}
            _ => bail!(
                "Expected polyline records in shapefile: {}",
                path.display()
            ),
        }
    }
    Ok(lines)
}

/// Write lines as single-part polyline records with a sequential `ID`
/// attribute.
pub fn write_polylines(path: &Path, lines: &[LineString<f64>]) -> Result<()> {
    let table = TableWriterBuilder::new().add_numeric_field(field_name("ID")?, 18, 0);
    let mut writer = shapefile::Writer::from_path(path, table)
        .with_context(|| format!("Failed to create shapefile: {}", path.display()))?;

    for (i, line) in lines.iter().enumerate() {
        let mut record = Record::default();
        record.insert("ID".to_owned(), FieldValue::Numeric(Some(i as f64)));
        writer.write_shape_and_record(&geo_to_shp_polyline(line)?, &record)?;
    }
    Ok(())
}

/// Write the repaired graph: a point shapefile for the vertex table (with a
/// `Vertex` ID field) and a polyline shapefile for the edges (with
/// `Vertex1`/`Vertex2` fields; missing IDs become dBase nulls).
pub fn write_graph(
    vertices_path: &Path,
    edges_path: &Path,
    vertices: &[Point<f64>],
    lines: &[LineString<f64>],
    edges: &[EdgeIds],
) -> Result<()> {
    if lines.len() != edges.len() {
        bail!(
            "Edge table has {} rows but {} edge geometries were given",
            edges.len(),
            lines.len()
        );
    }

    let table = TableWriterBuilder::new().add_numeric_field(field_name("Vertex")?, 18, 0);
    let mut writer = shapefile::Writer::from_path(vertices_path, table)
        .with_context(|| format!("Failed to create shapefile: {}", vertices_path.display()))?;
    for (i, vertex) in vertices.iter().enumerate() {
        let mut record = Record::default();
        record.insert("Vertex".to_owned(), FieldValue::Numeric(Some(i as f64)));
        let shape = shapefile::Point {
            x: vertex.x(),
            y: vertex.y(),
        };
        writer.write_shape_and_record(&shape, &record)?;
    }

    let table = TableWriterBuilder::new()
        .add_numeric_field(field_name("Vertex1")?, 18, 0)
        .add_numeric_field(field_name("Vertex2")?, 18, 0);
    let mut writer = shapefile::Writer::from_path(edges_path, table)
        .with_context(|| format!("Failed to create shapefile: {}", edges_path.display()))?;
    for (line, ids) in lines.iter().zip(edges) {
        let mut record = Record::default();
        record.insert(
            "Vertex1".to_owned(),
            FieldValue::Numeric(ids.vertex1.map(f64::from)),
        );
        record.insert(
            "Vertex2".to_owned(),
            FieldValue::Numeric(ids.vertex2.map(f64::from)),
        );
        writer.write_shape_and_record(&geo_to_shp_polyline(line)?, &record)?;
    }
    Ok(())
}

fn field_name(name: &str) -> Result<FieldName> {
    FieldName::try_from(name).map_err(|e| anyhow!("Invalid dbf field name {name:?}: {e:?}"))
}

/// Convert a geo::LineString to a single-part shapefile::Polyline.
fn geo_to_shp_polyline(line: &LineString<f64>) -> Result<Polyline> {
    if line.0.len() < 2 {
        bail!("Cannot write a polyline with fewer than 2 points");
    }
    let points = line
        .0
        .iter()
        .map(|c| shapefile::Point { x: c.x, y: c.y })
        .collect::<Vec<_>>();
    Ok(Polyline::new(points))
}
