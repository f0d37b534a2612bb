mod shp;

pub use shp::{read_polylines, write_graph, write_polylines};
