#![doc = "linetopo public API"]
mod error;
pub mod geom;
pub mod graph;
pub mod io;
mod pipeline;
pub mod repair;

#[doc(inline)]
pub use error::TopologyError;

#[doc(inline)]
pub use pipeline::{repair, RepairParams, RepairReport};

#[doc(inline)]
pub use geom::{endpoints, vertices};

#[doc(inline)]
pub use graph::{match_vertices_and_edges, EdgeIds, MatchWarning};

#[doc(inline)]
pub use repair::{prune_short_lines, snappy_endings};
