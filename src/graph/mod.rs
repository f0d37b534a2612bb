mod matcher;

pub use matcher::{match_vertices_and_edges, EdgeIds, MatchWarning};
