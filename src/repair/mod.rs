mod bend;
mod merge;
mod neighbors;
mod prune;
mod snap;

pub use bend::bend_towards;
pub use merge::{linemerge, one_linestring_per_intersection};
pub use neighbors::{find_isolated_endpoints, neighbors};
pub use prune::prune_short_lines;
pub use snap::{nearest_neighbor_within, snappy_endings};
