mod coord;
mod extract;
mod project;

pub(crate) use coord::CoordKey;
pub use coord::almost_equal;
pub use extract::{endpoints, vertices};
pub use project::{
    closest_object, project_point_to_object, project_point_to_segment, GeometryRef,
};
