use thiserror::Error;

/// Errors raised by the geometric repair routines.
///
/// Both variants are preconditions on a single call: the caller must fix the
/// input rather than retry. Topology irregularities that should not abort a
/// batch are reported as [`MatchWarning`](crate::graph::MatchWarning)s
/// instead.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The bend target does not lie on the given line (neither contained nor
    /// touching).
    #[error("point ({x}, {y}) does not lie on the line")]
    InvalidGeometry { x: f64, y: f64 },

    /// Projection was requested against a geometry kind other than a line or
    /// a polygon.
    #[error("projection is not supported for {kind} geometries")]
    UnsupportedGeometry { kind: &'static str },
}
