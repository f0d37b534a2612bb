use geo::{Coord, Distance, Euclidean, Point};

/// Bit-exact hashable key for a coordinate.
///
/// `f64::to_bits` is injective, so two coordinates map to the same key iff
/// they are bitwise identical. Used for exact-equality deduplication of
/// vertex sets; almost-equal comparisons go through [`almost_equal`] with an
/// explicit epsilon instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CoordKey(u64, u64);

impl From<Coord<f64>> for CoordKey {
    #[inline]
    fn from(c: Coord<f64>) -> Self {
        Self(c.x.to_bits(), c.y.to_bits())
    }
}

impl From<Point<f64>> for CoordKey {
    #[inline]
    fn from(p: Point<f64>) -> Self {
        Self::from(p.0)
    }
}

/// Returns `true` if `a` and `b` are at most `eps` apart.
///
/// The tolerance is always an explicit parameter; no hidden global epsilon
/// exists anywhere in the crate.
#[inline]
pub fn almost_equal(a: Coord<f64>, b: Coord<f64>, eps: f64) -> bool {
    Euclidean.distance(Point::from(a), Point::from(b)) <= eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn key_is_bit_exact() {
        let a = coord! { x: 1.0, y: 2.0 };
        let b = coord! { x: 1.0, y: 2.0 };
        let c = coord! { x: 1.0 + f64::EPSILON, y: 2.0 };
        assert_eq!(CoordKey::from(a), CoordKey::from(b));
        assert_ne!(CoordKey::from(a), CoordKey::from(c));
    }

    #[test]
    fn negative_zero_differs_from_zero() {
        // Exact-bits semantics: -0.0 and 0.0 are distinct keys even though
        // they compare equal as floats.
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: -0.0, y: 0.0 };
        assert_ne!(CoordKey::from(a), CoordKey::from(b));
    }

    #[test]
    fn almost_equal_respects_eps() {
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 0.0, y: 0.05 };
        assert!(almost_equal(a, b, 0.1));
        assert!(!almost_equal(a, b, 0.01));
    }
}
