// Transform utilities for DAffine2
//
// Extends glam::DAffine2 with the pieces the face baker needs that glam
// does not ship: a shear constructor and an inverse that refuses singular
// maps instead of returning NaNs.

use glam::{DAffine2, DMat2, DVec2};

use crate::Point2D;

/// Determinant magnitude below which an affine map is treated as singular.
/// The determinant is an area ratio, so only zero and subnormal values count.
pub const SINGULAR_DETERMINANT: f64 = f64::MIN_POSITIVE;

/// Build a shear: `x' = x + shx * y`, `y' = shy * x + y`.
pub fn shear(shx: f64, shy: f64) -> DAffine2 {
    DAffine2::from_mat2(DMat2::from_cols(DVec2::new(1.0, shy), DVec2::new(shx, 1.0)))
}

/// Extension trait for DAffine2 to provide additional transform utilities
pub trait Affine2Ext {
    /// Determinant of the linear part.
    fn determinant(&self) -> f64;

    /// The inverse map, or `None` when the determinant is zero, subnormal or
    /// not finite.
    fn try_inverse(&self) -> Option<DAffine2>;

    /// Map a point through the transform.
    fn apply(&self, p: Point2D) -> Point2D;
}

impl Affine2Ext for DAffine2 {
    fn determinant(&self) -> f64 {
        self.matrix2.determinant()
    }

    fn try_inverse(&self) -> Option<DAffine2> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT {
            return None;
        }
        let inverse = self.inverse();
        inverse.is_finite().then_some(inverse)
    }

    fn apply(&self, p: Point2D) -> Point2D {
        self.transform_point2(p.into()).into()
    }
}
