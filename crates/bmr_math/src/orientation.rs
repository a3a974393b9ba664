//! Per-vertex orientation state for compound rotations.
//!
//! Each face vertex carries its own local X/Y/Z basis. Rotating by
//! `(x, y, z)` turns the point about the *current* local X axis, then the
//! resulting local Y axis, then the resulting local Z axis, so a second call
//! rotates relative to where the first one left the model.

use glam::DVec3;

use crate::{Point3D, Vector};

/// A local orthonormal basis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orientation {
    pub x_axis: Vector,
    pub y_axis: Vector,
    pub z_axis: Vector,
}

impl Orientation {
    /// The world axes.
    pub const IDENTITY: Orientation = Orientation {
        x_axis: Vector::X,
        y_axis: Vector::Y,
        z_axis: Vector::Z,
    };

    /// Rotate `point` about the origin by `angles` (radians, applied X then
    /// Y then Z around the local axes) and return it together with the
    /// basis after the rotation.
    ///
    /// This is pure: the caller decides whether to keep the new basis.
    pub fn rotate(self, point: Point3D, angles: DVec3) -> (Point3D, Orientation) {
        let Orientation {
            mut x_axis,
            mut y_axis,
            mut z_axis,
        } = self;
        let mut v = point.to_vector();

        v = v.rotate_around_axis(x_axis, angles.x);
        y_axis = y_axis.rotate_around_axis(x_axis, angles.x);
        z_axis = z_axis.rotate_around_axis(x_axis, angles.x);

        v = v.rotate_around_axis(y_axis, angles.y);
        x_axis = x_axis.rotate_around_axis(y_axis, angles.y);
        z_axis = z_axis.rotate_around_axis(y_axis, angles.y);

        v = v.rotate_around_axis(z_axis, angles.z);
        x_axis = x_axis.rotate_around_axis(z_axis, angles.z);
        y_axis = y_axis.rotate_around_axis(z_axis, angles.z);

        (
            v.to_point(),
            Orientation {
                x_axis,
                y_axis,
                z_axis,
            },
        )
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_single_axis_rotation() {
        let (p, basis) =
            Orientation::IDENTITY.rotate(Point3D::new(1.0, 0.0, 0.0), DVec3::new(0.0, 0.0, FRAC_PI_2));

        assert!(p.approx_eq(&Point3D::new(0.0, 1.0, 0.0)));
        // Z axis is untouched by a rotation around itself
        assert!(basis.z_axis.approx_eq(Vector::Z));
        assert!(basis.x_axis.approx_eq(Vector::Y));
    }

    #[test]
    fn test_basis_stays_orthonormal() {
        let (_, basis) =
            Orientation::IDENTITY.rotate(Point3D::new(1.0, 2.0, 3.0), DVec3::new(0.3, 1.1, -0.4));

        assert!(basis.x_axis.is_normalized());
        assert!(basis.y_axis.is_normalized());
        assert!(basis.z_axis.is_normalized());
        assert!(basis.x_axis.dot(basis.y_axis).abs() < 1e-9);
        assert!(basis.y_axis.dot(basis.z_axis).abs() < 1e-9);
        assert!(basis.x_axis.cross(basis.y_axis).approx_eq(basis.z_axis));
    }

    #[test]
    fn test_compound_rotation_uses_local_axes() {
        let start = Point3D::new(0.0, 1.0, 0.0);

        // Quarter turn about Z, then a quarter turn about the *local* X axis,
        // which now points along world +Y.
        let (p, basis) = Orientation::IDENTITY.rotate(start, DVec3::new(0.0, 0.0, FRAC_PI_2));
        let (p, _) = basis.rotate(p, DVec3::new(FRAC_PI_2, 0.0, 0.0));

        // The point sits on world -X after the first turn and rotating
        // about world +Y carries it to world +Z.
        assert!(p.approx_eq(&Point3D::new(0.0, 0.0, 1.0)));

        // Using world axes for the second turn gives a different answer.
        let (q, _) = Orientation::IDENTITY.rotate(start, DVec3::new(0.0, 0.0, FRAC_PI_2));
        let (q, _) = Orientation::IDENTITY.rotate(q, DVec3::new(FRAC_PI_2, 0.0, 0.0));
        assert!(!p.approx_eq(&q));
    }
}
