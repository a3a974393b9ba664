// Re-export glam for convenience
pub use glam::*;

// BMR math types
mod aabb;
mod epsilon;
mod interval;
mod orientation;
mod plane;
mod point;
mod transform;
mod vector;

pub use aabb::Aabb;
pub use epsilon::{approx_eq, approx_ge, approx_gt, approx_le, approx_lt, EPSILON};
pub use interval::Interval;
pub use orientation::Orientation;
pub use plane::Plane;
pub use point::{Point2D, Point3D};
pub use transform::{shear, Affine2Ext, SINGULAR_DETERMINANT};
pub use vector::Vector;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vector_interop() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(4.0, 6.0, 3.0);
        let v = Vector::between(a, b);
        assert_eq!(v, Vector::new(3.0, 4.0, 0.0));
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_glam_reexport() {
        let p: DVec3 = Point3D::new(1.0, 2.0, 3.0).into();
        assert_eq!(p, DVec3::new(1.0, 2.0, 3.0));
    }
}
