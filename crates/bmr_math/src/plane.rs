use crate::{Point3D, Vector, EPSILON};

/// An infinite plane through `point` with unit `normal`.
///
/// Used as the analytic depth function of a baked face: looking down the
/// Z axis, [`Plane::depth_at`] returns the z where the vertical line through
/// `(x, y)` meets the plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub point: Point3D,
    pub normal: Vector,
}

impl Plane {
    pub fn new(point: Point3D, normal: Vector) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Plane through three points. Winding decides the normal's sign, which
    /// does not affect [`Plane::depth_at`].
    pub fn from_points(a: Point3D, b: Point3D, c: Point3D) -> Self {
        let normal = Vector::between(c, a).cross(Vector::between(b, a));
        Self::new(a, normal)
    }

    /// True when the plane is parallel to the Z axis (seen edge-on).
    pub fn is_edge_on(&self) -> bool {
        self.normal.z.abs() < EPSILON
    }

    /// Depth of the plane under `(x, y)`; negative infinity if edge-on.
    pub fn depth_at(&self, x: f64, y: f64) -> f64 {
        if self.is_edge_on() {
            return f64::NEG_INFINITY;
        }
        let n = self.normal;
        let p = self.point;
        // Ray (x, y, 0) + t * (0, 0, 1)
        let diff = Vector::new(x - p.x, y - p.y, -p.z);
        -diff.dot(n) / n.z
    }
}
