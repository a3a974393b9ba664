use std::ops::Sub;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::{approx_eq, Vector};

/// A position in model space.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const ORIGIN: Point3D = Point3D::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The direction from the origin to this point.
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y, self.z)
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.x += x;
        self.y += y;
        self.z += z;
    }

    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        self.x *= x;
        self.y *= y;
        self.z *= z;
    }

    /// Reflect through the plane picked by two of the three selectors.
    ///
    /// `(y, z)` mirrors across the YZ plane (negates x), `(x, z)` negates y,
    /// `(x, y)` negates z. A single selector does nothing.
    pub fn flip_about_plane(&mut self, x: bool, y: bool, z: bool) {
        if y && z {
            self.x = -self.x;
        }
        if x && z {
            self.y = -self.y;
        }
        if x && y {
            self.z = -self.z;
        }
    }

    /// Drop the z coordinate. With `flip_y` the y axis is negated so model
    /// "up" becomes screen "up" in a top-left origin image.
    pub fn project(self, flip_y: bool) -> Point2D {
        Point2D::new(self.x, if flip_y { -self.y } else { self.y })
    }

    /// Component-wise equality within epsilon.
    pub fn approx_eq(&self, other: &Point3D) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl From<DVec3> for Point3D {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3D> for DVec3 {
    fn from(p: Point3D) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl Sub for Point3D {
    type Output = Vector;

    fn sub(self, rhs: Point3D) -> Vector {
        Vector::between(rhs, self)
    }
}

/// A position on the projection plane.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Even-odd containment test against a closed polygon.
    ///
    /// Points exactly on a left or bottom edge count as inside, points on a
    /// right or top edge do not.
    pub fn is_inside(&self, polygon: &[Point2D]) -> bool {
        let Some(mut last) = polygon.last().copied() else {
            return false;
        };
        let mut inside = false;
        for &cur in polygon {
            if (cur.y > self.y) != (last.y > self.y) {
                let cross_x = cur.x + (self.y - cur.y) / (last.y - cur.y) * (last.x - cur.x);
                if self.x < cross_x {
                    inside = !inside;
                }
            }
            last = cur;
        }
        inside
    }
}

impl From<DVec2> for Point2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2D> for DVec2 {
    fn from(p: Point2D) -> Self {
        DVec2::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_and_scale() {
        let mut p = Point3D::new(1.0, 2.0, 3.0);
        p.translate(1.0, -2.0, 0.5);
        assert_eq!(p, Point3D::new(2.0, 0.0, 3.5));

        p.scale(2.0, 5.0, -1.0);
        assert_eq!(p, Point3D::new(4.0, 0.0, -3.5));
    }

    #[test]
    fn test_flip_about_plane() {
        let original = Point3D::new(1.0, 2.0, 3.0);

        let mut p = original;
        p.flip_about_plane(false, true, true);
        assert_eq!(p, Point3D::new(-1.0, 2.0, 3.0));

        let mut p = original;
        p.flip_about_plane(true, false, true);
        assert_eq!(p, Point3D::new(1.0, -2.0, 3.0));

        let mut p = original;
        p.flip_about_plane(true, true, false);
        assert_eq!(p, Point3D::new(1.0, 2.0, -3.0));

        // One selector alone is not a plane
        let mut p = original;
        p.flip_about_plane(true, false, false);
        assert_eq!(p, original);
    }

    #[test]
    fn test_project() {
        let p = Point3D::new(3.0, 4.0, 9.0);
        assert_eq!(p.project(false), Point2D::new(3.0, 4.0));
        assert_eq!(p.project(true), Point2D::new(3.0, -4.0));
    }

    #[test]
    fn test_is_inside() {
        let square = [
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
        ];
        assert!(Point2D::new(1.0, 1.0).is_inside(&square));
        assert!(Point2D::new(0.0, 0.5).is_inside(&square));
        assert!(!Point2D::new(2.0, 0.5).is_inside(&square));
        assert!(!Point2D::new(3.0, 1.0).is_inside(&square));
        assert!(!Point2D::new(1.0, 1.0).is_inside(&[]));

        let triangle = [
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(0.0, 4.0),
        ];
        assert!(Point2D::new(1.0, 1.0).is_inside(&triangle));
        assert!(!Point2D::new(3.0, 3.0).is_inside(&triangle));
    }

    #[test]
    fn test_approx_eq() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        assert!(a.approx_eq(&Point3D::new(1.0 + 1e-8, 2.0, 3.0 - 1e-8)));
        assert!(!a.approx_eq(&Point3D::new(1.001, 2.0, 3.0)));
    }
}
