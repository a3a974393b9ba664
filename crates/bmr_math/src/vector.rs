use std::ops::{Add, Mul, Neg, Sub};

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::{Point3D, EPSILON};

/// A direction in model space.
///
/// Numerically the same as [`Point3D`], kept separate so positions and
/// directions don't mix by accident. Arithmetic goes through glam.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0, 0.0);
    pub const X: Vector = Vector::new(1.0, 0.0, 0.0);
    pub const Y: Vector = Vector::new(0.0, 1.0, 0.0);
    pub const Z: Vector = Vector::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The vector pointing from `from` to `to`.
    pub fn between(from: Point3D, to: Point3D) -> Self {
        Self::new(to.x - from.x, to.y - from.y, to.z - from.z)
    }

    #[inline]
    fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.to_dvec3().dot(other.to_dvec3())
    }

    pub fn cross(self, other: Vector) -> Vector {
        self.to_dvec3().cross(other.to_dvec3()).into()
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(self) -> Vector {
        self.to_dvec3().normalize_or_zero().into()
    }

    pub fn length_squared(self) -> f64 {
        self.to_dvec3().length_squared()
    }

    pub fn length(self) -> f64 {
        self.to_dvec3().length()
    }

    pub fn is_normalized(self) -> bool {
        (self.length_squared() - 1.0).abs() < EPSILON
    }

    pub fn to_point(self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }

    /// Rotate counter-clockwise (right hand rule) around `axis` by `angle`
    /// radians. The axis does not need to be unit length.
    pub fn rotate_around_axis(self, axis: Vector, angle: f64) -> Vector {
        let axis = if axis.is_normalized() {
            axis.to_dvec3()
        } else {
            axis.to_dvec3().normalize_or_zero()
        };
        if axis == DVec3::ZERO {
            return self;
        }
        DQuat::from_axis_angle(axis, angle).mul_vec3(self.to_dvec3()).into()
    }

    pub fn rotate_around_x(self, angle: f64) -> Vector {
        DQuat::from_rotation_x(angle).mul_vec3(self.to_dvec3()).into()
    }

    pub fn rotate_around_y(self, angle: f64) -> Vector {
        DQuat::from_rotation_y(angle).mul_vec3(self.to_dvec3()).into()
    }

    pub fn rotate_around_z(self, angle: f64) -> Vector {
        DQuat::from_rotation_z(angle).mul_vec3(self.to_dvec3()).into()
    }

    pub fn approx_eq(self, other: Vector) -> bool {
        (self - other).length_squared() < EPSILON * EPSILON
    }
}

impl From<DVec3> for Vector {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for DVec3 {
    fn from(v: Vector) -> Self {
        v.to_dvec3()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        (self.to_dvec3() + rhs.to_dvec3()).into()
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        (self.to_dvec3() - rhs.to_dvec3()).into()
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        (self.to_dvec3() * rhs).into()
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_dot_and_cross() {
        assert_eq!(Vector::X.dot(Vector::Y), 0.0);
        assert_eq!(Vector::X.cross(Vector::Y), Vector::Z);
        assert_eq!(Vector::Y.cross(Vector::X), -Vector::Z);
    }

    #[test]
    fn test_normalize() {
        let v = Vector::new(3.0, 0.0, 4.0).normalize();
        assert!(v.is_normalized());
        assert!(v.approx_eq(Vector::new(0.6, 0.0, 0.8)));

        assert_eq!(Vector::ZERO.normalize(), Vector::ZERO);
    }

    #[test]
    fn test_rotate_around_axis_matches_fixed_axes() {
        let v = Vector::new(1.0, 2.0, 3.0);
        let angle = 0.7;

        assert!(v.rotate_around_axis(Vector::X, angle).approx_eq(v.rotate_around_x(angle)));
        assert!(v.rotate_around_axis(Vector::Y, angle).approx_eq(v.rotate_around_y(angle)));
        assert!(v.rotate_around_axis(Vector::Z, angle).approx_eq(v.rotate_around_z(angle)));
    }

    #[test]
    fn test_rotate_around_non_unit_axis() {
        // X rotated a quarter turn about +Z lands on +Y
        let rotated = Vector::X.rotate_around_axis(Vector::new(0.0, 0.0, 5.0), FRAC_PI_2);
        assert!(rotated.approx_eq(Vector::Y));
    }

    #[test]
    fn test_rotate_around_zero_axis_is_identity() {
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_eq!(v.rotate_around_axis(Vector::ZERO, 1.0), v);
    }

    #[test]
    fn test_between() {
        let v = Vector::between(Point3D::new(1.0, 1.0, 1.0), Point3D::new(2.0, 3.0, 4.0));
        assert_eq!(v, Vector::new(1.0, 2.0, 3.0));
        assert_eq!(Point3D::new(2.0, 3.0, 4.0) - Point3D::new(1.0, 1.0, 1.0), v);
    }
}
