//! A single textured quad.
//!
//! Faces are the unit the rasterizer bakes. Each one keeps its four model
//! space corners in a fixed winding, a per-vertex [`Orientation`] so that
//! repeated rotations compose around the already rotated axes, and the
//! lighting ratio applied to its texture at bake time.

use std::sync::Arc;

use bmr_math::{Orientation, Plane, Point2D, Point3D, Vector};
use glam::DVec3;

use crate::argb_image::ArgbImage;
use crate::blend::BlendMode;
use crate::cuboid::Direction;
use crate::error::{expect_len, CoreResult};

/// Average z gap within which a higher priority face survives its opposite.
pub const Z_FIGHT_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Face {
    image: Option<Arc<ArgbImage>>,
    overlays: Vec<Arc<ArgbImage>>,
    overlay_blend_modes: Vec<Option<BlendMode>>,
    points: [Point3D; 4],
    axes: [Orientation; 4],
    opposite: Option<Direction>,
    priority: i8,
    light_ratio: f64,
}

impl Face {
    /// Create a face from four corners. Without an image it is never drawn.
    pub fn new(image: Option<Arc<ArgbImage>>, points: [Point3D; 4]) -> Self {
        Self {
            image,
            overlays: Vec::new(),
            overlay_blend_modes: Vec::new(),
            points,
            axes: [Orientation::IDENTITY; 4],
            opposite: None,
            priority: 1,
            light_ratio: 1.0,
        }
    }

    /// Like [`Face::new`] but from a slice, which must hold exactly 4 points.
    pub fn from_slice(image: Option<Arc<ArgbImage>>, points: &[Point3D]) -> CoreResult<Self> {
        expect_len("points", points.len(), 4)?;
        Ok(Self::new(image, [points[0], points[1], points[2], points[3]]))
    }

    pub fn image(&self) -> Option<&Arc<ArgbImage>> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<Arc<ArgbImage>>) {
        self.image = image;
    }

    pub fn overlays(&self) -> &[Arc<ArgbImage>] {
        &self.overlays
    }

    pub fn set_overlays(&mut self, overlays: Vec<Arc<ArgbImage>>) {
        self.overlays = overlays;
    }

    pub fn overlay_blend_modes(&self) -> &[Option<BlendMode>] {
        &self.overlay_blend_modes
    }

    /// Modes are matched to overlays by index; missing entries mean GLINT.
    pub fn set_overlay_blend_modes(&mut self, modes: Vec<Option<BlendMode>>) {
        self.overlay_blend_modes = modes;
    }

    /// Blend mode used for overlay layer `index`.
    pub fn overlay_blend_mode(&self, index: usize) -> BlendMode {
        self.overlay_blend_modes
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(BlendMode::GLINT)
    }

    pub fn points(&self) -> &[Point3D; 4] {
        &self.points
    }

    pub fn axes(&self) -> &[Orientation; 4] {
        &self.axes
    }

    /// Direction of the opposite face inside the owning cuboid.
    pub fn opposite(&self) -> Option<Direction> {
        self.opposite
    }

    pub(crate) fn set_opposite(&mut self, opposite: Option<Direction>) {
        self.opposite = opposite;
    }

    pub fn priority(&self) -> i8 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i8) {
        self.priority = priority;
    }

    pub fn light_ratio(&self) -> f64 {
        self.light_ratio
    }

    // --- Transforms ---

    /// Rotate about the model origin by `x`, `y`, `z` degrees around each
    /// vertex's local axes. With `save_axis` the rotated axes are kept so the
    /// next call composes on top of this one.
    pub fn rotate(&mut self, x: f64, y: f64, z: f64, save_axis: bool) {
        let angles = DVec3::new(x.to_radians(), y.to_radians(), z.to_radians());
        for (point, axes) in self.points.iter_mut().zip(self.axes.iter_mut()) {
            let (rotated, basis) = axes.rotate(*point, angles);
            *point = rotated;
            if save_axis {
                *axes = basis;
            }
        }
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        for point in &mut self.points {
            point.translate(x, y, z);
        }
    }

    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        for point in &mut self.points {
            point.scale(x, y, z);
        }
    }

    pub fn flip_about_plane(&mut self, x: bool, y: bool, z: bool) {
        for point in &mut self.points {
            point.flip_about_plane(x, y, z);
        }
    }

    /// Recompute the light ratio for a directional light.
    ///
    /// The result lies in `[0, min(max, 1)]`; a face turned fully away still
    /// receives `ambient`.
    pub fn update_lighting(&mut self, direction: Vector, ambient: f64, max: f64) {
        let [p0, p1, p2, _] = self.points;
        let normal = (p2 - p1).cross(p1 - p0).normalize();
        let mut dot = normal.dot(direction);
        dot = dot.signum() * dot * dot;
        dot = (dot + 1.0) / 2.0 * (1.0 - ambient);

        self.light_ratio = (ambient + dot).max(0.0).min(max.min(1.0));
    }

    // --- Queries ---

    fn fold_axis(&self, axis: impl Fn(&Point3D) -> f64, f: fn(f64, f64) -> f64) -> f64 {
        self.points.iter().map(axis).reduce(f).unwrap_or(0.0)
    }

    fn average_axis(&self, axis: impl Fn(&Point3D) -> f64) -> f64 {
        self.points.iter().map(axis).sum::<f64>() / self.points.len() as f64
    }

    pub fn average_x(&self) -> f64 {
        self.average_axis(|p| p.x)
    }

    pub fn average_y(&self) -> f64 {
        self.average_axis(|p| p.y)
    }

    pub fn average_z(&self) -> f64 {
        self.average_axis(|p| p.z)
    }

    pub fn min_x(&self) -> f64 {
        self.fold_axis(|p| p.x, f64::min)
    }

    pub fn min_y(&self) -> f64 {
        self.fold_axis(|p| p.y, f64::min)
    }

    pub fn min_z(&self) -> f64 {
        self.fold_axis(|p| p.z, f64::min)
    }

    pub fn max_x(&self) -> f64 {
        self.fold_axis(|p| p.x, f64::max)
    }

    pub fn max_y(&self) -> f64 {
        self.fold_axis(|p| p.y, f64::max)
    }

    pub fn max_z(&self) -> f64 {
        self.fold_axis(|p| p.z, f64::max)
    }

    pub fn center_point(&self) -> Point3D {
        Point3D::new(self.average_x(), self.average_y(), self.average_z())
    }

    /// Whether `(x, y)` falls inside the face projected onto the XY plane.
    pub fn is_within(&self, x: f64, y: f64) -> bool {
        let outline = self.points.map(|p| p.project(false));
        Point2D::new(x, y).is_inside(&outline)
    }

    /// The plane the face lies in.
    pub fn plane(&self) -> Plane {
        let [p0, p1, _, p3] = self.points;
        Plane::from_points(p0, p1, p3)
    }

    /// Depth of the face's plane under `(x, y)`.
    pub fn depth_at(&self, x: f64, y: f64) -> f64 {
        self.plane().depth_at(x, y)
    }

    /// True if both faces have the same corners, in any order.
    pub fn points_equal(&self, other: &Face) -> bool {
        other
            .points
            .iter()
            .all(|theirs| self.points.iter().any(|ours| ours.approx_eq(theirs)))
    }

    /// Whether this face is hidden behind `opposite`.
    ///
    /// A face that is not strictly in front of its opposite is culled, unless
    /// the two are z-fighting (within [`Z_FIGHT_TOLERANCE`]) and the opposite
    /// has the lower priority.
    pub fn is_culled_by(&self, opposite: &Face) -> bool {
        let ours = self.average_z();
        let theirs = opposite.average_z();
        if ours > theirs {
            return false;
        }
        let z_fighting = theirs - ours <= Z_FIGHT_TOLERANCE;
        !(z_fighting && opposite.priority < self.priority)
    }

    /// The face texture after lighting and overlays, or `None` if the face
    /// has no image.
    pub fn composed_image(&self) -> Option<ArgbImage> {
        let mut image = ArgbImage::clone(self.image.as_ref()?);
        image.multiply_rgb(self.light_ratio);
        for (i, overlay) in self.overlays.iter().enumerate() {
            image.composite_layer(overlay, self.overlay_blend_mode(i));
        }
        Some(image)
    }
}

/// Faces compare by image identity and corner positions; the opposite link
/// is ignored.
impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        let same_image = match (&self.image, &other.image) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_image && self.points == other.points
    }
}

/// Ordering key for depth sorting: ascending average z.
pub(crate) fn compare_depth(a: &Face, b: &Face) -> std::cmp::Ordering {
    a.average_z().total_cmp(&b.average_z())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(z: f64) -> [Point3D; 4] {
        [
            Point3D::new(0.0, 1.0, z),
            Point3D::new(1.0, 1.0, z),
            Point3D::new(1.0, 0.0, z),
            Point3D::new(0.0, 0.0, z),
        ]
    }

    fn solid(argb: u32) -> Arc<ArgbImage> {
        Arc::new(ArgbImage::filled(2, 2, argb))
    }

    #[test]
    fn test_from_slice_requires_four_points() {
        let points = unit_square(0.0);
        assert!(Face::from_slice(None, &points).is_ok());
        assert!(Face::from_slice(None, &points[..3]).is_err());
    }

    #[test]
    fn test_queries() {
        let face = Face::new(None, unit_square(2.0));

        assert_eq!(face.average_x(), 0.5);
        assert_eq!(face.average_z(), 2.0);
        assert_eq!(face.min_y(), 0.0);
        assert_eq!(face.max_x(), 1.0);
        assert_eq!(face.center_point(), Point3D::new(0.5, 0.5, 2.0));
        assert!(face.is_within(0.5, 0.5));
        assert!(!face.is_within(1.5, 0.5));
    }

    #[test]
    fn test_depth_at() {
        let face = Face::new(None, unit_square(5.0));
        assert!((face.depth_at(0.25, 0.75) - 5.0).abs() < 1e-9);
        assert!((face.depth_at(100.0, -3.0) - 5.0).abs() < 1e-9);

        let mut tilted = Face::new(None, unit_square(0.0));
        tilted.rotate(0.0, 45.0, 0.0, false);
        // A 45 degree turn about Y puts the square in the plane z = -x
        assert!((tilted.depth_at(0.5, 0.5) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_save_axis() {
        let mut saved = Face::new(None, unit_square(0.0));
        saved.rotate(0.0, 0.0, 90.0, true);
        saved.rotate(90.0, 0.0, 0.0, true);

        let mut unsaved = Face::new(None, unit_square(0.0));
        unsaved.rotate(0.0, 0.0, 90.0, false);
        unsaved.rotate(90.0, 0.0, 0.0, false);

        assert_eq!(unsaved.axes()[0], Orientation::IDENTITY);
        assert_ne!(saved.axes()[0], Orientation::IDENTITY);
        assert!(!saved.points()[0].approx_eq(&unsaved.points()[0]));
    }

    #[test]
    fn test_translate_scale_flip() {
        let mut face = Face::new(None, unit_square(1.0));
        face.translate(1.0, 0.0, 0.0);
        face.scale(2.0, 2.0, 2.0);
        face.flip_about_plane(true, true, false);

        assert_eq!(face.points()[0], Point3D::new(2.0, 2.0, -2.0));
        assert_eq!(face.average_z(), -2.0);
    }

    #[test]
    fn test_update_lighting() {
        // Winding gives a normal of +Z for this square
        let mut face = Face::new(None, unit_square(0.0));

        face.update_lighting(Vector::new(0.0, 0.0, 1.0), 0.2, 1.0);
        assert!((face.light_ratio() - 1.0).abs() < 1e-9);

        face.update_lighting(Vector::new(0.0, 0.0, -1.0), 0.2, 1.0);
        assert!((face.light_ratio() - 0.2).abs() < 1e-9);

        face.update_lighting(Vector::new(1.0, 0.0, 0.0), 0.2, 0.5);
        assert!((face.light_ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cull_symmetry() {
        let mut front = Face::new(None, unit_square(0.05));
        let mut back = Face::new(None, unit_square(0.0));

        // In front: never culled
        assert!(!front.is_culled_by(&back));
        // Within tolerance a higher priority face survives
        back.set_priority(5);
        front.set_priority(0);
        assert!(!back.is_culled_by(&front));

        // Coplanar: the higher priority face wins, and swapping flips it
        let mut a = Face::new(None, unit_square(0.0));
        let mut b = Face::new(None, unit_square(0.0));
        a.set_priority(1);
        b.set_priority(0);
        assert!(!a.is_culled_by(&b));
        assert!(b.is_culled_by(&a));

        a.set_priority(0);
        b.set_priority(1);
        assert!(a.is_culled_by(&b));
        assert!(!b.is_culled_by(&a));

        // Equal priorities: both culled
        b.set_priority(0);
        assert!(a.is_culled_by(&b));
        assert!(b.is_culled_by(&a));
    }

    #[test]
    fn test_cull_beyond_tolerance() {
        let mut near = Face::new(None, unit_square(0.0));
        let mut far = Face::new(None, unit_square(0.5));
        near.set_priority(1);
        far.set_priority(0);

        assert!(near.is_culled_by(&far));
        assert!(!far.is_culled_by(&near));
    }

    #[test]
    fn test_points_equal_ignores_order() {
        let a = Face::new(None, unit_square(0.0));
        let mut reversed = unit_square(0.0);
        reversed.reverse();
        let b = Face::new(None, reversed);

        assert!(a.points_equal(&b));
        assert_ne!(a, b);
        assert!(!a.points_equal(&Face::new(None, unit_square(1.0))));
    }

    #[test]
    fn test_equality_uses_image_identity() {
        let image = solid(0xFFFF0000);
        let a = Face::new(Some(image.clone()), unit_square(0.0));
        let b = Face::new(Some(image), unit_square(0.0));
        let c = Face::new(Some(solid(0xFFFF0000)), unit_square(0.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_composed_image() {
        assert!(Face::new(None, unit_square(0.0)).composed_image().is_none());

        let mut face = Face::new(Some(solid(0xFF804020)), unit_square(0.0));
        face.light_ratio = 0.5;
        face.set_overlays(vec![solid(0xFF101010)]);

        let composed = face.composed_image().unwrap();
        // Lit to 0x402010, then GLINT adds 16 * 16 / 255 = 1 per channel
        assert_eq!(composed.pixel(0, 0), 0xFF412111);

        face.set_overlay_blend_modes(vec![Some(BlendMode::REPLACE)]);
        let composed = face.composed_image().unwrap();
        assert_eq!(composed.pixel(1, 1), 0xFF101010);

        // The shared source image is never modified
        assert_eq!(face.image().unwrap().pixel(0, 0), 0xFF804020);
    }
}
