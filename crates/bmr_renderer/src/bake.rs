//! Face baking.
//!
//! Baking turns one textured 3D quad into everything the compositor needs
//! per pixel: the lit texture, an affine map from texture space to the
//! destination image, its inverse, the face's depth plane and a model-space
//! bounding box for the spatial index.

use bmr_core::{ArgbImage, Face};
use bmr_math::{approx_ge, approx_lt, shear, Aabb, Affine2Ext, Plane, Point2D};
use glam::{DAffine2, DVec2};

/// Projected extent below which a quad is considered degenerate.
const DEGENERATE_EXTENT: f64 = 1e-10;

/// How far each corner is pushed per retry on a degenerate quad.
const DEGENERATE_NUDGE: f64 = 1e-4;

/// Give up on a degenerate quad after this many nudges.
pub const MAX_DEGENERATE_RETRIES: usize = 16;

/// A face prepared for compositing.
#[derive(Debug, Clone)]
pub struct BakeResult {
    texture: ArgbImage,
    transform: DAffine2,
    inverse: Option<DAffine2>,
    depth: Plane,
    depth_tie_breaker: i8,
    bounds: Aabb,
}

impl BakeResult {
    pub fn texture(&self) -> &ArgbImage {
        &self.texture
    }

    /// Texture space to destination pixels.
    pub fn transform(&self) -> &DAffine2 {
        &self.transform
    }

    /// Destination pixels to texture space, absent when the forward map is
    /// singular.
    pub fn inverse_transform(&self) -> Option<&DAffine2> {
        self.inverse.as_ref()
    }

    pub fn has_inverse_transform(&self) -> bool {
        self.inverse.is_some()
    }

    /// Depth of the face under model-space `(x, y)`.
    #[inline]
    pub fn depth_at(&self, x: f64, y: f64) -> f64 {
        self.depth.depth_at(x, y)
    }

    pub fn depth_tie_breaker(&self) -> i8 {
        self.depth_tie_breaker
    }

    /// Model-space XY bounds of the face.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Texel covering destination pixel `(x, y)`, or `None` if the pixel
    /// maps outside the texture.
    pub fn sample(&self, x: f64, y: f64) -> Option<u32> {
        let uv = self.inverse?.apply(Point2D::new(x, y));
        let w = self.texture.width() as f64;
        let h = self.texture.height() as f64;
        if !(approx_ge(uv.x, 0.0) && approx_lt(uv.x, w) && approx_ge(uv.y, 0.0) && approx_lt(uv.y, h)) {
            return None;
        }
        // Saturating casts clamp the epsilon slack below zero to 0
        self.texture.get(uv.x as u32, uv.y as u32)
    }
}

/// Bake `face` for the view `base`.
///
/// Returns `None` when the face has no image, is hidden behind `opposite`,
/// or stays degenerate after [`MAX_DEGENERATE_RETRIES`] nudges.
pub fn bake_face(face: &Face, opposite: Option<&Face>, base: &DAffine2) -> Option<BakeResult> {
    face.image()?;

    if let Some(opposite) = opposite {
        if face.is_culled_by(opposite) {
            return None;
        }
    }

    let texture = face.composed_image()?;

    let mut p = face.points().map(|point| point.project(true));
    let (w, h) = nudge_until_visible(&mut p)?;

    let dx1 = p[3].x - p[0].x;
    let dy1 = p[1].y - p[0].y;
    let dy2 = p[3].y - p[0].y;
    let dx2 = p[1].x - p[0].x;

    let mut scale_x = w / texture.width() as f64;
    let mut scale_y = h / texture.height() as f64;
    if dx2 < 0.0 {
        scale_x = -scale_x;
    }
    if dy2 < 0.0 {
        scale_y = -scale_y;
    }

    let transform = *base
        * DAffine2::from_translation(DVec2::new(p[0].x, p[0].y))
        * shear(dx1 / dy2, dy1 / dx2)
        * DAffine2::from_scale(DVec2::new(scale_x, scale_y));
    let inverse = transform.try_inverse();

    let bounds = Aabb::from_points(face.points().iter().map(|point| point.project(false)));

    Some(BakeResult {
        texture,
        transform,
        inverse,
        depth: face.plane(),
        depth_tie_breaker: face.priority(),
        bounds,
    })
}

/// Push the corners apart until the quad has a measurable width and height.
fn nudge_until_visible(p: &mut [Point2D; 4]) -> Option<(f64, f64)> {
    for attempt in 0..=MAX_DEGENERATE_RETRIES {
        let w = (p[1].x - p[0].x).abs();
        let h = (p[2].y - p[1].y).abs();
        if w >= DEGENERATE_EXTENT && h >= DEGENERATE_EXTENT {
            return Some((w, h));
        }
        if attempt == MAX_DEGENERATE_RETRIES {
            break;
        }
        for (i, corner) in p.iter_mut().enumerate() {
            let step = if i % 2 == 0 {
                DEGENERATE_NUDGE
            } else {
                -DEGENERATE_NUDGE
            };
            corner.x += step;
            corner.y += step;
        }
    }
    log::debug!("Skipping degenerate face at {:?}", p);
    None
}
