//! Model rasterization.
//!
//! Rendering happens in three steps:
//! - every face is baked in depth order and indexed by its model-space bounds
//! - the destination is cut into chunks, one pool job each
//! - each pixel composites the texels of every bake covering it
//!
//! Bakes and the index are shared read-only; each job works on its own copy
//! of its chunk's pixels and hands them back through the [`RenderTask`].

use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};

use bmr_core::{color, composite, ArgbImage, BlendMode, Model};
use bmr_math::{approx_eq, approx_gt, Affine2Ext, Point2D};
use glam::DAffine2;

use crate::bake::{bake_face, BakeResult};
use crate::bvh::SpatialIndex;
use crate::chunk::{generate_chunks, Chunk, DEFAULT_CHUNK_SIZE};
use crate::error::{RenderError, RenderResult};
use crate::pool::WorkerPool;
use crate::task::{ChunkMessage, RenderTask};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Resolve overlapping faces by depth instead of painting in order
    pub depth_aware: bool,
    /// How texels are blended onto the destination
    pub blend_mode: BlendMode,
    /// Pixels per worker job
    pub chunk_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            depth_aware: true,
            blend_mode: BlendMode::NORMAL,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_depth_aware(mut self, depth_aware: bool) -> Self {
        self.depth_aware = depth_aware;
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Bake every face of `model` in depth order, keeping only bakes with an
/// invertible transform.
pub fn bake_model(model: &Model, base: &DAffine2) -> Vec<BakeResult> {
    model
        .faces_by_depth()
        .filter_map(|(face, opposite)| bake_face(face, opposite, base))
        .filter(BakeResult::has_inverse_transform)
        .collect()
}

/// Everything a chunk job reads.
struct Scene {
    bakes: Vec<BakeResult>,
    index: SpatialIndex,
    base_inverse: DAffine2,
    width: usize,
    config: RenderConfig,
}

impl Scene {
    fn render_chunk(&self, chunk: Chunk, mut pixels: Vec<u32>) -> Vec<u32> {
        let mut candidates = Vec::new();
        for (offset, px) in pixels.iter_mut().enumerate() {
            let position = chunk.start + offset;
            let x = (position % self.width) as f64;
            let y = (position / self.width) as f64;
            *px = self.shade(x, y, *px, &mut candidates);
        }
        pixels
    }

    /// Final colour of destination pixel `(x, y)` that started as `original`.
    fn shade(&self, x: f64, y: f64, original: u32, candidates: &mut Vec<usize>) -> u32 {
        let model = self.base_inverse.apply(Point2D::new(x, y));
        let model = Point2D::new(model.x, -model.y);
        self.index.query_point(model, candidates);

        let mode = self.config.blend_mode;
        let mut color = original;
        let mut z = -f64::MAX;
        let mut tie_breaker = i32::MIN;

        for &i in candidates.iter() {
            let bake = &self.bakes[i];
            let Some(texel) = bake.sample(x, y) else {
                continue;
            };

            if !self.config.depth_aware {
                color = composite(texel, color, mode);
                continue;
            }

            if color::alpha(texel) > 0 {
                let depth = bake.depth_at(model.x, model.y);
                let tie = bake.depth_tie_breaker() as i32;
                if approx_gt(depth, z) || (approx_eq(depth, z) && tie > tie_breaker) {
                    tie_breaker = tie;
                    if depth > z {
                        z = depth;
                    }
                    color = if color::is_opaque(texel) {
                        texel
                    } else {
                        composite(texel, color, mode)
                    };
                }
            } else if !color::is_opaque(original) {
                // Transparent texel: let it show through from behind
                color = composite(color, texel, mode);
            }
        }
        color
    }
}

/// Render `model` onto `image` as seen through `base`.
///
/// `base` maps model XY (with y pointing up) to destination pixels. The
/// work is queued on `pool`; call [`RenderTask::join`] to get the image back.
pub fn render(
    model: &Model,
    image: ArgbImage,
    base: DAffine2,
    config: &RenderConfig,
    pool: &WorkerPool,
) -> RenderResult<RenderTask> {
    let base_inverse = base
        .try_inverse()
        .ok_or_else(|| RenderError::SingularBaseTransform {
            determinant: Affine2Ext::determinant(&base),
        })?;

    let bakes = bake_model(model, &base);
    let bounds = bakes.iter().map(|bake| *bake.bounds()).collect();
    let index = SpatialIndex::new(bounds);

    log::info!(
        "Rendering {}x{}: {} faces, {} baked",
        image.width(),
        image.height(),
        model.face_count(),
        bakes.len()
    );

    if index.is_empty() || image.is_empty() {
        return Ok(RenderTask::completed(image));
    }

    let chunks = generate_chunks(image.len(), config.chunk_size);
    let scene = Arc::new(Scene {
        bakes,
        index,
        base_inverse,
        width: image.width() as usize,
        config: *config,
    });

    log::debug!(
        "Dispatching {} chunks of {} pixels to {} workers",
        chunks.len(),
        config.chunk_size.max(1),
        pool.threads()
    );

    let (tx, rx) = mpsc::channel();
    for &chunk in &chunks {
        let scene = Arc::clone(&scene);
        let tx = tx.clone();
        let pixels = image.pixels()[chunk.range()].to_vec();
        pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| scene.render_chunk(chunk, pixels)))
                .map_err(|payload| panic_message(payload.as_ref()));
            // The task may have been dropped without joining
            let _ = tx.send(ChunkMessage { chunk, outcome });
        });
    }

    Ok(RenderTask::new(image, chunks, rx))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
