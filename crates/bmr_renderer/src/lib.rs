//! BMR Renderer - Bake-and-composite software rasterizer
//!
//! Draws cuboid [`Model`](bmr_core::Model)s onto ARGB images without a
//! graphics API. Faces are baked into affine-mapped textures with an
//! analytic depth plane, indexed with a 2D BVH and composited per pixel on
//! a caller-owned [`WorkerPool`].
//!
//! # Example
//!
//! ```no_run
//! use bmr_core::{ArgbImage, Model};
//! use bmr_renderer::{render, RenderConfig, WorkerPool};
//! use glam::DAffine2;
//!
//! # fn main() -> Result<(), bmr_renderer::RenderError> {
//! let model = Model::default();
//! let pool = WorkerPool::new(0)?;
//! let task = render(
//!     &model,
//!     ArgbImage::new(64, 64),
//!     DAffine2::IDENTITY,
//!     &RenderConfig::default(),
//!     &pool,
//! )?;
//! let image = task.join()?;
//! # Ok(())
//! # }
//! ```

mod bake;
mod bvh;
mod chunk;
mod error;
mod pool;
mod renderer;
mod task;

pub use bake::{bake_face, BakeResult, MAX_DEGENERATE_RETRIES};
pub use bvh::{BvhNode, SpatialIndex};
pub use chunk::{generate_chunks, Chunk, DEFAULT_CHUNK_SIZE};
pub use error::{RenderError, RenderResult};
pub use pool::WorkerPool;
pub use renderer::{bake_model, render, RenderConfig};
pub use task::RenderTask;

/// Re-export common types from the lower crates
pub use bmr_core::{ArgbImage, BlendMode, Model};
pub use bmr_math::{DAffine2, DVec2};
