//! BMR Core - Cuboid models and pixel compositing.
//!
//! This crate provides:
//!
//! - **Compositing**: packed ARGB helpers, OpenGL style blend factors and
//!   [`BlendMode`] presets
//! - **Images**: [`ArgbImage`] buffers with `image` crate interop
//! - **Model types**: [`Face`], [`Cuboid`] and [`Model`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use bmr_core::{ArgbImage, Cuboid, Model};
//! use bmr_math::Point3D;
//!
//! let red = Arc::new(ArgbImage::filled(16, 16, 0xFFFF0000));
//! let cube = Cuboid::from_corners(
//!     Point3D::new(0.0, 0.0, 0.0),
//!     Point3D::new(16.0, 16.0, 16.0),
//!     &vec![Some(red); 6],
//! )?;
//! let mut model = Model::new(vec![cube]);
//! model.rotate(30.0, 45.0, 0.0, true);
//! assert_eq!(model.face_count(), 6);
//! # Ok::<(), bmr_core::CoreError>(())
//! ```

pub mod argb_image;
pub mod blend;
pub mod color;
pub mod cuboid;
pub mod error;
pub mod face;
pub mod model;

// Re-export commonly used types
pub use argb_image::{ArgbImage, ImageError, ImageResult};
pub use blend::{composite, BlendFactorKind, BlendMode, CompositeFactor};
pub use cuboid::{Cuboid, Direction};
pub use error::{CoreError, CoreResult};
pub use face::{Face, Z_FIGHT_TOLERANCE};
pub use model::{FaceRef, Model};
