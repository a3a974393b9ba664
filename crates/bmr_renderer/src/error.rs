use bmr_core::ArgbImage;
use thiserror::Error;

/// Errors that can occur while setting up or finishing a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Base transform is not invertible (determinant {determinant})")]
    SingularBaseTransform { determinant: f64 },

    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Some chunks panicked. `image` holds every chunk that did finish;
    /// failed chunks keep their original pixels.
    #[error("{} render chunk(s) failed: {failed:?}", .failed.len())]
    ChunksFailed { failed: Vec<usize>, image: ArgbImage },
}

pub type RenderResult<T> = Result<T, RenderError>;
