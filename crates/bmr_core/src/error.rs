use thiserror::Error;

/// Errors raised while building or mutating models and images.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Image(#[from] crate::argb_image::ImageError),
}

impl CoreError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Fail with [`CoreError::InvalidArgument`] unless `len == expected`.
pub(crate) fn expect_len(what: &str, len: usize, expected: usize) -> CoreResult<()> {
    if len != expected {
        return Err(CoreError::invalid(format!(
            "{what} must have a length of {expected}, got {len}"
        )));
    }
    Ok(())
}
