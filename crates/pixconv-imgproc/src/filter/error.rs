use pixconv_image::{ImageError, ImageSize};
use thiserror::Error;

use crate::parallel::ParallelError;

/// The ways a kernel or an image can have an unusable shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The kernel has no rows or columns.
    #[error("kernel side must be greater than zero")]
    ZeroKernelSide,

    /// The kernel side is even, so it has no center element.
    #[error("kernel side must be odd, got {0}")]
    EvenKernelSide(usize),

    /// The kernel weights do not fill a `side * side` matrix.
    #[error("kernel data length ({0}) does not match side * side ({1})")]
    KernelDataLength(usize, usize),

    /// The image covers no pixels.
    #[error("image must have a non-zero area, got {0}")]
    EmptyImage(ImageSize),

    /// The image is neither grayscale nor RGB.
    #[error("unsupported number of channels ({0}), expected 1 or 3")]
    UnsupportedChannels(usize),
}

/// An error type for the filter module.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel or the image has an invalid shape.
    #[error("invalid shape: {0}")]
    InvalidShape(#[from] ShapeError),

    /// A kernel weight is NaN or infinite.
    #[error("kernel weight at index {0} is not finite")]
    InvalidKernelWeight(usize),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(ImageError),

    /// Error coming from the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

impl FilterError {
    /// Whether this error reports an invalid kernel or image shape.
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, FilterError::InvalidShape(_))
    }
}

impl From<ImageError> for FilterError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::UnsupportedChannelCount(n) => {
                FilterError::InvalidShape(ShapeError::UnsupportedChannels(n))
            }
            err => FilterError::Image(err),
        }
    }
}
