#![deny(missing_docs)]
//! Image types for 8-bit grayscale and RGB buffers

/// image representation for filtering purposes.
pub mod image;

/// image with a channel layout picked at runtime.
pub mod dyn_image;

/// Error types for the image module.
pub mod error;

pub use crate::dyn_image::DynImage;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
