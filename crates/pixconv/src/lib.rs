//! Spatial convolution filters for 8-bit grayscale and RGB images.
//!
//! The [`image`] and [`imgproc`] crates hold the engine. [`FilterService`] is the entry
//! point for applications that select filters by name.

#[doc(inline)]
pub use pixconv_image as image;

#[doc(inline)]
pub use pixconv_imgproc as imgproc;

/// Filter service configuration.
pub mod config;

/// Named filter service with logging.
pub mod service;

pub use config::{ConfigError, FilterConfig, StrategyConfig};
pub use service::FilterService;
