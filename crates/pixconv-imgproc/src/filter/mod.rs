//! Filter operations
//!
//! This module provides the 2D convolution engine and the registry of named filters.

/// Error types for the filter module.
mod error;
pub use error::*;

/// Filter kernels
mod kernels;
pub use kernels::*;

/// 2D convolution with edge replication
mod convolution;
pub use convolution::*;

/// Named filter registry
mod registry;
pub use registry::*;
