#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// grayscale and RGB channel adaptation module.
pub mod color;

/// image filtering module.
pub mod filter;

/// border padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;
