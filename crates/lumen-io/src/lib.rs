#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
pub mod error;

/// Reading and writing images.
///
/// Images are decoded with the `image` crate and converted to `f32` samples in `[0, 1]`.
pub mod functional;

/// Loading labelled image lists into a [`lumen_nn::dataset::Dataset`].
pub mod dataset;

pub use crate::error::IoError;
