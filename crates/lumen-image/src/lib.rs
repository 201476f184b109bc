#![deny(missing_docs)]
//! Image types for generating and manipulating floating-point images

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Whole-image arithmetic and normalization.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
