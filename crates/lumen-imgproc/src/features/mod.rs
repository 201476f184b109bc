//! Feature detection and keypoint extraction.
//!
//! # Available Detectors
//!
//! - **Harris**: corners from the gaussian-weighted structure matrix, with a small patch
//!   descriptor per corner.

mod harris;
pub use harris::*;
