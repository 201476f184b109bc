//! Pixel interpolation methods for resampling images.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: rounds to the closest source pixel (no new values are created)
//! - **Bilinear**: blends the four surrounding pixels by their fractional distances
//!
//! Both read through [`lumen_image::Image::clamp_coords`], so coordinates outside the image
//! sample the border.

mod bilinear;
mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
pub(crate) use interpolate::sample_pixel;
