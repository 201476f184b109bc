use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use lumen_image::{Image, ImageError};

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Sample all channels of a pixel without checking the image or the output length.
pub(crate) fn sample_pixel(
    image: &Image,
    u: f32,
    v: f32,
    dst: &mut [f32],
    interpolation: InterpolationMode,
) {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, dst),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, dst),
    }
}

/// Kernel for interpolating all channels of a pixel.
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `dst` - The output pixel with C samples.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// The image must have at least one pixel and `dst` one slot per channel.
pub fn interpolate_pixel(
    image: &Image,
    u: f32,
    v: f32,
    dst: &mut [f32],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if image.is_empty() {
        return Err(ImageError::EmptyImage);
    }
    if dst.len() != image.num_channels() {
        return Err(ImageError::InvalidChannelCount(
            image.num_channels(),
            dst.len(),
        ));
    }
    sample_pixel(image, u, v, dst, interpolation);
    Ok(())
}
