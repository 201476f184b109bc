use lumen_image::{
    ops::{add_image, sub_image},
    Image, ImageError,
};

use crate::filter::{convolve, kernels};

/// Low and high frequency components of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyBands {
    /// The gaussian-blurred image.
    pub low: Image,
    /// The residual `image - low`. Not clamped.
    pub high: Image,
}

/// Blur an image with a 2D gaussian kernel, keeping its channels.
pub fn low_pass(src: &Image, sigma: f32) -> Result<Image, ImageError> {
    convolve(src, &kernels::gaussian_kernel(sigma)?, true)
}

/// Split an image into its low and high frequency components.
///
/// # Example
///
/// ```
/// use lumen_image::Image;
/// use lumen_imgproc::frequency::{decompose, reconstruct};
///
/// let image = Image::from_fn([8, 8].into(), 3, |x, y, c| ((x + y + c) % 3) as f32 / 3.0);
/// let bands = decompose(&image, 1.0).unwrap();
/// let back = reconstruct(&bands).unwrap();
///
/// for (a, b) in back.iter().zip(image.iter()) {
///     assert!((a - b).abs() < 1e-5);
/// }
/// ```
pub fn decompose(src: &Image, sigma: f32) -> Result<FrequencyBands, ImageError> {
    let low = low_pass(src, sigma)?;
    let high = sub_image(src, &low)?;
    Ok(FrequencyBands { low, high })
}

/// Recombine the two bands, `low + high`.
pub fn reconstruct(bands: &FrequencyBands) -> Result<Image, ImageError> {
    add_image(&bands.low, &bands.high)
}

/// Compose a hybrid image from the low frequencies of `low_src` and the high frequencies of
/// `high_src`, clamped to `[0, 1]`.
///
/// # Errors
///
/// Both images must have the same size and channel count.
pub fn hybrid_image(
    low_src: &Image,
    high_src: &Image,
    low_sigma: f32,
    high_sigma: f32,
) -> Result<Image, ImageError> {
    let low = low_pass(low_src, low_sigma)?;
    let high = decompose(high_src, high_sigma)?.high;
    let mut hybrid = add_image(&low, &high)?;
    hybrid.clamp();
    Ok(hybrid)
}
