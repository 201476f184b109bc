use crate::parallel;
use lumen_image::{Image, ImageError};

use super::kernels;

/// Apply a separable filter to an image.
///
/// Equivalent to [`super::convolve`] with the outer product `kernel_y ⊗ kernel_x` and
/// `preserve = true`, computed as a horizontal pass followed by a vertical pass. Borders are
/// clamped.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter(
    src: &Image,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<Image, ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelSize(kernel_x.len(), kernel_y.len()));
    }
    if src.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    let channels = src.num_channels();
    let half_x = (kernel_x.len() / 2) as i64;
    let half_y = (kernel_y.len() / 2) as i64;

    // horizontal pass
    let mut tmp = Image::from_size_val(src.size(), channels, 0.0);
    parallel::par_rows_mut(&mut tmp, |y, row| {
        for (x, out) in row.chunks_exact_mut(channels).enumerate() {
            for (i, &w) in kernel_x.iter().enumerate() {
                let (sx, sy) = src.clamp_coords(x as i64 + i as i64 - half_x, y as i64);
                let pixel = &src.as_slice()[src.offset(sx, sy, 0)..][..channels];
                out.iter_mut().zip(pixel).for_each(|(o, &p)| *o += w * p);
            }
        }
    });

    // vertical pass
    let mut dst = Image::from_size_val(src.size(), channels, 0.0);
    parallel::par_rows_mut(&mut dst, |y, row| {
        for (x, out) in row.chunks_exact_mut(channels).enumerate() {
            for (j, &w) in kernel_y.iter().enumerate() {
                let (sx, sy) = tmp.clamp_coords(x as i64, y as i64 + j as i64 - half_y);
                let pixel = &tmp.as_slice()[tmp.offset(sx, sy, 0)..][..channels];
                out.iter_mut().zip(pixel).for_each(|(o, &p)| *o += w * p);
            }
        }
    });

    Ok(dst)
}

/// Blur an image with a separable gaussian of the given sigma.
///
/// # Errors
///
/// `sigma` must be positive and finite.
pub fn smooth(src: &Image, sigma: f32) -> Result<Image, ImageError> {
    let kernel = kernels::gaussian_kernel_1d(sigma)?;
    separable_filter(src, &kernel, &kernel)
}
