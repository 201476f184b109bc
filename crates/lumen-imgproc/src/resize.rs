use crate::interpolation::{sample_pixel, InterpolationMode};
use crate::parallel;
use lumen_image::{Image, ImageError, ImageSize};

/// Resize an image to a new size.
///
/// Output pixel `(x, y)` samples the source at the pixel-centre aligned coordinates
/// `sx = (x + 0.5) * w / W - 0.5` and `sy = (y + 0.5) * h / H - 0.5`, with the requested
/// interpolation. Any number of channels is supported and preserved.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `new_size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// A newly allocated image of `new_size`.
///
/// # Errors
///
/// A target with a zero dimension, or an empty source, is rejected.
///
/// # Example
///
/// ```
/// use lumen_image::{Image, ImageSize};
/// use lumen_imgproc::interpolation::InterpolationMode;
/// use lumen_imgproc::resize::resize;
///
/// let image = Image::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     3,
///     0.0,
/// );
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let image_resized = resize(&image, new_size, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize(
    src: &Image,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image, ImageError> {
    if new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::InvalidResizeTarget(
            new_size.width,
            new_size.height,
        ));
    }
    if src.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    log::debug!(
        "resize {} -> {} with {:?}",
        src.size(),
        new_size,
        interpolation
    );

    let channels = src.num_channels();
    let step_x = src.cols() as f32 / new_size.width as f32;
    let step_y = src.rows() as f32 / new_size.height as f32;

    let mut dst = Image::from_size_val(new_size, channels, 0.0);

    parallel::par_rows_mut(&mut dst, |y, row| {
        let v = (y as f32 + 0.5) * step_y - 0.5;
        row.chunks_exact_mut(channels)
            .enumerate()
            .for_each(|(x, pixel)| {
                let u = (x as f32 + 0.5) * step_x - 0.5;
                sample_pixel(src, u, v, pixel, interpolation);
            });
    });

    Ok(dst)
}

/// Resize with nearest-neighbour sampling. See [`resize`].
pub fn nn_resize(src: &Image, new_size: ImageSize) -> Result<Image, ImageError> {
    resize(src, new_size, InterpolationMode::Nearest)
}

/// Resize with bilinear sampling. See [`resize`].
pub fn bilinear_resize(src: &Image, new_size: ImageSize) -> Result<Image, ImageError> {
    resize(src, new_size, InterpolationMode::Bilinear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::from_size_val([4, 5].into(), 3, 0.5);
        let image_resized = resize(&image, [2, 3].into(), InterpolationMode::Bilinear)?;
        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size(), ImageSize::from([2, 3]));
        for v in image_resized.iter() {
            assert_relative_eq!(*v, 0.5);
        }
        Ok(())
    }

    #[test]
    fn nearest_upscale_duplicates() -> Result<(), ImageError> {
        let image = Image::from_rows([[0.0, 1.0], [2.0, 3.0]]);
        let up = nn_resize(&image, [4, 4].into())?;
        assert_eq!(
            up.as_slice(),
            &[
                0.0, 0.0, 1.0, 1.0, //
                0.0, 0.0, 1.0, 1.0, //
                2.0, 2.0, 3.0, 3.0, //
                2.0, 2.0, 3.0, 3.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn bilinear_upscale_blends() -> Result<(), ImageError> {
        let image = Image::from_rows([[0.0, 1.0]]);
        let up = bilinear_resize(&image, [4, 1].into())?;
        // sx = -0.25, 0.25, 0.75, 1.25
        let expected = [0.0, 0.25, 0.75, 1.0];
        for (a, b) in up.iter().zip(expected.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn zero_target_fails() {
        let image = Image::from_size_val([4, 4].into(), 1, 0.0);
        assert_eq!(
            resize(&image, [0, 3].into(), InterpolationMode::Nearest),
            Err(ImageError::InvalidResizeTarget(0, 3))
        );
        assert_eq!(
            resize(&image, [3, 0].into(), InterpolationMode::Bilinear),
            Err(ImageError::InvalidResizeTarget(3, 0))
        );
    }
}
