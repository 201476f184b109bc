use crate::parallel;
use lumen_image::{Image, ImageError};

/// Define the RGB weights for the grayscale conversion.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// # Arguments
///
/// * `src` - The input RGB image.
///
/// # Returns
///
/// A new single-channel image of the same size.
///
/// # Errors
///
/// The input image must have 3 channels.
///
/// # Example
///
/// ```
/// use lumen_image::{Image, ImageSize};
/// use lumen_imgproc::color::gray_from_rgb;
///
/// let image = Image::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     3,
///     1.0,
/// );
///
/// let gray = gray_from_rgb(&image).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn gray_from_rgb(src: &Image) -> Result<Image, ImageError> {
    super::ensure_channels(src, 3)?;

    let mut dst = Image::from_size_val(src.size(), 1, 0.0);

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0];
        let g = src_pixel[1];
        let b = src_pixel[2];
        dst_pixel[0] = RW * r + GW * g + BW * b;
    });

    Ok(dst)
}

/// Reduce an image of any channel count to a single intensity channel.
///
/// RGB images use [`gray_from_rgb`]; any other channel count is averaged. A single-channel
/// image is returned as a copy.
pub fn intensity(src: &Image) -> Result<Image, ImageError> {
    match src.num_channels() {
        0 => Err(ImageError::InvalidChannelCount(1, 0)),
        1 => Ok(src.clone()),
        3 => gray_from_rgb(src),
        channels => {
            let mut dst = Image::from_size_val(src.size(), 1, 0.0);
            parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
                dst_pixel[0] = src_pixel.iter().sum::<f32>() / channels as f32;
            });
            Ok(dst)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use lumen_image::{Image, ImageError};

    #[test]
    fn gray_from_rgb() -> Result<(), ImageError> {
        let image = Image::new(
            [2, 1].into(),
            3,
            vec![1.0, 0.0, 0.0, 0.2, 0.4, 0.6],
        )?;
        let gray = super::gray_from_rgb(&image)?;
        assert_eq!(gray.num_channels(), 1);
        assert_relative_eq!(gray.as_slice()[0], 0.299, epsilon = 1e-6);
        assert_relative_eq!(gray.as_slice()[1], 0.363, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn gray_requires_rgb() {
        let image = Image::from_size_val([2, 2].into(), 2, 0.0);
        assert_eq!(
            super::gray_from_rgb(&image),
            Err(ImageError::InvalidChannelCount(3, 2))
        );
    }

    #[test]
    fn intensity_averages_other_channels() -> Result<(), ImageError> {
        let image = Image::new([1, 1].into(), 2, vec![0.2, 0.6])?;
        let i = super::intensity(&image)?;
        assert_relative_eq!(i.as_slice()[0], 0.4, epsilon = 1e-6);

        let single = Image::from_size_val([2, 2].into(), 1, 0.3);
        assert_eq!(super::intensity(&single)?, single);
        Ok(())
    }
}
