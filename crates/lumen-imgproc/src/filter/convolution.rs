use crate::parallel;
use lumen_image::{Image, ImageError};

/// Convolve an image with a kernel.
///
/// The kernel is correlated with the image: output pixel `(x, y)` is the sum of
/// `kernel(i, j) * image(x + i - kw / 2, y + j - kh / 2)`, with image reads clamped to the
/// border. Odd kernel sizes are centred; for even sizes the centre is the lower-right of the
/// middle four taps.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - A kernel with 1 channel (shared by every image channel) or C channels (one
///   per image channel).
/// * `preserve` - Keep the C filtered channels. When false the filtered channels are summed
///   into a single channel.
///
/// # Returns
///
/// A new image of the same size with C or 1 channels.
///
/// # Errors
///
/// The kernel must be non-empty and have 1 or C channels; the image must not be empty.
///
/// # Example
///
/// ```
/// use lumen_image::Image;
/// use lumen_imgproc::filter::{convolve, kernels};
///
/// let image = Image::from_size_val([5, 5].into(), 3, 0.5);
/// let kernel = kernels::box_kernel(3).unwrap();
///
/// let blurred = convolve(&image, &kernel, true).unwrap();
/// assert_eq!(blurred.num_channels(), 3);
///
/// let summed = convolve(&image, &kernel, false).unwrap();
/// assert_eq!(summed.num_channels(), 1);
/// assert!((summed.as_slice()[0] - 1.5).abs() < 1e-6);
/// ```
pub fn convolve(src: &Image, kernel: &Image, preserve: bool) -> Result<Image, ImageError> {
    let channels = src.num_channels();
    let (kw, kh, kc) = (kernel.cols(), kernel.rows(), kernel.num_channels());

    if kernel.is_empty() {
        return Err(ImageError::InvalidKernelSize(kw, kh));
    }
    if kc != 1 && kc != channels {
        return Err(ImageError::KernelChannelMismatch(kc, channels));
    }
    if src.is_empty() {
        return Err(ImageError::EmptyImage);
    }
    if kw % 2 == 0 || kh % 2 == 0 {
        log::warn!("convolving with an even-sized {kw}x{kh} kernel");
    }

    let out_channels = if preserve { channels } else { 1 };
    let mut dst = Image::from_size_val(src.size(), out_channels, 0.0);

    let (cx, cy) = ((kw / 2) as i64, (kh / 2) as i64);
    let data = src.as_slice();
    let weights = kernel.as_slice();

    parallel::par_rows_mut(&mut dst, |y, row| {
        for (x, out) in row.chunks_exact_mut(out_channels).enumerate() {
            out.iter_mut().for_each(|v| *v = 0.0);
            for j in 0..kh {
                for i in 0..kw {
                    let (sx, sy) =
                        src.clamp_coords(x as i64 + i as i64 - cx, y as i64 + j as i64 - cy);
                    let pixel = &data[src.offset(sx, sy, 0)..][..channels];
                    let tap = &weights[kernel.offset(i, j, 0)..][..kc];
                    for (ch, &value) in pixel.iter().enumerate() {
                        let w = if kc == 1 { tap[0] } else { tap[ch] };
                        let o = if preserve { ch } else { 0 };
                        out[o] += w * value;
                    }
                }
            }
        }
    });

    Ok(dst)
}
