use crate::parallel;
use lumen_image::{Image, ImageError};

/// Summed-area table of an image, one table per channel.
///
/// Entry `(x, y)` holds the sum of every sample in `[0, x) x [0, y)`, so the table is one
/// larger than the image in each dimension. Sums are accumulated in `f64`.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    sums: Vec<f64>,
    width: usize,
    height: usize,
    channels: usize,
}

impl IntegralImage {
    fn at(&self, x: usize, y: usize, ch: usize) -> f64 {
        self.sums[(y * (self.width + 1) + x) * self.channels + ch]
    }

    /// Sum of the samples of channel `ch` in the half-open box `[x0, x1) x [y0, y1)`.
    ///
    /// Bounds are clipped to the image.
    pub fn box_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize, ch: usize) -> f64 {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);
        self.at(x1, y1, ch) - self.at(x0, y1, ch) - self.at(x1, y0, ch) + self.at(x0, y0, ch)
    }
}

/// Build the summed-area table of an image.
pub fn integral_image(src: &Image) -> IntegralImage {
    let (width, height, channels) = (src.cols(), src.rows(), src.num_channels());
    let stride = (width + 1) * channels;
    let mut sums = vec![0.0f64; (height + 1) * stride];

    for y in 0..height {
        for x in 0..width {
            for ch in 0..channels {
                let v = src.as_slice()[src.offset(x, y, ch)] as f64;
                let above = sums[y * stride + (x + 1) * channels + ch];
                let left = sums[(y + 1) * stride + x * channels + ch];
                let diag = sums[y * stride + x * channels + ch];
                sums[(y + 1) * stride + (x + 1) * channels + ch] = v + above + left - diag;
            }
        }
    }

    IntegralImage {
        sums,
        width,
        height,
        channels,
    }
}

/// Box-filter an image with an `s` x `s` window using a summed-area table.
///
/// Each output sample is the mean of the window `[x - s/2, x - s/2 + s)` (and likewise in
/// y) restricted to the pixels inside the image, so borders average fewer samples instead
/// of replicating edges.
///
/// # Errors
///
/// `s` must be at least one.
pub fn box_filter_integral(src: &Image, s: usize) -> Result<Image, ImageError> {
    if s == 0 {
        return Err(ImageError::InvalidKernelSize(s, s));
    }

    let table = integral_image(src);
    let channels = src.num_channels();
    let half = s / 2;

    let mut dst = Image::from_size_val(src.size(), channels, 0.0);
    parallel::par_rows_mut(&mut dst, |y, row| {
        let y0 = y.saturating_sub(half);
        let y1 = (y + s - half).min(src.rows());
        for (x, out) in row.chunks_exact_mut(channels).enumerate() {
            let x0 = x.saturating_sub(half);
            let x1 = (x + s - half).min(src.cols());
            let count = ((x1 - x0) * (y1 - y0)) as f64;
            for (ch, o) in out.iter_mut().enumerate() {
                *o = (table.box_sum(x0, y0, x1, y1, ch) / count) as f32;
            }
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn integral_sums() {
        let image = Image::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let table = integral_image(&image);
        assert_eq!(table.box_sum(0, 0, 3, 2, 0), 21.0);
        assert_eq!(table.box_sum(1, 0, 3, 2, 0), 16.0);
        assert_eq!(table.box_sum(1, 1, 2, 2, 0), 5.0);
        assert_eq!(table.box_sum(0, 0, 10, 10, 0), 21.0);
    }

    #[test]
    fn box_filter_matches_direct_mean() -> Result<(), ImageError> {
        let image = Image::from_fn([7, 6].into(), 2, |x, y, c| ((x * 5 + y * 3 + c) % 7) as f32);
        let out = box_filter_integral(&image, 3)?;
        for y in 0..6i64 {
            for x in 0..7i64 {
                for ch in 0..2 {
                    let mut sum = 0.0;
                    let mut count = 0.0;
                    for dy in -1..=1 {
                        for dx in -1..=1 {
                            let (sx, sy) = (x + dx, y + dy);
                            if (0..7).contains(&sx) && (0..6).contains(&sy) {
                                sum += image.get_pixel(sx, sy, ch)?;
                                count += 1.0;
                            }
                        }
                    }
                    assert_relative_eq!(out.get_pixel(x, y, ch)?, sum / count, epsilon = 1e-5);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn zero_window_fails() {
        let image = Image::from_size_val([2, 2].into(), 1, 0.0);
        assert!(box_filter_integral(&image, 0).is_err());
    }
}
