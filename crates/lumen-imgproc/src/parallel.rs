use rayon::prelude::*;

use lumen_image::Image;

/// Apply a function to each pixel of `src`, writing the matching pixel of `dst`, in parallel
/// over rows.
///
/// Both images must have the same size; the channel counts may differ.
pub fn par_iter_rows(src: &Image, dst: &mut Image, f: impl Fn(&[f32], &mut [f32]) + Send + Sync) {
    let (c1, c2, cols) = (src.num_channels(), dst.num_channels(), src.cols());
    if src.is_empty() || c1 == 0 || c2 == 0 {
        return;
    }
    src.as_slice()
        .par_chunks_exact(c1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(c2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(c1)
                .zip(dst_chunk.chunks_exact_mut(c2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each sample of `src`, writing the matching sample of `dst`, in
/// parallel over rows.
///
/// Both images must have the same shape.
pub fn par_iter_rows_val(src: &Image, dst: &mut Image, f: impl Fn(&f32, &mut f32) + Send + Sync) {
    let row = src.num_channels() * src.cols();
    if row == 0 {
        return;
    }
    src.as_slice()
        .par_chunks_exact(row)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(row))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_val, dst_val)| {
                    f(src_val, dst_val);
                });
        });
}

/// Apply a function to each pair of samples of two images in parallel over rows.
///
/// All three images must have the same shape.
pub fn par_iter_rows_val_two(
    src1: &Image,
    src2: &Image,
    dst: &mut Image,
    f: impl Fn(&f32, &f32, &mut f32) + Send + Sync,
) {
    let row = src1.num_channels() * src1.cols();
    if row == 0 {
        return;
    }
    src1.as_slice()
        .par_chunks_exact(row)
        .zip(src2.as_slice().par_chunks_exact(row))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(row))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((a, b), dst_val)| {
                    f(a, b, dst_val);
                });
        });
}

/// Apply a function to each pixel of an image in place, in parallel over rows.
pub fn par_iter_pixels_mut(image: &mut Image, f: impl Fn(&mut [f32]) + Send + Sync) {
    let channels = image.num_channels();
    let row = channels * image.cols();
    if row == 0 {
        return;
    }
    image
        .as_slice_mut()
        .par_chunks_exact_mut(row)
        .for_each(|chunk| chunk.chunks_exact_mut(channels).for_each(&f));
}

/// Fill the rows of `dst` in parallel. The closure receives the row index and the row's
/// interleaved samples.
pub fn par_rows_mut(dst: &mut Image, f: impl Fn(usize, &mut [f32]) + Send + Sync) {
    let row = dst.num_channels() * dst.cols();
    if row == 0 {
        return;
    }
    dst.as_slice_mut()
        .par_chunks_exact_mut(row)
        .enumerate()
        .for_each(|(y, chunk)| f(y, chunk));
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_image::ImageError;

    #[test]
    fn rows_pixelwise() -> Result<(), ImageError> {
        let src = Image::new([2, 2].into(), 2, (0..8).map(|v| v as f32).collect())?;
        let mut dst = Image::from_size_val(src.size(), 1, 0.0);
        par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[1]);
        assert_eq!(dst.as_slice(), &[1.0, 5.0, 9.0, 13.0]);
        Ok(())
    }

    #[test]
    fn rows_two_sources() -> Result<(), ImageError> {
        let a = Image::from_size_val([3, 2].into(), 1, 2.0);
        let b = Image::from_fn([3, 2].into(), 1, |x, y, _| (x + y) as f32);
        let mut dst = Image::from_size_val([3, 2].into(), 1, 0.0);
        par_iter_rows_val_two(&a, &b, &mut dst, |a, b, d| *d = a * b);
        assert_eq!(dst.as_slice(), &[0.0, 2.0, 4.0, 2.0, 4.0, 6.0]);

        let mut neg = Image::from_size_val([3, 2].into(), 1, 0.0);
        par_iter_rows_val(&dst, &mut neg, |s, d| *d = -s);
        assert_eq!(neg.as_slice(), &[-0.0, -2.0, -4.0, -2.0, -4.0, -6.0]);
        Ok(())
    }

    #[test]
    fn rows_with_index() {
        let mut dst = Image::from_size_val([2, 3].into(), 1, 0.0);
        par_rows_mut(&mut dst, |y, row| row.iter_mut().for_each(|v| *v = y as f32));
        assert_eq!(dst.as_slice(), &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn empty_image_is_noop() {
        let mut dst = Image::from_size_val([0, 0].into(), 3, 0.0);
        par_iter_pixels_mut(&mut dst, |p| p[0] = 1.0);
        assert!(dst.as_slice().is_empty());
    }
}
