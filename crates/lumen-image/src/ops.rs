use crate::{Image, ImageError};

fn check_same_shape(a: &Image, b: &Image) -> Result<(), ImageError> {
    if a.size() != b.size() {
        return Err(ImageError::InvalidImageSize(
            b.cols(),
            b.rows(),
            a.cols(),
            a.rows(),
        ));
    }
    if a.num_channels() != b.num_channels() {
        return Err(ImageError::InvalidChannelCount(
            a.num_channels(),
            b.num_channels(),
        ));
    }
    Ok(())
}

/// Add two images sample by sample into a new image. No clamping is applied.
///
/// # Errors
///
/// The images must have the same size and channel count.
pub fn add_image(a: &Image, b: &Image) -> Result<Image, ImageError> {
    check_same_shape(a, b)?;
    Ok(Image(a.element_wise_op(b, |x, y| x + y)?))
}

/// Subtract `b` from `a` sample by sample into a new image. No clamping is applied.
///
/// # Errors
///
/// The images must have the same size and channel count.
pub fn sub_image(a: &Image, b: &Image) -> Result<Image, ImageError> {
    check_same_shape(a, b)?;
    Ok(Image(a.element_wise_op(b, |x, y| x - y)?))
}

/// Scale each channel in place so that its samples sum to one.
///
/// A channel whose samples sum to zero is set to zero.
pub fn l1_normalize(image: &mut Image) {
    let channels = image.num_channels();
    if channels == 0 {
        return;
    }
    for ch in 0..channels {
        let sum: f32 = image
            .as_slice()
            .iter()
            .skip(ch)
            .step_by(channels)
            .sum();
        let factor = if sum == 0.0 { 0.0 } else { 1.0 / sum };
        image
            .as_slice_mut()
            .iter_mut()
            .skip(ch)
            .step_by(channels)
            .for_each(|v| *v *= factor);
    }
}

/// Rescale all samples in place to `[0, 1]` using the global minimum and maximum.
///
/// A constant image becomes all zeros.
pub fn feature_normalize(image: &mut Image) {
    let (min, max) = image
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range > 0.0 && range.is_finite() {
        image.iter_mut().for_each(|v| *v = (*v - min) / range);
    } else {
        image.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// Clamp every sample in place into `[-limit, limit]`.
pub fn constrain(image: &mut Image, limit: f32) {
    let limit = limit.abs();
    image.iter_mut().for_each(|v| *v = v.clamp(-limit, limit));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn add_sub_roundtrip() -> Result<(), ImageError> {
        let a = Image::from_fn([3, 2].into(), 3, |x, y, c| (x + 2 * y + c) as f32 * 0.1);
        let b = Image::from_fn([3, 2].into(), 3, |x, y, c| (x * y + c) as f32 * 0.3);
        let sum = add_image(&a, &b)?;
        let back = sub_image(&sum, &b)?;
        for (x, y) in back.iter().zip(a.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn add_size_mismatch() {
        let a = Image::from_size_val([3, 2].into(), 1, 0.0);
        let b = Image::from_size_val([2, 3].into(), 1, 0.0);
        assert_eq!(
            add_image(&a, &b),
            Err(ImageError::InvalidImageSize(2, 3, 3, 2))
        );
        let c = Image::from_size_val([3, 2].into(), 3, 0.0);
        assert_eq!(sub_image(&a, &c), Err(ImageError::InvalidChannelCount(1, 3)));
    }

    #[test]
    fn l1_normalize_per_channel() -> Result<(), ImageError> {
        let mut image = Image::new([2, 1].into(), 2, vec![1.0, 0.0, 3.0, 0.0])?;
        l1_normalize(&mut image);
        assert_eq!(image.as_slice(), &[0.25, 0.0, 0.75, 0.0]);
        Ok(())
    }

    #[test]
    fn l1_normalize_without_channels() {
        let mut image = Image::from_size_val([3, 2].into(), 0, 0.0);
        l1_normalize(&mut image);
        assert!(image.as_slice().is_empty());
    }

    #[test]
    fn feature_normalize_range() -> Result<(), ImageError> {
        let mut image = Image::new([4, 1].into(), 1, vec![-1.0, 0.0, 1.0, 3.0])?;
        feature_normalize(&mut image);
        assert_eq!(image.as_slice(), &[0.0, 0.25, 0.5, 1.0]);

        let mut flat = Image::from_size_val([2, 2].into(), 1, 0.7);
        feature_normalize(&mut flat);
        assert_eq!(flat.as_slice(), &[0.0; 4]);
        Ok(())
    }

    #[test]
    fn constrain_clamps_both_signs() -> Result<(), ImageError> {
        let mut image = Image::new([4, 1].into(), 1, vec![-9.0, -2.0, 2.0, 9.0])?;
        constrain(&mut image, 6.0);
        assert_eq!(image.as_slice(), &[-6.0, -2.0, 2.0, 6.0]);
        Ok(())
    }
}
