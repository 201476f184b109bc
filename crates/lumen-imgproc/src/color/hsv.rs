use crate::parallel;
use lumen_image::{Image, ImageError};

/// Convert one RGB triplet to HSV.
///
/// All components are in `[0, 1]`; the hue is normalised to `[0, 1)` and is zero for
/// achromatic input.
pub fn rgb_to_hsv_pixel(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        (g - b) / delta
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    // Ensure h is in the range [0, 1)
    let mut h = h / 6.0;
    if h < 0.0 {
        h += 1.0;
    }
    if h >= 1.0 {
        h -= 1.0;
    }

    [h, s, max]
}

/// Convert one HSV triplet back to RGB. The hue wraps around, so any real value is accepted.
pub fn hsv_to_rgb_pixel(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u8 {
        0 | 6 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Convert an RGB image to HSV in place.
///
/// # Arguments
///
/// * `image` - An image with 3 channels in the order R, G, B, replaced by H, S, V.
///
/// # Errors
///
/// The image must have 3 channels.
///
/// # Example
///
/// ```
/// use lumen_image::Image;
/// use lumen_imgproc::color::rgb_to_hsv;
///
/// let mut image = Image::new([1, 1].into(), 3, vec![0.0, 0.0, 1.0]).unwrap();
///
/// rgb_to_hsv(&mut image).unwrap();
///
/// assert!((image.as_slice()[0] - 2.0 / 3.0).abs() < 1e-6);
/// assert_eq!(&image.as_slice()[1..], &[1.0, 1.0]);
/// ```
pub fn rgb_to_hsv(image: &mut Image) -> Result<(), ImageError> {
    super::ensure_channels(image, 3)?;
    parallel::par_iter_pixels_mut(image, |pixel| {
        let hsv = rgb_to_hsv_pixel([pixel[0], pixel[1], pixel[2]]);
        pixel.copy_from_slice(&hsv);
    });
    Ok(())
}

/// Convert an HSV image to RGB in place.
///
/// # Errors
///
/// The image must have 3 channels.
pub fn hsv_to_rgb(image: &mut Image) -> Result<(), ImageError> {
    super::ensure_channels(image, 3)?;
    parallel::par_iter_pixels_mut(image, |pixel| {
        let rgb = hsv_to_rgb_pixel([pixel[0], pixel[1], pixel[2]]);
        pixel.copy_from_slice(&rgb);
    });
    Ok(())
}
