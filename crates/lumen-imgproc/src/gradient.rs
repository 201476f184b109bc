use std::f32::consts::PI;

use lumen_image::{ops::feature_normalize, Image, ImageError};

use crate::{
    color::hsv_to_rgb,
    filter::{convolve, kernels},
    parallel,
};

/// Gradient magnitude and orientation of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct SobelOutput {
    /// `sqrt(gx^2 + gy^2)`, one channel.
    pub magnitude: Image,
    /// `atan2(gy, gx)` mapped to `[0, 1)`, one channel. Zero means a gradient pointing to +x.
    pub orientation: Image,
}

/// Sobel derivatives `(gx, gy)`, each summed over the image channels into one channel.
pub fn sobel_gradients(src: &Image) -> Result<(Image, Image), ImageError> {
    let gx = convolve(src, &kernels::sobel_x_kernel(), false)?;
    let gy = convolve(src, &kernels::sobel_y_kernel(), false)?;
    Ok((gx, gy))
}

/// Map an angle in radians to a turn fraction in `[0, 1)`.
pub(crate) fn angle_to_unit(theta: f32) -> f32 {
    let t = (theta / (2.0 * PI)).rem_euclid(1.0);
    if t >= 1.0 {
        0.0
    } else {
        t
    }
}

/// Compute the Sobel gradient magnitude and orientation of an image.
///
/// # Example
///
/// ```
/// use lumen_image::Image;
/// use lumen_imgproc::gradient::sobel;
///
/// let image = Image::from_fn([6, 6].into(), 1, |x, _, _| if x < 3 { 0.0 } else { 1.0 });
/// let out = sobel(&image).unwrap();
///
/// assert_eq!(out.magnitude.get_pixel(2, 3, 0).unwrap(), 4.0);
/// assert_eq!(out.orientation.get_pixel(2, 3, 0).unwrap(), 0.0);
/// ```
pub fn sobel(src: &Image) -> Result<SobelOutput, ImageError> {
    let (gx, gy) = sobel_gradients(src)?;

    let mut magnitude = Image::from_size_val(src.size(), 1, 0.0);
    parallel::par_iter_rows_val_two(&gx, &gy, &mut magnitude, |x, y, dst| {
        *dst = x.hypot(*y);
    });

    let mut orientation = Image::from_size_val(src.size(), 1, 0.0);
    parallel::par_iter_rows_val_two(&gx, &gy, &mut orientation, |x, y, dst| {
        *dst = angle_to_unit(y.atan2(*x));
    });

    Ok(SobelOutput {
        magnitude,
        orientation,
    })
}

/// Render the gradient of an image as colour: hue encodes direction, saturation and value
/// encode the normalised magnitude.
pub fn colorize_sobel(src: &Image) -> Result<Image, ImageError> {
    let SobelOutput {
        mut magnitude,
        orientation,
    } = sobel(src)?;
    feature_normalize(&mut magnitude);

    let mut hsv = Image::from_size_val(src.size(), 3, 0.0);
    hsv.as_slice_mut()
        .chunks_exact_mut(3)
        .zip(orientation.iter().zip(magnitude.iter()))
        .for_each(|(pixel, (&h, &m))| {
            pixel[0] = h;
            pixel[1] = m;
            pixel[2] = m;
        });

    hsv_to_rgb(&mut hsv)?;
    Ok(hsv)
}
