//! CIE LCh(ab) colour space, stored as normalised (H, C, L).
//!
//! RGB is linearised with a plain 2.2 gamma, mapped to XYZ with the sRGB D65 matrix and then
//! to CIE Lab. Hue is `atan2(b, a)` in degrees divided by 360, chroma is `hypot(a, b) / 100`
//! and luminance is `L* / 100`.

use crate::parallel;
use lumen_image::{Image, ImageError};

const GAMMA: f64 = 2.2;

/// Linear sRGB to XYZ, D65.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// D65 reference white.
const WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

const EPSILON: f64 = 0.008856;
const KAPPA: f64 = 903.3;

fn mat_vec(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// sign-preserving power so out-of-gamut negatives survive the round trip
fn signed_pow(v: f64, e: f64) -> f64 {
    v.signum() * v.abs().powf(e)
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    let f3 = f * f * f;
    if f3 > EPSILON {
        f3
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

/// Convert one RGB triplet to normalised (H, C, L).
pub fn rgb_to_hcl_pixel(rgb: [f32; 3]) -> [f32; 3] {
    let linear = rgb.map(|c| signed_pow(c as f64, GAMMA));
    let xyz = mat_vec(&RGB_TO_XYZ, linear);

    let fx = lab_f(xyz[0] / WHITE[0]);
    let fy = lab_f(xyz[1] / WHITE[1]);
    let fz = lab_f(xyz[2] / WHITE[2]);

    let l = 116.0 * fy - 16.0;
    let a = 500.0 * (fx - fy);
    let b = 200.0 * (fy - fz);

    let c = a.hypot(b);
    let h = b.atan2(a).to_degrees().rem_euclid(360.0);

    [(h / 360.0) as f32, (c / 100.0) as f32, (l / 100.0) as f32]
}

/// Convert one normalised (H, C, L) triplet back to RGB.
pub fn hcl_to_rgb_pixel(hcl: [f32; 3]) -> [f32; 3] {
    let h = (hcl[0] as f64 * 360.0).to_radians();
    let c = hcl[1] as f64 * 100.0;
    let l = hcl[2] as f64 * 100.0;

    let a = c * h.cos();
    let b = c * h.sin();

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let y = if l > KAPPA * EPSILON {
        fy * fy * fy
    } else {
        l / KAPPA
    };
    let xyz = [
        lab_f_inv(fx) * WHITE[0],
        y * WHITE[1],
        lab_f_inv(fz) * WHITE[2],
    ];

    mat_vec(&XYZ_TO_RGB, xyz).map(|v| signed_pow(v, 1.0 / GAMMA) as f32)
}

/// Convert an RGB image to normalised HCL in place.
///
/// # Errors
///
/// The image must have 3 channels.
pub fn rgb_to_hcl(image: &mut Image) -> Result<(), ImageError> {
    super::ensure_channels(image, 3)?;
    parallel::par_iter_pixels_mut(image, |pixel| {
        let hcl = rgb_to_hcl_pixel([pixel[0], pixel[1], pixel[2]]);
        pixel.copy_from_slice(&hcl);
    });
    Ok(())
}

/// Convert a normalised HCL image back to RGB in place.
///
/// # Errors
///
/// The image must have 3 channels.
pub fn hcl_to_rgb(image: &mut Image) -> Result<(), ImageError> {
    super::ensure_channels(image, 3)?;
    parallel::par_iter_pixels_mut(image, |pixel| {
        let rgb = hcl_to_rgb_pixel([pixel[0], pixel[1], pixel[2]]);
        pixel.copy_from_slice(&rgb);
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn white_and_black() {
        let white = rgb_to_hcl_pixel([1.0, 1.0, 1.0]);
        assert_abs_diff_eq!(white[1], 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(white[2], 1.0, epsilon = 1e-3);

        let black = rgb_to_hcl_pixel([0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(black[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(black[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn hue_is_normalised() {
        for rgb in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.3, 0.1, 0.9]] {
            let [h, c, _] = rgb_to_hcl_pixel(rgb);
            assert!((0.0..1.0).contains(&h));
            assert!(c > 0.0);
        }
    }

    #[test]
    fn hcl_roundtrip() -> Result<(), ImageError> {
        let steps = [0.0, 0.05, 0.3, 0.5, 0.77, 1.0];
        let mut data = Vec::new();
        for r in steps {
            for g in steps {
                for b in steps {
                    data.extend_from_slice(&[r, g, b]);
                }
            }
        }
        let original = Image::new([steps.len(), steps.len() * steps.len()].into(), 3, data)?;
        let mut image = original.clone();
        rgb_to_hcl(&mut image)?;
        hcl_to_rgb(&mut image)?;
        for (a, b) in image.iter().zip(original.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-3);
        }
        Ok(())
    }
}
