use lumen_image::Image;

/// Kernel for bilinear interpolation
///
/// The four neighbours are `floor(u), floor(u) + 1` by `floor(v), floor(v) + 1`, each clamped
/// to the image, so an integral coordinate reproduces the source sample exactly.
pub(crate) fn bilinear_interpolation(image: &Image, u: f32, v: f32, dst: &mut [f32]) {
    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let (iu0, iv0) = image.clamp_coords(u0 as i64, v0 as i64);
    let (iu1, iv1) = image.clamp_coords(u0 as i64 + 1, v0 as i64 + 1);

    let data = image.as_slice();
    let channels = image.num_channels();

    let p00 = &data[image.offset(iu0, iv0, 0)..][..channels];
    let p01 = &data[image.offset(iu1, iv0, 0)..][..channels];
    let p10 = &data[image.offset(iu0, iv1, 0)..][..channels];
    let p11 = &data[image.offset(iu1, iv1, 0)..][..channels];

    for (k, out) in dst.iter_mut().enumerate() {
        *out = p00[k] * w00 + p01[k] * w01 + p10[k] * w10 + p11[k] * w11;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn integral_coordinates_are_exact() {
        let image = Image::from_rows([[0.0, 1.0], [2.0, 3.0]]);
        let mut out = [0.0];
        bilinear_interpolation(&image, 1.0, 1.0, &mut out);
        assert_eq!(out[0], 3.0);
        bilinear_interpolation(&image, 0.5, 0.5, &mut out);
        assert_relative_eq!(out[0], 1.5);
        bilinear_interpolation(&image, -3.0, 0.25, &mut out);
        assert_relative_eq!(out[0], 0.5);
    }
}
