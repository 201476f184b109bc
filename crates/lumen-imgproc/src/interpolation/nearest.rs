use lumen_image::Image;

/// Kernel for nearest neighbor interpolation
///
/// Rounds the coordinates to the closest pixel and clamps to the image bounds.
pub(crate) fn nearest_neighbor_interpolation(image: &Image, u: f32, v: f32, dst: &mut [f32]) {
    let (iu, iv) = image.clamp_coords(u.round() as i64, v.round() as i64);
    let base = image.offset(iu, iv, 0);
    let channels = image.num_channels();
    dst.copy_from_slice(&image.as_slice()[base..base + channels]);
}
