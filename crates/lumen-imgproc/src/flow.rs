//! Lucas–Kanade optical flow.
//!
//! The flow between two frames is estimated from the time-structure matrix: per pixel
//! products of the spatial gradients `Ix`, `Iy` of the previous frame and the temporal
//! difference `It = current - previous`, averaged over a square window. Solving the 2x2
//! system `[[Ixx, Ixy], [Ixy, Iyy]] · [dx, dy] = -[Ixt, Iyt]` at each pixel gives the motion
//! in pixels per frame. Where the system is singular (flat or purely one-directional
//! texture) the flow is zero.
//!
//! A flow field is an [`Image`] with two channels, `dx` then `dy`.

use lumen_image::{ops::constrain, Image, ImageError};

use crate::{
    color::{hsv_to_rgb_pixel, intensity},
    draw,
    filter::{box_filter_integral, smooth},
    gradient::sobel_gradients,
    parallel,
};

/// Sobel responses are eight times the central-difference derivative.
const SOBEL_NORM: f32 = 1.0 / 8.0;

/// Below this determinant the structure matrix is treated as singular.
const DET_EPSILON: f32 = 1e-9;

/// Parameters of the sparse optical flow pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    /// Side of the box window aggregating the structure matrix.
    pub smooth: usize,
    /// Spacing of the grid on which the flow is solved.
    pub stride: usize,
    /// Flow components are clamped to `[-max_velocity, max_velocity]`.
    pub max_velocity: f32,
    /// Sigma of the gaussian smoothing applied to the clamped flow.
    pub post_sigma: f32,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            smooth: 15,
            stride: 8,
            max_velocity: 6.0,
            post_sigma: 2.0,
        }
    }
}

/// Compute the time-structure matrix of a frame pair.
///
/// # Arguments
///
/// * `current` - The later frame.
/// * `previous` - The earlier frame, same size as `current`.
/// * `smooth` - Side of the box window used to aggregate the products.
///
/// # Returns
///
/// A 5-channel image holding `Ixx`, `Iyy`, `Ixy`, `Ixt` and `Iyt`, in that order.
///
/// # Errors
///
/// The frames must have the same size and `smooth` must be at least one.
pub fn time_structure_matrix(
    current: &Image,
    previous: &Image,
    smooth: usize,
) -> Result<Image, ImageError> {
    if current.size() != previous.size() {
        return Err(ImageError::InvalidImageSize(
            current.cols(),
            current.rows(),
            previous.cols(),
            previous.rows(),
        ));
    }

    let current = intensity(current)?;
    let previous = intensity(previous)?;
    let (gx, gy) = sobel_gradients(&previous)?;

    let mut products = Image::from_size_val(current.size(), 5, 0.0);
    products
        .as_slice_mut()
        .chunks_exact_mut(5)
        .zip(gx.iter().zip(gy.iter()))
        .zip(current.iter().zip(previous.iter()))
        .for_each(|((s, (&gx, &gy)), (&cur, &prev))| {
            let ix = gx * SOBEL_NORM;
            let iy = gy * SOBEL_NORM;
            let it = cur - prev;
            s[0] = ix * ix;
            s[1] = iy * iy;
            s[2] = ix * iy;
            s[3] = ix * it;
            s[4] = iy * it;
        });

    box_filter_integral(&products, smooth)
}

/// Solve the 2x2 flow system for one structure sample.
fn solve_velocity(s: &[f32]) -> [f32; 2] {
    let (ixx, iyy, ixy, ixt, iyt) = (s[0], s[1], s[2], s[3], s[4]);
    let det = ixx * iyy - ixy * ixy;
    if det.abs() < DET_EPSILON {
        return [0.0, 0.0];
    }
    let vx = (-iyy * ixt + ixy * iyt) / det;
    let vy = (ixy * ixt - ixx * iyt) / det;
    [vx, vy]
}

/// Calculate the velocity on a strided grid of a time-structure matrix.
///
/// Output pixel `(i, j)` is solved at structure pixel
/// `(i * stride + (stride - 1) / 2, j * stride + (stride - 1) / 2)`; the output has
/// `w / stride` by `h / stride` pixels and 2 channels.
///
/// # Errors
///
/// The structure must have 5 channels and `stride` must be at least one.
pub fn velocity_image(structure: &Image, stride: usize) -> Result<Image, ImageError> {
    if structure.num_channels() != 5 {
        return Err(ImageError::InvalidChannelCount(
            5,
            structure.num_channels(),
        ));
    }
    if stride == 0 {
        return Err(ImageError::InvalidParameter(
            "flow stride must be at least 1".to_string(),
        ));
    }

    let size = [structure.cols() / stride, structure.rows() / stride];
    let offset = (stride - 1) / 2;

    log::debug!("velocity grid {}x{} (stride {stride})", size[0], size[1]);

    let mut velocity = Image::from_size_val(size.into(), 2, 0.0);
    parallel::par_rows_mut(&mut velocity, |j, row| {
        let sy = j * stride + offset;
        for (i, v) in row.chunks_exact_mut(2).enumerate() {
            let sx = i * stride + offset;
            let base = structure.offset(sx, sy, 0);
            v.copy_from_slice(&solve_velocity(&structure.as_slice()[base..base + 5]));
        }
    });

    Ok(velocity)
}

/// Calculate the optical flow between two frames on a strided grid.
///
/// Runs [`time_structure_matrix`] and [`velocity_image`], clamps the result to
/// `max_velocity` and smooths it with a gaussian of `post_sigma`.
///
/// # Returns
///
/// A 2-channel flow field of `w / stride` by `h / stride` pixels.
pub fn optical_flow(
    current: &Image,
    previous: &Image,
    params: &FlowParams,
) -> Result<Image, ImageError> {
    let structure = time_structure_matrix(current, previous, params.smooth)?;
    let mut velocity = velocity_image(&structure, params.stride)?;
    constrain(&mut velocity, params.max_velocity);
    smooth(&velocity, params.post_sigma)
}

/// Calculate the optical flow at every pixel, without clamping or smoothing.
///
/// # Example
///
/// ```
/// use lumen_image::Image;
/// use lumen_imgproc::flow::dense_optical_flow;
///
/// let frame = Image::from_size_val([16, 16].into(), 1, 0.5);
/// let flow = dense_optical_flow(&frame, &frame, 5).unwrap();
///
/// assert_eq!(flow.num_channels(), 2);
/// assert_eq!(flow.size(), frame.size());
/// assert!(flow.iter().all(|v| *v == 0.0));
/// ```
pub fn dense_optical_flow(
    current: &Image,
    previous: &Image,
    smooth: usize,
) -> Result<Image, ImageError> {
    let structure = time_structure_matrix(current, previous, smooth)?;
    velocity_image(&structure, 1)
}

/// Colour of a flow vector: hue follows its direction.
fn direction_color(dx: f32, dy: f32) -> [f32; 3] {
    let hue = dy.atan2(dx) / (2.0 * std::f32::consts::PI) + 0.5;
    hsv_to_rgb_pixel([hue, 1.0, 1.0])
}

/// Draw a flow field over an RGB image, in place.
///
/// One segment starts at the centre of each grid cell, `image.w / flow.w` pixels apart,
/// and points along `scale` times the local flow, coloured by direction. Components longer
/// than the image are dropped.
///
/// # Errors
///
/// The image must have 3 channels and the flow 2.
pub fn draw_flow(image: &mut Image, flow: &Image, scale: f32) -> Result<(), ImageError> {
    if image.num_channels() != 3 {
        return Err(ImageError::InvalidChannelCount(3, image.num_channels()));
    }
    if flow.num_channels() != 2 {
        return Err(ImageError::InvalidChannelCount(2, flow.num_channels()));
    }
    if flow.is_empty() {
        return Ok(());
    }

    let stride = (image.cols() / flow.cols()).max(1);
    let offset = (stride - 1) / 2;
    let (w, h) = (image.cols() as f32, image.rows() as f32);

    for fy in 0..flow.rows() {
        for fx in 0..flow.cols() {
            let (x, y) = (fx * stride + offset, fy * stride + offset);
            if x >= image.cols() || y >= image.rows() {
                continue;
            }
            let base = flow.offset(fx, fy, 0);
            let mut dx = scale * flow.as_slice()[base];
            let mut dy = scale * flow.as_slice()[base + 1];
            if dx.abs() > w {
                dx = 0.0;
            }
            if dy.abs() > h {
                dy = 0.0;
            }
            if dx == 0.0 && dy == 0.0 {
                continue;
            }
            let end = (
                (x as f32 + dx).round() as i64,
                (y as f32 + dy).round() as i64,
            );
            draw::draw_line(image, (x as i64, y as i64), end, &direction_color(dx, dy))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use lumen_image::ImageSize;

    #[test]
    fn solve_identity_structure() {
        // Ixx = Iyy = 1, Ixy = 0 -> v = -(Ixt, Iyt)
        assert_eq!(solve_velocity(&[1.0, 1.0, 0.0, -2.0, 0.5]), [2.0, -0.5]);
        assert_eq!(solve_velocity(&[1.0, 0.0, 0.0, -2.0, 0.5]), [0.0, 0.0]);
    }

    #[test]
    fn velocity_grid_size() -> Result<(), ImageError> {
        let structure = Image::from_size_val([20, 17].into(), 5, 0.0);
        let v = velocity_image(&structure, 8)?;
        assert_eq!(v.size(), ImageSize { width: 2, height: 2 });
        assert_eq!(v.num_channels(), 2);
        assert!(velocity_image(&structure, 0).is_err());
        assert!(velocity_image(&Image::from_size_val([4, 4].into(), 3, 0.0), 1).is_err());
        Ok(())
    }

    #[test]
    fn time_structure_size_mismatch() {
        let a = Image::from_size_val([8, 8].into(), 1, 0.0);
        let b = Image::from_size_val([8, 9].into(), 1, 0.0);
        assert_eq!(
            time_structure_matrix(&a, &b, 3),
            Err(ImageError::InvalidImageSize(8, 8, 8, 9))
        );
    }

    #[test]
    fn direction_colors() {
        // pointing along -x is hue 0 (red), along +x hue 0.5 (cyan)
        let left = direction_color(-1.0, 0.0);
        let right = direction_color(1.0, 0.0);
        assert_abs_diff_eq!(right[0], 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(right[2], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(left[0], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn draw_flow_marks_pixels() -> Result<(), ImageError> {
        let mut image = Image::from_size_val([16, 16].into(), 3, 0.0);
        let mut flow = Image::from_size_val([2, 2].into(), 2, 0.0);
        flow.set_pixel(0, 0, 0, 1.0)?;
        draw_flow(&mut image, &flow, 3.0)?;
        // stride 8, first cell centred at (3, 3), segment to (6, 3)
        for x in 3..=6 {
            assert!(image.get_pixel(x, 3, 1)? > 0.9);
        }
        assert_eq!(image.get_pixel(7, 3, 1)?, 0.0);
        assert_eq!(image.get_pixel(11, 11, 1)?, 0.0);
        assert!(draw_flow(&mut image, &Image::from_size_val([2, 2].into(), 3, 0.0), 1.0).is_err());
        Ok(())
    }
}
