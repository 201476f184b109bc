use lumen_image::{Image, ImageError};

use crate::{draw, filter::smooth, gradient::sobel_gradients, parallel};

/// Weight of the squared trace in the cornerness measure.
const HARRIS_ALPHA: f32 = 0.06;

/// Side length of the patch descriptor.
const DESCRIPTOR_SIZE: i64 = 5;

/// Half-length of the cross drawn by [`mark_corners`].
const MARK_RADIUS: i64 = 9;

/// Parameters of the Harris corner detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarrisParams {
    /// Standard deviation of the gaussian weighting of the structure matrix.
    pub sigma: f32,
    /// Minimum cornerness for a pixel to be reported.
    pub threshold: f32,
    /// Radius of the non-maximum suppression window.
    pub nms_radius: usize,
}

impl Default for HarrisParams {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            threshold: 0.01,
            nms_radius: 3,
        }
    }
}

/// A detected corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    /// Column of the corner.
    pub x: usize,
    /// Row of the corner.
    pub y: usize,
    /// Cornerness at the corner.
    pub response: f32,
    /// 5x5 patch per channel, each entry the centre value minus the neighbour.
    pub descriptor: Vec<f32>,
}

/// Compute the structure matrix of an image.
///
/// Returns a 3-channel image holding `Ix^2`, `Iy^2` and `IxIy`, each smoothed with a
/// gaussian of the given sigma. Gradients are Sobel responses summed over the image channels.
pub fn structure_matrix(src: &Image, sigma: f32) -> Result<Image, ImageError> {
    let (gx, gy) = sobel_gradients(src)?;

    let mut products = Image::from_size_val(src.size(), 3, 0.0);
    products
        .as_slice_mut()
        .chunks_exact_mut(3)
        .zip(gx.iter().zip(gy.iter()))
        .for_each(|(s, (&ix, &iy))| {
            s[0] = ix * ix;
            s[1] = iy * iy;
            s[2] = ix * iy;
        });

    smooth(&products, sigma)
}

/// Estimate the cornerness `det(S) - 0.06 * trace(S)^2` of every pixel.
pub fn cornerness_response(structure: &Image) -> Result<Image, ImageError> {
    if structure.num_channels() != 3 {
        return Err(ImageError::InvalidChannelCount(
            3,
            structure.num_channels(),
        ));
    }
    let mut response = Image::from_size_val(structure.size(), 1, 0.0);
    parallel::par_iter_rows(structure, &mut response, |s, r| {
        let (xx, yy, xy) = (s[0], s[1], s[2]);
        let det = xx * yy - xy * xy;
        let trace = xx + yy;
        r[0] = det - HARRIS_ALPHA * trace * trace;
    });
    Ok(response)
}

/// Non-maximum suppression on a single-channel response map.
///
/// A pixel keeps its value only if no pixel within `radius` (Chebyshev distance, edge
/// clamped) is strictly larger; suppressed pixels become negative infinity.
pub fn nms(response: &Image, radius: usize) -> Result<Image, ImageError> {
    if response.num_channels() != 1 {
        return Err(ImageError::InvalidChannelCount(1, response.num_channels()));
    }
    let r = radius as i64;
    let mut out = Image::from_size_val(response.size(), 1, 0.0);
    parallel::par_rows_mut(&mut out, |y, row| {
        for (x, v) in row.iter_mut().enumerate() {
            let center = response.as_slice()[response.offset(x, y, 0)];
            let mut is_max = true;
            'window: for dy in -r..=r {
                for dx in -r..=r {
                    let (sx, sy) = response.clamp_coords(x as i64 + dx, y as i64 + dy);
                    if response.as_slice()[response.offset(sx, sy, 0)] > center {
                        is_max = false;
                        break 'window;
                    }
                }
            }
            *v = if is_max { center } else { f32::NEG_INFINITY };
        }
    });
    Ok(out)
}

/// Extract the centre-subtracted patch descriptor around a pixel.
///
/// # Errors
///
/// Returns [`ImageError::PixelIndexOutOfBounds`] if `(x, y)` is outside the image.
pub fn describe_point(src: &Image, x: usize, y: usize) -> Result<Vec<f32>, ImageError> {
    if x >= src.cols() || y >= src.rows() {
        return Err(ImageError::PixelIndexOutOfBounds(
            x,
            y,
            src.cols(),
            src.rows(),
        ));
    }
    let half = DESCRIPTOR_SIZE / 2;
    let channels = src.num_channels();
    let data = src.as_slice();
    let mut descriptor =
        Vec::with_capacity((DESCRIPTOR_SIZE * DESCRIPTOR_SIZE) as usize * channels);
    for ch in 0..channels {
        let center = data[src.offset(x, y, ch)];
        for dy in -half..=half {
            for dx in -half..=half {
                let (sx, sy) = src.clamp_coords(x as i64 + dx, y as i64 + dy);
                descriptor.push(center - data[src.offset(sx, sy, ch)]);
            }
        }
    }
    Ok(descriptor)
}

/// Detect Harris corners and describe them.
///
/// # Returns
///
/// The corners whose suppressed response reaches `params.threshold`, in row-major order.
pub fn harris_corners(src: &Image, params: &HarrisParams) -> Result<Vec<Corner>, ImageError> {
    let structure = structure_matrix(src, params.sigma)?;
    let response = cornerness_response(&structure)?;
    let suppressed = nms(&response, params.nms_radius)?;

    let cols = src.cols();
    let corners = suppressed
        .iter()
        .enumerate()
        .filter(|(_, &r)| r >= params.threshold)
        .map(|(i, &r)| {
            let (x, y) = (i % cols, i / cols);
            Ok(Corner {
                x,
                y,
                response: r,
                descriptor: describe_point(src, x, y)?,
            })
        })
        .collect::<Result<Vec<_>, ImageError>>()?;

    log::debug!("harris found {} corners", corners.len());

    Ok(corners)
}

/// Draw a cross on each corner, in place.
///
/// Channel 1 is set to zero and every other channel to one (magenta on RGB).
pub fn mark_corners(image: &mut Image, corners: &[Corner]) -> Result<(), ImageError> {
    let color: Vec<f32> = (0..image.num_channels())
        .map(|ch| if ch == 1 { 0.0 } else { 1.0 })
        .collect();
    for corner in corners {
        draw::draw_cross(
            image,
            (corner.x as i64, corner.y as i64),
            MARK_RADIUS,
            &color,
        )?;
    }
    Ok(())
}
