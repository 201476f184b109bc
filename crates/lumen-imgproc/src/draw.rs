use lumen_image::{Image, ImageError};

fn check_color(img: &Image, color: &[f32]) -> Result<(), ImageError> {
    if color.len() != img.num_channels() {
        return Err(ImageError::InvalidChannelCount(
            img.num_channels(),
            color.len(),
        ));
    }
    Ok(())
}

/// Set a pixel's color, ignoring points outside the image.
#[inline]
fn put_pixel(img: &mut Image, x: i64, y: i64, color: &[f32]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = img.offset(x as usize, y as usize, 0);
        img.as_slice_mut()[start..start + color.len()].copy_from_slice(color);
    }
}

/// Draws a line on an image inplace using Bresenham's line algorithm.
///
/// Points of the line that fall outside the image are skipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - One value per image channel.
///
/// # Errors
///
/// The color must have as many values as the image has channels.
pub fn draw_line(
    img: &mut Image,
    p0: (i64, i64),
    p1: (i64, i64),
    color: &[f32],
) -> Result<(), ImageError> {
    check_color(img, color)?;

    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        put_pixel(img, x0, y0, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }

    Ok(())
}

/// Draws a `+` shaped marker of half-length `radius` centred on a point.
pub fn draw_cross(
    img: &mut Image,
    center: (i64, i64),
    radius: i64,
    color: &[f32],
) -> Result<(), ImageError> {
    let (x, y) = center;
    draw_line(img, (x - radius, y), (x + radius, y), color)?;
    draw_line(img, (x, y - radius), (x, y + radius), color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_line() -> Result<(), ImageError> {
        let mut img = Image::from_size_val([5, 5].into(), 1, 0.0);
        draw_line(&mut img, (0, 0), (4, 4), &[1.0])?;
        #[rustfmt::skip]
        assert_eq!(
            img.as_slice(),
            &[
                1.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 1.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_line_clipped() -> Result<(), ImageError> {
        let mut img = Image::from_size_val([3, 2].into(), 3, 0.0);
        draw_line(&mut img, (-5, 1), (10, 1), &[0.0, 1.0, 0.5])?;
        assert!(img
            .as_slice()
            .chunks_exact(3)
            .skip(3)
            .all(|p| p == [0.0, 1.0, 0.5]));
        assert!(img.as_slice()[..9].iter().all(|v| *v == 0.0));
        Ok(())
    }

    #[test]
    fn test_draw_cross() -> Result<(), ImageError> {
        let mut img = Image::from_size_val([5, 5].into(), 1, 0.0);
        draw_cross(&mut img, (2, 2), 1, &[1.0])?;
        assert_eq!(img.iter().filter(|v| **v == 1.0).count(), 5);
        assert!(draw_cross(&mut img, (2, 2), 1, &[1.0, 0.0]).is_err());
        Ok(())
    }
}
