use std::ops;

use lumen_tensor::Tensor3;

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use lumen_image::ImageSize;
///
/// let image_size = ImageSize {
///     width: 10,
///     height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with floating-point pixel data.
///
/// The image is a 3D tensor with shape (H, W, C) where H is the height, W the width and C
/// the number of channels. Samples are interleaved, so the channels of a pixel sit next to
/// each other in memory. Values are conventionally in `[0, 1]` but this is only enforced by
/// [`Image::clamp`].
///
/// The channel count is a runtime property: colour conversions keep 3 channels, the Sobel
/// and convolution outputs may collapse to 1, and a flow field carries 2.
#[derive(Clone, Debug, PartialEq)]
pub struct Image(pub Tensor3<f32>);

/// helper to deference the inner tensor
impl ops::Deref for Image {
    type Target = Tensor3<f32>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// helper to deference the inner tensor
impl ops::DerefMut for Image {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Image {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels per pixel.
    /// * `data` - The interleaved pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_image::{Image, ImageSize};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0f32; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self(Tensor3::from_shape_vec(
            [size.height, size.width, channels],
            data,
        )?))
    }

    /// Create a new image with every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_image::{Image, ImageSize};
    ///
    /// let image = Image::from_size_val([4, 2].into(), 1, 0.5);
    ///
    /// assert_eq!(image.as_slice(), &[0.5; 8]);
    /// ```
    pub fn from_size_val(size: ImageSize, channels: usize, val: f32) -> Self {
        Self(Tensor3::from_shape_val(
            [size.height, size.width, channels],
            val,
        ))
    }

    /// Create a single-channel image from a fixed grid of rows.
    ///
    /// Used to build constant kernels.
    ///
    /// ```
    /// use lumen_image::Image;
    ///
    /// let k = Image::from_rows([[0.0, 1.0, 0.0], [1.0, -4.0, 1.0]]);
    ///
    /// assert_eq!(k.width(), 3);
    /// assert_eq!(k.height(), 2);
    /// ```
    pub fn from_rows<const W: usize, const H: usize>(rows: [[f32; W]; H]) -> Self {
        Self(Tensor3::from_shape_fn([H, W, 1], |[y, x, _]| rows[y][x]))
    }

    /// Create an image by evaluating `f(x, y, ch)` for every sample.
    pub fn from_fn<F>(size: ImageSize, channels: usize, f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> f32,
    {
        Self(Tensor3::from_shape_fn(
            [size.height, size.width, channels],
            |[y, x, c]| f(x, y, c),
        ))
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.shape[1],
            height: self.shape[0],
        }
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.cols()
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.rows()
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.shape[2]
    }

    /// Whether the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.cols() == 0 || self.rows() == 0
    }

    /// Clamp signed pixel coordinates to the nearest valid pixel (edge replication).
    ///
    /// This is the only border policy of the crate: interpolation, convolution and gradients
    /// all read through it. The image must not be empty.
    #[inline]
    pub fn clamp_coords(&self, x: i64, y: i64) -> (usize, usize) {
        let max_x = self.cols().saturating_sub(1) as i64;
        let max_y = self.rows().saturating_sub(1) as i64;
        (x.clamp(0, max_x) as usize, y.clamp(0, max_y) as usize)
    }

    /// Offset of a sample in the interleaved buffer. Coordinates must be in bounds.
    #[inline]
    pub fn offset(&self, x: usize, y: usize, ch: usize) -> usize {
        (y * self.cols() + x) * self.num_channels() + ch
    }

    /// Read a sample with edge-clamped coordinates.
    ///
    /// Coordinates outside the image are replaced by the nearest border pixel, so `x` and `y`
    /// never fail. The channel is checked strictly.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ChannelIndexOutOfBounds`] for an invalid channel and
    /// [`ImageError::EmptyImage`] when there is no pixel to clamp to.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_image::Image;
    ///
    /// let image = Image::from_rows([[0.1, 0.2], [0.3, 0.4]]);
    ///
    /// assert_eq!(image.get_pixel(-5, 0, 0).unwrap(), 0.1);
    /// assert_eq!(image.get_pixel(9, 9, 0).unwrap(), 0.4);
    /// assert!(image.get_pixel(0, 0, 1).is_err());
    /// ```
    pub fn get_pixel(&self, x: i64, y: i64, ch: usize) -> Result<f32, ImageError> {
        if ch >= self.num_channels() {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.num_channels()));
        }
        if self.is_empty() {
            return Err(ImageError::EmptyImage);
        }
        let (x, y) = self.clamp_coords(x, y);
        Ok(self.as_slice()[self.offset(x, y, ch)])
    }

    /// Overwrite a sample in place.
    ///
    /// # Errors
    ///
    /// Unlike [`Image::get_pixel`] the coordinates must lie inside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: f32) -> Result<(), ImageError> {
        if x >= self.cols() || y >= self.rows() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.cols(),
                self.rows(),
            ));
        }
        if ch >= self.num_channels() {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.num_channels()));
        }
        let offset = self.offset(x, y, ch);
        self.as_slice_mut()[offset] = val;
        Ok(())
    }

    /// Get a channel of the image as a new single-channel image.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, ch: usize) -> Result<Image, ImageError> {
        let channels = self.num_channels();
        if ch >= channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, channels));
        }

        let data = self
            .as_slice()
            .chunks_exact(channels)
            .map(|pixel| pixel[ch])
            .collect();

        Image::new(self.size(), 1, data)
    }

    fn map_channel_inplace(
        &mut self,
        ch: usize,
        f: impl Fn(f32) -> f32,
    ) -> Result<(), ImageError> {
        let channels = self.num_channels();
        if ch >= channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, channels));
        }
        self.as_slice_mut()
            .chunks_exact_mut(channels)
            .for_each(|pixel| pixel[ch] = f(pixel[ch]));
        Ok(())
    }

    /// Add `amount` to every sample of one channel, in place and without clamping.
    pub fn shift(&mut self, ch: usize, amount: f32) -> Result<(), ImageError> {
        self.map_channel_inplace(ch, |v| v + amount)
    }

    /// Multiply every sample of one channel by `factor`, in place and without clamping.
    pub fn scale(&mut self, ch: usize, factor: f32) -> Result<(), ImageError> {
        self.map_channel_inplace(ch, |v| v * factor)
    }

    /// Force every sample into `[0, 1]` in place.
    pub fn clamp(&mut self) {
        self.iter_mut().for_each(|v| *v = v.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(ImageSize::from([10, 20]), image_size);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0f32; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.shape, [20, 10, 3]);
        Ok(())
    }

    #[test]
    fn image_new_wrong_length() {
        let res = Image::new([2, 2].into(), 3, vec![0.0; 11]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn get_pixel_clamps_coordinates() -> Result<(), ImageError> {
        let image = Image::from_fn([3, 2].into(), 2, |x, y, c| {
            (10 * y + x) as f32 + c as f32 * 0.5
        });
        assert_eq!(image.get_pixel(1, 1, 0)?, 11.0);
        assert_eq!(image.get_pixel(1, 1, 1)?, 11.5);
        assert_eq!(image.get_pixel(-1, -1, 0)?, 0.0);
        assert_eq!(image.get_pixel(5, 0, 0)?, 2.0);
        assert_eq!(image.get_pixel(2, 7, 1)?, 12.5);
        assert_eq!(
            image.get_pixel(0, 0, 2),
            Err(ImageError::ChannelIndexOutOfBounds(2, 2))
        );
        Ok(())
    }

    #[test]
    fn get_pixel_empty_image() {
        let image = Image::from_size_val([0, 3].into(), 1, 0.0);
        assert_eq!(image.get_pixel(0, 0, 0), Err(ImageError::EmptyImage));
    }

    #[test]
    fn set_pixel_is_strict() -> Result<(), ImageError> {
        let mut image = Image::from_size_val([2, 2].into(), 3, 0.0);
        image.set_pixel(1, 0, 2, 0.7)?;
        assert_eq!(image.get_pixel(1, 0, 2)?, 0.7);
        assert_eq!(
            image.set_pixel(2, 0, 0, 1.0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 2))
        );
        assert_eq!(
            image.set_pixel(0, 0, 3, 1.0),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        );
        Ok(())
    }

    #[test]
    fn shift_scale_clamp() -> Result<(), ImageError> {
        let mut image = Image::from_size_val([2, 1].into(), 3, 0.5);
        image.shift(0, 0.75)?;
        image.scale(1, 3.0)?;
        assert_eq!(image.as_slice(), &[1.25, 1.5, 0.5, 1.25, 1.5, 0.5]);

        image.shift(2, -0.75)?;
        image.clamp();
        assert_eq!(image.as_slice(), &[1.0, 1.0, 0.0, 1.0, 1.0, 0.0]);

        assert!(image.shift(3, 0.1).is_err());
        assert!(image.scale(5, 0.1).is_err());
        Ok(())
    }

    #[test]
    fn channel_extraction() -> Result<(), ImageError> {
        let image = Image::new([2, 1].into(), 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?;
        let g = image.channel(1)?;
        assert_eq!(g.num_channels(), 1);
        assert_eq!(g.as_slice(), &[1.0, 4.0]);
        assert!(image.channel(3).is_err());
        Ok(())
    }
}
