use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use lumen_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path.
///
/// Grayscale files give a 1-channel image, everything else is converted to RGB. Samples are
/// scaled to `[0, 1]`.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image(file_path: impl AsRef<Path>) -> Result<Image, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = match img.color() {
        image::ColorType::L8
        | image::ColorType::L16
        | image::ColorType::La8
        | image::ColorType::La16 => Image::new(size, 1, img.to_luma32f().into_raw())?,
        _ => Image::new(size, 3, img.into_rgb32f().into_raw())?,
    };

    log::debug!(
        "read {} ({}x{}x{})",
        file_path.display(),
        image.cols(),
        image.rows(),
        image.num_channels()
    );

    Ok(image)
}

/// Writes an image to the given file path.
///
/// Samples are clamped to `[0, 1]` and quantised to 8 bits; the format follows the file
/// extension.
///
/// # Errors
///
/// Only 1, 3 and 4 channel images can be written.
pub fn write_image(file_path: impl AsRef<Path>, image: &Image) -> Result<(), IoError> {
    let (width, height) = (image.cols() as u32, image.rows() as u32);
    let data: Vec<u8> = image
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();

    let channels = image.num_channels();
    let encoded = match channels {
        1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        _ => None,
    }
    .ok_or(IoError::UnsupportedChannels(channels))?;

    encoded.save(file_path)?;

    Ok(())
}
