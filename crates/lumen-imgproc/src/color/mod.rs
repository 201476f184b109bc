mod gray;
mod hcl;
mod hsv;

pub use gray::{gray_from_rgb, intensity};
pub use hcl::{hcl_to_rgb, hcl_to_rgb_pixel, rgb_to_hcl, rgb_to_hcl_pixel};
pub use hsv::{hsv_to_rgb, hsv_to_rgb_pixel, rgb_to_hsv, rgb_to_hsv_pixel};

use lumen_image::{Image, ImageError};

pub(crate) fn ensure_channels(image: &Image, expected: usize) -> Result<(), ImageError> {
    if image.num_channels() != expected {
        return Err(ImageError::InvalidChannelCount(
            expected,
            image.num_channels(),
        ));
    }
    Ok(())
}
