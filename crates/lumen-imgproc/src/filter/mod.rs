//! Filter operations
//!
//! Kernel constructors, the convolution engine and the smoothing helpers built on top of it.

/// Filter kernels
pub mod kernels;

mod convolution;
pub use convolution::convolve;

mod integral;
pub use integral::{box_filter_integral, integral_image, IntegralImage};

mod separable_filter;
pub use separable_filter::{separable_filter, smooth};

use lumen_image::{Image, ImageError};

/// The named filters of the filter bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Uniform `size` x `size` average.
    Box(usize),
    /// Normalised gaussian with the given sigma.
    Gaussian(f32),
    /// Identity plus highpass.
    Sharpen,
    /// Diagonal relief.
    Emboss,
    /// Discrete Laplacian.
    Highpass,
    /// Horizontal derivative.
    SobelX,
    /// Vertical derivative.
    SobelY,
}

impl FilterKind {
    /// Build the kernel for this filter.
    pub fn kernel(&self) -> Result<Image, ImageError> {
        match *self {
            FilterKind::Box(size) => kernels::box_kernel(size),
            FilterKind::Gaussian(sigma) => kernels::gaussian_kernel(sigma),
            FilterKind::Sharpen => Ok(kernels::sharpen_kernel()),
            FilterKind::Emboss => Ok(kernels::emboss_kernel()),
            FilterKind::Highpass => Ok(kernels::highpass_kernel()),
            FilterKind::SobelX => Ok(kernels::sobel_x_kernel()),
            FilterKind::SobelY => Ok(kernels::sobel_y_kernel()),
        }
    }

    /// Whether the filter is meant to keep the image's channels.
    ///
    /// Blurs and sharpening keep colour; edge-like filters collapse to one intensity channel.
    pub fn preserve(&self) -> bool {
        matches!(
            self,
            FilterKind::Box(_) | FilterKind::Gaussian(_) | FilterKind::Sharpen
        )
    }

    /// Convolve `src` with this filter using its recommended channel policy.
    pub fn apply(&self, src: &Image) -> Result<Image, ImageError> {
        convolve(src, &self.kernel()?, self.preserve())
    }
}
