use lumen_tensor::TensorError;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the underlying tensor cannot be created.
    #[error("Failed to create image data")]
    TensorError(#[from] TensorError),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images do not share the same size.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when an operation requires a specific number of channels.
    #[error("Expected {0} channels, got {1}")]
    InvalidChannelCount(usize, usize),

    /// Error when a kernel has neither 1 nor the image's channel count.
    #[error("Kernel with {0} channels cannot filter an image with {1} channels")]
    KernelChannelMismatch(usize, usize),

    /// Error when a resize target has a zero dimension.
    #[error("Invalid resize target ({0}x{1})")]
    InvalidResizeTarget(usize, usize),

    /// Error when a kernel has a zero dimension.
    #[error("Invalid kernel size ({0}x{1})")]
    InvalidKernelSize(usize, usize),

    /// Error when a numeric parameter is outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when an operation needs at least one pixel.
    #[error("Image has no pixels")]
    EmptyImage,
}
