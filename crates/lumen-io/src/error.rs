/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] lumen_image::ImageError),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The image has a channel count that cannot be encoded.
    #[error("Cannot encode an image with {0} channels")]
    UnsupportedChannels(usize),

    /// Error to assemble the dataset matrices.
    #[error("Failed to build the dataset. {0}")]
    DatasetError(#[from] lumen_nn::NnError),

    /// Error to create a matrix.
    #[error("Failed to create the matrix. {0}")]
    TensorError(#[from] lumen_tensor::TensorError),

    /// The dataset lists no images.
    #[error("No images listed in {0}")]
    EmptyDataset(std::path::PathBuf),

    /// An image of the dataset has a different number of samples than the first one.
    #[error("Image {0} has {2} samples, expected {1}")]
    InconsistentFeatures(std::path::PathBuf, usize, usize),
}
