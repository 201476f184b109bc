use lumen_tensor::TensorError;

/// An error type for the network module.
#[derive(thiserror::Error, Debug)]
pub enum NnError {
    /// Error from a matrix operation.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// A layer received an input of the wrong width.
    #[error("Layer {0} expects {1} input features but got {2}")]
    LayerMismatch(usize, usize, usize),

    /// A layer has zero inputs or outputs.
    #[error("Invalid layer size {0}x{1}")]
    InvalidLayerSize(usize, usize),

    /// Backward or update was called before a forward pass.
    #[error("Layer has no cached forward pass")]
    MissingForwardPass,

    /// The mini-batch size is zero.
    #[error("Invalid batch size {0}")]
    InvalidBatchSize(usize),

    /// Examples and labels have a different number of rows.
    #[error("Dataset has {0} examples but {1} labels")]
    DatasetMismatch(usize, usize),

    /// An activation name that is not recognised.
    #[error("Unknown activation {0}")]
    UnknownActivation(String),

    /// The model has no layers.
    #[error("Model has no layers")]
    EmptyModel,

    /// Error reading a configuration file.
    #[error("Failed to read configuration. {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a configuration file.
    #[error("Failed to parse configuration. {0}")]
    Json(#[from] serde_json::Error),
}
