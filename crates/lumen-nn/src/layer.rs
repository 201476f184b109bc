use lumen_tensor::{ops, TensorError};
use rand::Rng;

use crate::{activation::Activation, Matrix, NnError};

/// A fully-connected layer, `activation(input · weights)`.
///
/// The layer caches its last input and output during [`Layer::forward`] and its weight
/// gradient during [`Layer::backward`]; [`Layer::update`] consumes the gradient.
#[derive(Clone, Debug)]
pub struct Layer {
    /// The activation applied to the matrix product.
    pub activation: Activation,
    /// Weights with shape `[input_size, output_size]`.
    pub weights: Matrix,
    velocity: Matrix,
    last_input: Option<Matrix>,
    last_output: Option<Matrix>,
    weight_grad: Option<Matrix>,
}

impl Layer {
    /// Create a layer with weights drawn uniformly from `±sqrt(2 / input_size)`.
    ///
    /// # Errors
    ///
    /// Both sizes must be positive.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self, NnError> {
        if input_size == 0 || output_size == 0 {
            return Err(NnError::InvalidLayerSize(input_size, output_size));
        }
        let scale = (2.0 / input_size as f32).sqrt();
        let data = (0..input_size * output_size)
            .map(|_| rng.random_range(-scale..scale))
            .collect();
        let weights = Matrix::from_shape_vec([input_size, output_size], data)?;
        Self::from_weights(weights, activation)
    }

    /// Create a layer from an explicit weight matrix.
    pub fn from_weights(weights: Matrix, activation: Activation) -> Result<Self, NnError> {
        let [input_size, output_size] = weights.shape;
        if input_size == 0 || output_size == 0 {
            return Err(NnError::InvalidLayerSize(input_size, output_size));
        }
        Ok(Self {
            activation,
            velocity: Matrix::zeros(weights.shape),
            weights,
            last_input: None,
            last_output: None,
            weight_grad: None,
        })
    }

    /// Number of input features.
    pub fn input_size(&self) -> usize {
        self.weights.shape[0]
    }

    /// Number of output features.
    pub fn output_size(&self) -> usize {
        self.weights.shape[1]
    }

    /// Compute the layer output without touching the cached state.
    pub fn infer(&self, input: &Matrix) -> Result<Matrix, NnError> {
        let mut out = ops::matmul(input, &self.weights)?;
        self.activation.apply(&mut out);
        Ok(out)
    }

    /// Compute the layer output and cache it for the backward pass.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix, NnError> {
        let out = self.infer(input)?;
        self.last_input = Some(input.clone());
        self.last_output = Some(out.clone());
        Ok(out)
    }

    /// Back-propagate the loss gradient w.r.t. this layer's output.
    ///
    /// Stores the weight gradient `inputᵀ · grad_pre` and returns the gradient w.r.t. the
    /// input, `grad_pre · weightsᵀ`.
    pub fn backward(&mut self, delta: &Matrix) -> Result<Matrix, NnError> {
        let (Some(input), Some(output)) = (&self.last_input, &self.last_output) else {
            return Err(NnError::MissingForwardPass);
        };
        if delta.shape != output.shape {
            return Err(TensorError::dimension_mismatch(
                "gradient must match the layer output",
                &output.shape,
                &delta.shape,
            )
            .into());
        }

        let mut grad_pre = delta.clone();
        self.activation.gradient(output, &mut grad_pre);

        self.weight_grad = Some(ops::gemm(input, true, &grad_pre, false)?);
        Ok(ops::gemm(&grad_pre, false, &self.weights, true)?)
    }

    /// Apply one momentum step with the stored gradient `g`:
    /// `v = momentum * v - g - decay * w`, then `w += rate * v`.
    pub fn update(&mut self, rate: f32, momentum: f32, decay: f32) -> Result<(), NnError> {
        let grad = self.weight_grad.take().ok_or(NnError::MissingForwardPass)?;
        ops::scaled_add_inplace(&mut self.velocity, momentum, &grad, -1.0)?;
        ops::scaled_add_inplace(&mut self.velocity, 1.0, &self.weights, -decay)?;
        ops::scaled_add_inplace(&mut self.weights, 1.0, &self.velocity, rate)?;
        Ok(())
    }
}
