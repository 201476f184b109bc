#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! A model is a fixed stack of dense [`layer::Layer`]s, each a weight matrix followed by an
//! [`activation::Activation`]. Biases are carried by the weights: append a constant `1.0`
//! feature column to the inputs and the matching weight row acts as the bias.
//!
//! ## Example
//!
//! ```
//! use lumen_nn::{activation::Activation, model::Model, Matrix};
//!
//! let mut model = Model::mlp(4, &[8], 3, Activation::Relu, Some(7)).unwrap();
//! let x = Matrix::from_shape_val([2, 4], 0.5);
//! let probs = model.forward(&x).unwrap();
//!
//! assert_eq!(probs.shape, [2, 3]);
//! ```

/// Element-wise and row-wise activation functions.
pub mod activation;

/// Labelled example matrices.
pub mod dataset;

/// Error types for the network module.
pub mod error;

/// Dense layers with momentum state.
pub mod layer;

/// Cross-entropy loss and its gradient.
pub mod loss;

/// Classification metrics.
pub mod metrics;

/// A chained stack of layers.
pub mod model;

/// Mini-batch training loop and its configuration.
pub mod train;

pub use crate::error::NnError;

/// A row-major matrix of `f32`, rows are examples.
pub type Matrix = lumen_tensor::Tensor2<f32>;
