#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `lumen-tensor` provides [`Tensor`], an owned, row-major multi-dimensional array with
//! compile-time rank. Images are stored as [`Tensor3`] with shape `(H, W, C)` and the
//! trainer's matrices are [`Tensor2`] with shape `(rows, cols)`.
//!
//! ```rust
//! use lumen_tensor::{ops, Tensor2};
//!
//! let a = Tensor2::from_shape_vec([2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let b = Tensor2::from_shape_vec([3, 1], vec![1.0f32, 1.0, 1.0]).unwrap();
//!
//! let c = ops::matmul(&a, &b).unwrap();
//! assert_eq!(c.shape, [2, 1]);
//! assert_eq!(c.as_slice(), &[6.0, 15.0]);
//! ```

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

/// Linear algebra and element-wise operations over tensors.
pub mod ops;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;
