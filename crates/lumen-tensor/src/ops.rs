//! Operations for tensors.
//!
//! Matrix products are computed with `matrixmultiply::sgemm`, reading transposed
//! operands through their strides instead of materialising a copy.

use crate::{tensor::TensorError, Tensor, Tensor2};

/// Add two tensors element-wise.
pub fn add<T, const N: usize>(
    lhs: &Tensor<T, N>,
    rhs: &Tensor<T, N>,
) -> Result<Tensor<T, N>, TensorError>
where
    T: std::ops::Add<Output = T> + Copy,
{
    lhs.element_wise_op(rhs, |a, b| *a + *b)
}

/// Subtract two tensors element-wise.
pub fn sub<T, const N: usize>(
    lhs: &Tensor<T, N>,
    rhs: &Tensor<T, N>,
) -> Result<Tensor<T, N>, TensorError>
where
    T: std::ops::Sub<Output = T> + Copy,
{
    lhs.element_wise_op(rhs, |a, b| *a - *b)
}

/// Multiply two tensors element-wise (Hadamard product).
pub fn mul<T, const N: usize>(
    lhs: &Tensor<T, N>,
    rhs: &Tensor<T, N>,
) -> Result<Tensor<T, N>, TensorError>
where
    T: std::ops::Mul<Output = T> + Copy,
{
    lhs.element_wise_op(rhs, |a, b| *a * *b)
}

/// Compute `lhs = alpha * lhs + beta * rhs` in place.
///
/// # Errors
///
/// Returns [`TensorError::DimensionMismatch`] if the shapes differ.
pub fn scaled_add_inplace<const N: usize>(
    lhs: &mut Tensor<f32, N>,
    alpha: f32,
    rhs: &Tensor<f32, N>,
    beta: f32,
) -> Result<(), TensorError> {
    if lhs.shape != rhs.shape {
        return Err(TensorError::dimension_mismatch(
            "scaled add requires identical shapes",
            &lhs.shape,
            &rhs.shape,
        ));
    }
    lhs.as_slice_mut()
        .iter_mut()
        .zip(rhs.as_slice())
        .for_each(|(l, &r)| *l = alpha * *l + beta * r);
    Ok(())
}

/// Transpose a matrix into a newly allocated tensor.
pub fn transpose<T: Copy>(src: &Tensor2<T>) -> Tensor2<T> {
    let [rows, cols] = src.shape;
    let data = src.as_slice();
    Tensor2::from_shape_fn([cols, rows], |[i, j]| data[j * cols + i])
}

/// General matrix multiplication `op(lhs) · op(rhs)` where `op` optionally transposes.
///
/// # Arguments
///
/// * `lhs` - Left operand with shape `[m, k]` (or `[k, m]` when `transpose_lhs`).
/// * `transpose_lhs` - Whether to use the transpose of `lhs`.
/// * `rhs` - Right operand with shape `[k, n]` (or `[n, k]` when `transpose_rhs`).
/// * `transpose_rhs` - Whether to use the transpose of `rhs`.
///
/// # Returns
///
/// A new matrix with shape `[m, n]`.
///
/// # Errors
///
/// Returns [`TensorError::DimensionMismatch`] if the inner dimensions differ.
///
/// # Example
///
/// ```
/// use lumen_tensor::{ops, Tensor2};
///
/// let a = Tensor2::from_shape_vec([3, 2], vec![1.0f32, 4.0, 2.0, 5.0, 3.0, 6.0]).unwrap();
/// let b = Tensor2::from_shape_vec([3, 1], vec![1.0f32, 1.0, 1.0]).unwrap();
///
/// // a^T · b
/// let c = ops::gemm(&a, true, &b, false).unwrap();
/// assert_eq!(c.as_slice(), &[6.0, 15.0]);
/// ```
pub fn gemm(
    lhs: &Tensor2<f32>,
    transpose_lhs: bool,
    rhs: &Tensor2<f32>,
    transpose_rhs: bool,
) -> Result<Tensor2<f32>, TensorError> {
    let (m, k) = if transpose_lhs {
        (lhs.shape[1], lhs.shape[0])
    } else {
        (lhs.shape[0], lhs.shape[1])
    };
    let (k_rhs, n) = if transpose_rhs {
        (rhs.shape[1], rhs.shape[0])
    } else {
        (rhs.shape[0], rhs.shape[1])
    };

    if k != k_rhs {
        return Err(TensorError::dimension_mismatch(
            "matrix multiplication requires matching inner dimensions",
            &[m, k],
            &[k_rhs, n],
        ));
    }

    // row and column strides of the (possibly transposed) operands
    let (rsa, csa) = if transpose_lhs {
        (1, lhs.shape[1] as isize)
    } else {
        (lhs.shape[1] as isize, 1)
    };
    let (rsb, csb) = if transpose_rhs {
        (1, rhs.shape[1] as isize)
    } else {
        (rhs.shape[1] as isize, 1)
    };

    let mut dst = vec![0.0f32; m * n];

    // SAFETY: the operand buffers hold `m * k` and `k * n` elements addressed through the
    // strides above, and `dst` holds `m * n` elements with row stride `n`.
    unsafe {
        matrixmultiply::sgemm(
            m,
            k,
            n,
            1.0,
            lhs.as_slice().as_ptr(),
            rsa,
            csa,
            rhs.as_slice().as_ptr(),
            rsb,
            csb,
            0.0,
            dst.as_mut_ptr(),
            n as isize,
            1,
        );
    }

    Tensor2::from_shape_vec([m, n], dst)
}

/// Matrix product `lhs · rhs`.
pub fn matmul(lhs: &Tensor2<f32>, rhs: &Tensor2<f32>) -> Result<Tensor2<f32>, TensorError> {
    gemm(lhs, false, rhs, false)
}
