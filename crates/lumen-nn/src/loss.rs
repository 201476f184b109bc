use lumen_tensor::{ops, TensorError};

use crate::{Matrix, NnError};

/// Smallest probability fed to the logarithm.
const MIN_PROB: f32 = 1e-12;

fn check_shapes(pred: &Matrix, truth: &Matrix) -> Result<(), NnError> {
    if pred.shape != truth.shape {
        return Err(TensorError::dimension_mismatch(
            "predictions and labels must have the same shape",
            &truth.shape,
            &pred.shape,
        )
        .into());
    }
    Ok(())
}

/// Mean cross-entropy `-sum(truth * ln(pred))` over the rows of a batch.
///
/// Returns zero for an empty batch.
pub fn cross_entropy(pred: &Matrix, truth: &Matrix) -> Result<f32, NnError> {
    check_shapes(pred, truth)?;
    let rows = pred.shape[0];
    if rows == 0 {
        return Ok(0.0);
    }
    let total: f32 = pred
        .iter()
        .zip(truth.iter())
        .map(|(&p, &t)| -t * p.max(MIN_PROB).ln())
        .sum();
    Ok(total / rows as f32)
}

/// Gradient `pred - truth` of the summed cross-entropy w.r.t. the softmax pre-activation.
pub fn cross_entropy_gradient(pred: &Matrix, truth: &Matrix) -> Result<Matrix, NnError> {
    check_shapes(pred, truth)?;
    Ok(ops::sub(pred, truth)?)
}
