use lumen_tensor::TensorError;

use crate::{Matrix, NnError};

/// Index of the largest value in each row; ties resolve to the first.
pub fn argmax_rows(m: &Matrix) -> Vec<usize> {
    let cols = m.shape[1];
    if cols == 0 {
        return vec![0; m.shape[0]];
    }
    m.as_slice()
        .chunks_exact(cols)
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |best, (i, &v)| {
                    if v > best.1 {
                        (i, v)
                    } else {
                        best
                    }
                })
                .0
        })
        .collect()
}

/// Fraction of rows whose predicted class matches the labelled class.
///
/// Returns zero when there are no rows.
pub fn accuracy(pred: &Matrix, truth: &Matrix) -> Result<f32, NnError> {
    if pred.shape != truth.shape {
        return Err(TensorError::dimension_mismatch(
            "predictions and labels must have the same shape",
            &truth.shape,
            &pred.shape,
        )
        .into());
    }
    let rows = pred.shape[0];
    if rows == 0 {
        return Ok(0.0);
    }
    let hits = argmax_rows(pred)
        .into_iter()
        .zip(argmax_rows(truth))
        .filter(|(p, t)| p == t)
        .count();
    Ok(hits as f32 / rows as f32)
}
