use lumen_tensor::TensorError;

use crate::{Matrix, NnError};

/// Examples `x` and one-hot labels `y`; row `i` of each belongs to the same example.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// Features, one example per row.
    pub x: Matrix,
    /// One-hot labels, one example per row.
    pub y: Matrix,
}

impl Dataset {
    /// Pair an example matrix with its labels.
    ///
    /// # Errors
    ///
    /// Both matrices must have the same number of rows.
    pub fn new(x: Matrix, y: Matrix) -> Result<Self, NnError> {
        if x.shape[0] != y.shape[0] {
            return Err(NnError::DatasetMismatch(x.shape[0], y.shape[0]));
        }
        Ok(Self { x, y })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.x.shape[0]
    }

    /// Whether the dataset has no examples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of features per example.
    pub fn num_features(&self) -> usize {
        self.x.shape[1]
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.y.shape[1]
    }

    /// Gather the given rows into a new dataset.
    pub fn batch(&self, indices: &[usize]) -> Result<Dataset, NnError> {
        Ok(Dataset {
            x: select_rows(&self.x, indices)?,
            y: select_rows(&self.y, indices)?,
        })
    }
}

fn select_rows(m: &Matrix, indices: &[usize]) -> Result<Matrix, NnError> {
    let [rows, cols] = m.shape;
    let mut data = Vec::with_capacity(indices.len() * cols);
    for &i in indices {
        if i >= rows {
            return Err(TensorError::index_out_of_bounds(i, rows).into());
        }
        data.extend_from_slice(&m.as_slice()[i * cols..(i + 1) * cols]);
    }
    Ok(Matrix::from_shape_vec([indices.len(), cols], data)?)
}
