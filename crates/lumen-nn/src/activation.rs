use serde::{Deserialize, Serialize};

use crate::{Matrix, NnError};

/// Slope of [`Activation::LeakyRelu`] for negative inputs.
const LEAKY_SLOPE: f32 = 0.01;

/// The activation applied after a layer's matrix product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// `1 / (1 + e^-x)`.
    Logistic,
    /// `max(0, x)`.
    Relu,
    /// `x` when positive, `0.01 x` otherwise.
    LeakyRelu,
    /// Row-wise `e^x_i / sum_j e^x_j`.
    Softmax,
    /// The identity.
    Linear,
}

impl Activation {
    /// Apply the activation to a matrix of pre-activations, in place.
    pub fn apply(&self, m: &mut Matrix) {
        match self {
            Activation::Logistic => m
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Relu => m.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::LeakyRelu => m.iter_mut().for_each(|v| {
                if *v <= 0.0 {
                    *v *= LEAKY_SLOPE
                }
            }),
            Activation::Softmax => softmax_rows(m),
            Activation::Linear => {}
        }
    }

    /// Multiply an upstream gradient by the activation's derivative, in place.
    ///
    /// The derivative is evaluated from the activation's `output`. Softmax passes the
    /// gradient through unchanged: paired with cross-entropy the gradient w.r.t. the
    /// pre-activation is already `output - target`.
    pub fn gradient(&self, output: &Matrix, delta: &mut Matrix) {
        match self {
            Activation::Logistic => scale_by(delta, output, |y| y * (1.0 - y)),
            Activation::Relu => scale_by(delta, output, |y| if y > 0.0 { 1.0 } else { 0.0 }),
            Activation::LeakyRelu => {
                scale_by(delta, output, |y| if y > 0.0 { 1.0 } else { LEAKY_SLOPE })
            }
            Activation::Softmax | Activation::Linear => {}
        }
    }
}

impl std::str::FromStr for Activation {
    type Err = NnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logistic" => Ok(Activation::Logistic),
            "relu" => Ok(Activation::Relu),
            "lrelu" | "leaky_relu" => Ok(Activation::LeakyRelu),
            "softmax" => Ok(Activation::Softmax),
            "linear" => Ok(Activation::Linear),
            _ => Err(NnError::UnknownActivation(s.to_string())),
        }
    }
}

fn scale_by(delta: &mut Matrix, output: &Matrix, derivative: impl Fn(f32) -> f32) {
    delta
        .iter_mut()
        .zip(output.iter())
        .for_each(|(d, &y)| *d *= derivative(y));
}

fn softmax_rows(m: &mut Matrix) {
    let cols = m.shape[1];
    if cols == 0 {
        return;
    }
    for row in m.as_slice_mut().chunks_exact_mut(cols) {
        let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let mut sum = 0.0;
        for v in row.iter_mut() {
            *v = (*v - max).exp();
            sum += *v;
        }
        row.iter_mut().for_each(|v| *v /= sum);
    }
}
