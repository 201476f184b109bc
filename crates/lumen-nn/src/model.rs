use rand::{rngs::StdRng, SeedableRng};

use crate::{
    activation::Activation, dataset::Dataset, layer::Layer, loss, metrics, Matrix, NnError,
};

/// A stack of layers where each output feeds the next input.
#[derive(Clone, Debug)]
pub struct Model {
    layers: Vec<Layer>,
}

impl Model {
    /// Build a model from layers whose sizes chain.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::EmptyModel`] without layers and [`NnError::LayerMismatch`] when a
    /// layer's input size differs from the previous layer's output size.
    pub fn new(layers: Vec<Layer>) -> Result<Self, NnError> {
        if layers.is_empty() {
            return Err(NnError::EmptyModel);
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_size() != pair[1].input_size() {
                return Err(NnError::LayerMismatch(
                    i + 1,
                    pair[1].input_size(),
                    pair[0].output_size(),
                ));
            }
        }
        Ok(Self { layers })
    }

    /// Build a classifier: hidden layers with `hidden_activation` and a softmax output.
    ///
    /// Weights come from a generator seeded with `seed`, or from the OS when `None`.
    pub fn mlp(
        input_size: usize,
        hidden: &[usize],
        num_classes: usize,
        hidden_activation: Activation,
        seed: Option<u64>,
    ) -> Result<Self, NnError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut layers = Vec::with_capacity(hidden.len() + 1);
        let mut inputs = input_size;
        for &size in hidden {
            layers.push(Layer::new(inputs, size, hidden_activation, &mut rng)?);
            inputs = size;
        }
        layers.push(Layer::new(inputs, num_classes, Activation::Softmax, &mut rng)?);
        Self::new(layers)
    }

    /// The layers, input first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of input features.
    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    fn check_input(&self, x: &Matrix) -> Result<(), NnError> {
        if x.shape[1] != self.input_size() {
            return Err(NnError::LayerMismatch(0, self.input_size(), x.shape[1]));
        }
        Ok(())
    }

    /// Run a forward pass, caching each layer's state for [`Model::backward`].
    pub fn forward(&mut self, x: &Matrix) -> Result<Matrix, NnError> {
        self.check_input(x)?;
        let mut out = x.clone();
        for layer in self.layers.iter_mut() {
            out = layer.forward(&out)?;
        }
        Ok(out)
    }

    /// Run a forward pass without touching the cached state.
    pub fn predict(&self, x: &Matrix) -> Result<Matrix, NnError> {
        self.check_input(x)?;
        let mut out = x.clone();
        for layer in self.layers.iter() {
            out = layer.infer(&out)?;
        }
        Ok(out)
    }

    /// Back-propagate the loss gradient w.r.t. the model output through every layer.
    pub fn backward(&mut self, delta: &Matrix) -> Result<(), NnError> {
        let mut delta = delta.clone();
        for layer in self.layers.iter_mut().rev() {
            delta = layer.backward(&delta)?;
        }
        Ok(())
    }

    /// Apply one momentum step to every layer.
    pub fn update(&mut self, rate: f32, momentum: f32, decay: f32) -> Result<(), NnError> {
        self.layers
            .iter_mut()
            .try_for_each(|layer| layer.update(rate, momentum, decay))
    }

    /// Mean cross-entropy of the model on a dataset.
    pub fn loss(&self, data: &Dataset) -> Result<f32, NnError> {
        loss::cross_entropy(&self.predict(&data.x)?, &data.y)
    }

    /// Classification accuracy of the model on a dataset.
    pub fn accuracy(&self, data: &Dataset) -> Result<f32, NnError> {
        metrics::accuracy(&self.predict(&data.x)?, &data.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_must_chain() -> Result<(), NnError> {
        let mut rng = StdRng::seed_from_u64(0);
        let a = Layer::new(4, 3, Activation::Relu, &mut rng)?;
        let b = Layer::new(2, 2, Activation::Softmax, &mut rng)?;
        assert!(matches!(
            Model::new(vec![a, b]),
            Err(NnError::LayerMismatch(1, 2, 3))
        ));
        assert!(matches!(Model::new(vec![]), Err(NnError::EmptyModel)));
        Ok(())
    }

    #[test]
    fn predict_matches_forward() -> Result<(), NnError> {
        let mut model = Model::mlp(3, &[4], 2, Activation::Logistic, Some(1))?;
        let x = Matrix::from_shape_fn([5, 3], |[r, c]| (r + c) as f32 * 0.1);
        let predicted = model.predict(&x)?;
        assert_eq!(model.forward(&x)?, predicted);
        assert!(model.predict(&Matrix::zeros([1, 4])).is_err());
        Ok(())
    }

    #[test]
    fn seeded_models_match() -> Result<(), NnError> {
        let a = Model::mlp(6, &[5], 2, Activation::Relu, Some(9))?;
        let b = Model::mlp(6, &[5], 2, Activation::Relu, Some(9))?;
        assert_eq!(a.layers()[0].weights, b.layers()[0].weights);
        Ok(())
    }
}
