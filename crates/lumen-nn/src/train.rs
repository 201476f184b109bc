use std::path::Path;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, loss, model::Model, NnError};

/// Hyper-parameters of [`train_model`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Passes over the dataset.
    pub epochs: usize,
    /// Examples per mini-batch; the last batch of an epoch may be smaller.
    pub batch_size: usize,
    /// Step size.
    pub learning_rate: f32,
    /// Fraction of the previous velocity kept each step.
    pub momentum: f32,
    /// Weight decay folded into the velocity.
    pub decay: f32,
    /// Shuffle the examples at the start of every epoch.
    pub shuffle: bool,
    /// Seed of the shuffling generator, or `None` to seed from the OS.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 128,
            learning_rate: 0.01,
            momentum: 0.9,
            decay: 0.0001,
            shuffle: true,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Read a configuration from a JSON file; missing fields take their default.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NnError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Summary of one training epoch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EpochStats {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Mean cross-entropy over the epoch's batches, measured before each update.
    pub loss: f32,
    /// Accuracy on the whole dataset after the epoch.
    pub accuracy: f32,
}

/// Train a model with mini-batch momentum SGD on the cross-entropy loss.
///
/// Every epoch visits each example once, in shuffled order when `config.shuffle` is set.
/// Batches update the weights one after the other.
///
/// # Errors
///
/// The batch size must be positive and the dataset must fit the model.
pub fn train_model(
    model: &mut Model,
    data: &Dataset,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>, NnError> {
    if config.batch_size == 0 {
        return Err(NnError::InvalidBatchSize(config.batch_size));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut order: Vec<usize> = (0..data.len()).collect();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        if config.shuffle {
            order.shuffle(&mut rng);
        }

        let mut total_loss = 0.0;
        for indices in order.chunks(config.batch_size) {
            let batch = data.batch(indices)?;
            let pred = model.forward(&batch.x)?;
            total_loss += loss::cross_entropy(&pred, &batch.y)? * indices.len() as f32;
            model.backward(&loss::cross_entropy_gradient(&pred, &batch.y)?)?;
            model.update(config.learning_rate, config.momentum, config.decay)?;
        }

        let stats = EpochStats {
            epoch,
            loss: if data.is_empty() {
                0.0
            } else {
                total_loss / data.len() as f32
            },
            accuracy: model.accuracy(data)?,
        };
        if !stats.loss.is_finite() {
            log::warn!("epoch {epoch}: loss is not finite, training has diverged");
        }
        log::info!(
            "epoch {}: loss {:.4}, accuracy {:.3}",
            stats.epoch,
            stats.loss,
            stats.accuracy
        );
        history.push(stats);
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{activation::Activation, Matrix};

    #[test]
    fn config_from_json() -> Result<(), NnError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("train.json");
        std::fs::write(&path, r#"{ "epochs": 3, "learning_rate": 0.1, "seed": 5 }"#)?;

        let config = TrainConfig::from_json_file(&path)?;
        assert_eq!(config.epochs, 3);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.batch_size, 128);

        std::fs::write(&path, "{ epochs: }")?;
        assert!(matches!(
            TrainConfig::from_json_file(&path),
            Err(NnError::Json(_))
        ));
        Ok(())
    }

    #[test]
    fn zero_batch_size() -> Result<(), NnError> {
        let mut model = Model::mlp(2, &[], 2, Activation::Linear, Some(0))?;
        let data = Dataset::new(Matrix::zeros([4, 2]), Matrix::zeros([4, 2]))?;
        let config = TrainConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            train_model(&mut model, &data, &config),
            Err(NnError::InvalidBatchSize(0))
        ));
        Ok(())
    }

    #[test]
    fn history_per_epoch() -> Result<(), NnError> {
        let mut model = Model::mlp(2, &[3], 2, Activation::LeakyRelu, Some(0))?;
        let x = Matrix::from_shape_fn([7, 2], |[r, c]| (r * 2 + c) as f32 / 14.0);
        let y = Matrix::from_shape_fn([7, 2], |[r, c]| if r % 2 == c { 1.0 } else { 0.0 });
        let data = Dataset::new(x, y)?;
        let config = TrainConfig {
            epochs: 4,
            batch_size: 3,
            seed: Some(2),
            ..Default::default()
        };
        let history = train_model(&mut model, &data, &config)?;
        assert_eq!(history.len(), 4);
        assert_eq!(history[3].epoch, 3);
        assert!(history.iter().all(|s| s.loss.is_finite()));
        Ok(())
    }
}
