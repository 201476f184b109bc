use approx::assert_relative_eq;
use lumen_nn::{
    activation::Activation,
    dataset::Dataset,
    layer::Layer,
    model::Model,
    train::{train_model, TrainConfig},
    Matrix, NnError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Two classes split by the line `x0 + x1 = 0`, with a margin and a bias column.
fn separable(n: usize, seed: u64) -> Result<Dataset, NnError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Vec::with_capacity(n * 3);
    let mut y = Vec::with_capacity(n * 2);
    while y.len() < n * 2 {
        let a: f32 = rng.random_range(-1.0..1.0);
        let b: f32 = rng.random_range(-1.0..1.0);
        if (a + b).abs() < 0.2 {
            continue;
        }
        x.extend_from_slice(&[a, b, 1.0]);
        if a + b > 0.0 {
            y.extend_from_slice(&[0.0, 1.0]);
        } else {
            y.extend_from_slice(&[1.0, 0.0]);
        }
    }
    Dataset::new(
        Matrix::from_shape_vec([n, 3], x)?,
        Matrix::from_shape_vec([n, 2], y)?,
    )
}

#[test]
fn test_forward_shape() -> Result<(), NnError> {
    let mut rng = StdRng::seed_from_u64(11);
    let mut model = Model::new(vec![
        Layer::new(10, 5, Activation::Relu, &mut rng)?,
        Layer::new(5, 3, Activation::Softmax, &mut rng)?,
    ])?;

    let x = Matrix::from_shape_fn([4, 10], |[r, c]| ((r * 10 + c) % 7) as f32 / 7.0);
    let out = model.forward(&x)?;
    assert_eq!(out.shape, [4, 3]);
    for row in out.as_slice().chunks_exact(3) {
        assert_relative_eq!(row.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
    }
    Ok(())
}

#[test]
fn test_softmax_classifier_converges() -> Result<(), NnError> {
    let data = separable(200, 42)?;
    let mut model = Model::mlp(3, &[], 2, Activation::Linear, Some(42))?;
    let config = TrainConfig {
        epochs: 20,
        batch_size: 10,
        learning_rate: 0.01,
        momentum: 0.9,
        decay: 0.0001,
        shuffle: true,
        seed: Some(42),
    };

    let initial = model.loss(&data)?;
    let history = train_model(&mut model, &data, &config)?;
    assert_eq!(history.len(), 20);

    assert!(history[0].loss < initial);
    assert!(
        history.windows(2).all(|w| w[1].loss < w[0].loss),
        "loss is not strictly decreasing: {history:?}"
    );
    assert!(model.accuracy(&data)? > 0.9);
    assert!(model.loss(&data)? < history[0].loss);
    Ok(())
}

#[test]
fn test_hidden_layer_trains() -> Result<(), NnError> {
    let data = separable(120, 7)?;
    let mut model = Model::mlp(3, &[8], 2, Activation::Logistic, Some(3))?;
    let before = model.loss(&data)?;
    let config = TrainConfig {
        epochs: 30,
        batch_size: 12,
        seed: Some(1),
        ..Default::default()
    };
    train_model(&mut model, &data, &config)?;
    assert!(model.loss(&data)? < before);
    Ok(())
}
