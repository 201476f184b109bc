use argh::FromArgs;
use std::path::PathBuf;

use lumen::{
    io::dataset::load_classification_data,
    nn::{
        activation::Activation,
        model::Model,
        train::{train_model, TrainConfig},
    },
};

#[derive(FromArgs)]
/// Train a fully-connected classifier on a list of labelled images
struct Args {
    /// file listing the training images
    #[argh(option)]
    train: PathBuf,

    /// file listing the test images
    #[argh(option)]
    test: PathBuf,

    /// file listing the class names
    #[argh(option)]
    labels: PathBuf,

    /// width of a hidden layer, repeat for more layers
    #[argh(option)]
    hidden: Vec<usize>,

    /// activation of the hidden layers: logistic, relu, lrelu or linear
    #[argh(option, default = "Activation::Relu")]
    activation: Activation,

    /// JSON file with the training configuration
    #[argh(option)]
    config: Option<PathBuf>,

    /// number of epochs, overriding the configuration
    #[argh(option)]
    epochs: Option<usize>,

    /// learning rate, overriding the configuration
    #[argh(option)]
    learning_rate: Option<f32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => TrainConfig::from_json_file(path)?,
        None => TrainConfig::default(),
    };
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(rate) = args.learning_rate {
        config.learning_rate = rate;
    }

    let train = load_classification_data(&args.train, &args.labels, true)?;
    let test = load_classification_data(&args.test, &args.labels, true)?;
    log::info!("{} training and {} test examples", train.len(), test.len());

    let mut model = Model::mlp(
        train.num_features(),
        &args.hidden,
        train.num_classes(),
        args.activation,
        config.seed,
    )?;

    train_model(&mut model, &train, &config)?;

    println!("training accuracy: {:.4}", model.accuracy(&train)?);
    println!("test accuracy:     {:.4}", model.accuracy(&test)?);

    Ok(())
}
