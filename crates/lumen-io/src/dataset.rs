use std::path::{Path, PathBuf};

use lumen_nn::{dataset::Dataset, Matrix};

use crate::{error::IoError, functional::read_image};

fn read_lines(path: &Path) -> Result<Vec<String>, IoError> {
    if !path.exists() {
        return Err(IoError::FileDoesNotExist(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Load a classification dataset from a list of image paths.
///
/// `data_path` lists one image path per line and `labels_path` one class name per line.
/// An example belongs to the first class whose name occurs in its image path; examples
/// matching no class get an all-zero label row. Each image becomes one row of HWC samples
/// in `[0, 1]`. With `bias` set, a constant `1.0` feature is appended to every row.
///
/// # Errors
///
/// Every image must have the same number of samples as the first one.
pub fn load_classification_data(
    data_path: impl AsRef<Path>,
    labels_path: impl AsRef<Path>,
    bias: bool,
) -> Result<Dataset, IoError> {
    let data_path = data_path.as_ref();
    let paths = read_lines(data_path)?;
    let labels = read_lines(labels_path.as_ref())?;
    if paths.is_empty() {
        return Err(IoError::EmptyDataset(data_path.to_path_buf()));
    }

    let mut features = 0;
    let mut x = Vec::new();
    let mut y = vec![0.0; paths.len() * labels.len()];

    for (row, path) in paths.iter().enumerate() {
        let image = read_image(path)?;
        let samples = image.as_slice();
        if row == 0 {
            features = samples.len();
            x.reserve(paths.len() * (features + bias as usize));
        } else if samples.len() != features {
            return Err(IoError::InconsistentFeatures(
                PathBuf::from(path),
                features,
                samples.len(),
            ));
        }
        x.extend_from_slice(samples);
        if bias {
            x.push(1.0);
        }

        match labels.iter().position(|label| path.contains(label.as_str())) {
            Some(class) => y[row * labels.len() + class] = 1.0,
            None => log::warn!("{path} matches no label"),
        }
    }

    log::info!(
        "loaded {} examples with {} features and {} classes",
        paths.len(),
        features + bias as usize,
        labels.len()
    );

    let x = Matrix::from_shape_vec([paths.len(), features + bias as usize], x)?;
    let y = Matrix::from_shape_vec([paths.len(), labels.len()], y)?;
    Ok(Dataset::new(x, y)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::write_image;
    use lumen_image::Image;

    #[test]
    fn load_labelled_images() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let dir = tmp_dir.path();

        let mut listing = String::new();
        for (name, value) in [("cat_0.png", 0.0), ("dog_0.png", 1.0), ("cat_1.png", 0.2)] {
            let path = dir.join(name);
            write_image(&path, &Image::from_size_val([2, 2].into(), 1, value))?;
            listing.push_str(&format!("{}\n", path.display()));
        }
        let data_path = dir.join("train.list");
        let labels_path = dir.join("labels.txt");
        std::fs::write(&data_path, listing)?;
        std::fs::write(&labels_path, "dog\ncat\n")?;

        let data = load_classification_data(&data_path, &labels_path, true)?;
        assert_eq!(data.len(), 3);
        assert_eq!(data.num_features(), 5);
        assert_eq!(data.num_classes(), 2);
        assert_eq!(data.y.as_slice(), &[0.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(&data.x.as_slice()[5..10], &[1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(data.x.as_slice()[4], 1.0);

        let without_bias = load_classification_data(&data_path, &labels_path, false)?;
        assert_eq!(without_bias.num_features(), 4);
        Ok(())
    }

    #[test]
    fn mismatched_sizes() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let dir = tmp_dir.path();
        let small = dir.join("a.png");
        let large = dir.join("b.png");
        write_image(&small, &Image::from_size_val([2, 2].into(), 1, 0.0))?;
        write_image(&large, &Image::from_size_val([3, 2].into(), 1, 0.0))?;

        let data_path = dir.join("list");
        std::fs::write(&data_path, format!("{}\n{}\n", small.display(), large.display()))?;
        let labels_path = dir.join("labels");
        std::fs::write(&labels_path, "a\n")?;

        assert!(matches!(
            load_classification_data(&data_path, &labels_path, false),
            Err(IoError::InconsistentFeatures(_, 4, 6))
        ));

        std::fs::write(&data_path, "\n")?;
        assert!(matches!(
            load_classification_data(&data_path, &labels_path, false),
            Err(IoError::EmptyDataset(_))
        ));
        Ok(())
    }
}
