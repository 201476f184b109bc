use lumen_image::{Image, ImageError};

fn check_sigma(sigma: f32) -> Result<(), ImageError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageError::InvalidParameter(format!(
            "gaussian sigma must be positive and finite, got {sigma}"
        )));
    }
    Ok(())
}

/// Side length of a gaussian kernel: `ceil(6 * sigma)` bumped to the next odd number.
pub fn gaussian_kernel_size(sigma: f32) -> usize {
    let size = (6.0 * sigma).ceil().max(1.0) as usize;
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The side length of the square kernel.
///
/// # Returns
///
/// A single-channel `kernel_size` x `kernel_size` kernel whose weights sum to one.
pub fn box_kernel(kernel_size: usize) -> Result<Image, ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size, kernel_size));
    }
    let weight = 1.0 / (kernel_size * kernel_size) as f32;
    Ok(Image::from_size_val(
        [kernel_size, kernel_size].into(),
        1,
        weight,
    ))
}

/// Create a 1D gaussian kernel of size [`gaussian_kernel_size`].
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalised to sum to one.
pub fn gaussian_kernel_1d(sigma: f32) -> Result<Vec<f32>, ImageError> {
    check_sigma(sigma)?;

    let kernel_size = gaussian_kernel_size(sigma);
    let mean = (kernel_size / 2) as f32;
    let sigma_sq = sigma * sigma;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - mean;
            (-(x * x) / (2.0 * sigma_sq)).exp()
        })
        .collect();

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Create a 2D gaussian kernel.
///
/// Samples of the isotropic gaussian on a [`gaussian_kernel_size`] square grid, normalised to
/// sum to one.
pub fn gaussian_kernel(sigma: f32) -> Result<Image, ImageError> {
    check_sigma(sigma)?;

    let kernel_size = gaussian_kernel_size(sigma);
    let mean = (kernel_size / 2) as f32;
    let sigma_sq = sigma * sigma;

    let mut kernel = Image::from_fn([kernel_size, kernel_size].into(), 1, |x, y, _| {
        let dx = x as f32 - mean;
        let dy = y as f32 - mean;
        (-(dx * dx + dy * dy) / (2.0 * sigma_sq)).exp()
    });
    lumen_image::ops::l1_normalize(&mut kernel);
    Ok(kernel)
}

/// Discrete Laplacian kernel.
pub fn highpass_kernel() -> Image {
    Image::from_rows([[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]])
}

/// Identity plus [`highpass_kernel`].
pub fn sharpen_kernel() -> Image {
    Image::from_rows([[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]])
}

/// Diagonal relief kernel.
pub fn emboss_kernel() -> Image {
    Image::from_rows([[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]])
}

/// Horizontal sobel kernel (responds to vertical edges).
pub fn sobel_x_kernel() -> Image {
    Image::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
}

/// Vertical sobel kernel (responds to horizontal edges).
pub fn sobel_y_kernel() -> Image {
    Image::from_rows([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]])
}
