use lumen_image::{Image, ImageError};
use lumen_imgproc::filter::{convolve, kernels, FilterKind};

fn rgb() -> Image {
    Image::from_fn([11, 8].into(), 3, |x, y, c| {
        ((x * 7 + y * 3 + c * 11) % 17) as f32 / 16.0
    })
}

#[test]
fn test_shared_kernel_filters_each_channel() -> Result<(), ImageError> {
    let image = rgb();
    let kernel = kernels::emboss_kernel();

    let preserved = convolve(&image, &kernel, true)?;
    let summed = convolve(&image, &kernel, false)?;
    assert_eq!(preserved.num_channels(), 3);
    assert_eq!(summed.num_channels(), 1);

    let per_channel = (0..3)
        .map(|ch| convolve(&image.channel(ch)?, &kernel, true))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, total) in summed.iter().enumerate() {
        let mut sum = 0.0;
        for (ch, filtered) in per_channel.iter().enumerate() {
            let v = filtered.as_slice()[i];
            assert!((preserved.as_slice()[i * 3 + ch] - v).abs() < 1e-5);
            sum += v;
        }
        assert!((total - sum).abs() < 1e-5);
    }
    Ok(())
}

#[test]
fn test_sharpen_is_identity_plus_highpass() -> Result<(), ImageError> {
    let image = rgb();
    let sharpened = FilterKind::Sharpen.apply(&image)?;
    let high = convolve(&image, &kernels::highpass_kernel(), true)?;
    for ((s, h), i) in sharpened.iter().zip(high.iter()).zip(image.iter()) {
        assert!((s - (h + i)).abs() < 1e-5);
    }
    Ok(())
}
