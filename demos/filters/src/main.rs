use argh::FromArgs;
use std::path::{Path, PathBuf};

use lumen::{
    image::{ops, Image},
    imgproc::{
        color,
        features::{harris_corners, mark_corners, HarrisParams},
        filter::FilterKind,
        frequency,
        gradient,
        interpolation::InterpolationMode,
        resize,
    },
    io::functional::{read_image, write_image},
};

#[derive(FromArgs)]
/// Run the filter bank over an image and save every result
struct Args {
    /// path to the input image
    #[argh(option)]
    image: PathBuf,

    /// directory receiving the outputs
    #[argh(option, default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// sigma of the gaussian filters
    #[argh(option, default = "2.0")]
    sigma: f32,

    /// image whose high frequencies are blended into the input
    #[argh(option)]
    hybrid_with: Option<PathBuf>,
}

fn save(dir: &Path, name: &str, image: &Image) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join(format!("{name}.png"));
    write_image(&path, image)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    std::fs::create_dir_all(&args.output_dir)?;
    let dir = args.output_dir.as_path();
    let image = read_image(&args.image)?;

    // blur and shrink
    let blur = FilterKind::Box(7).apply(&image)?;
    let thumb_size = [(image.cols() / 7).max(1), (image.rows() / 7).max(1)].into();
    save(dir, "thumb", &resize::resize(&blur, thumb_size, InterpolationMode::Nearest)?)?;
    save(dir, "thumb_nn", &resize::nn_resize(&image, thumb_size)?)?;
    save(dir, "blur", &blur)?;

    let big = [image.cols() * 4, image.rows() * 4].into();
    save(dir, "bilinear_4x", &resize::bilinear_resize(&image, big)?)?;

    for (name, kind) in [
        ("highpass", FilterKind::Highpass),
        ("sharpen", FilterKind::Sharpen),
        ("emboss", FilterKind::Emboss),
        ("gaussian", FilterKind::Gaussian(args.sigma)),
    ] {
        let mut out = kind.apply(&image)?;
        out.clamp();
        save(dir, name, &out)?;
    }

    let bands = frequency::decompose(&image, args.sigma)?;
    save(dir, "low_frequency", &bands.low)?;
    save(dir, "high_frequency", &bands.high)?;
    save(dir, "reconstructed", &frequency::reconstruct(&bands)?)?;

    if let Some(other) = &args.hybrid_with {
        let other = read_image(other)?;
        let hybrid = frequency::hybrid_image(&image, &other, args.sigma, args.sigma)?;
        save(dir, "hybrid", &hybrid)?;
    }

    let mut sobel = gradient::sobel(&image)?;
    ops::feature_normalize(&mut sobel.magnitude);
    ops::feature_normalize(&mut sobel.orientation);
    save(dir, "sobel_magnitude", &sobel.magnitude)?;
    save(dir, "sobel_orientation", &sobel.orientation)?;
    save(dir, "sobel_colorized", &gradient::colorize_sobel(&image)?)?;

    if image.num_channels() == 3 {
        let mut saturated = image.clone();
        color::rgb_to_hsv(&mut saturated)?;
        saturated.scale(1, 2.0)?;
        saturated.clamp();
        color::hsv_to_rgb(&mut saturated)?;
        save(dir, "saturated", &saturated)?;
    }

    let corners = harris_corners(&image, &HarrisParams::default())?;
    log::info!("found {} corners", corners.len());
    let mut marked = image.clone();
    mark_corners(&mut marked, &corners)?;
    save(dir, "corners", &marked)?;

    Ok(())
}
