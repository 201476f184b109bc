use argh::FromArgs;
use std::path::PathBuf;

use lumen::{
    imgproc::flow::{draw_flow, optical_flow, FlowParams},
    io::functional::{read_image, write_image},
};

#[derive(FromArgs)]
/// Estimate the optical flow between two frames and draw it over the first
struct Args {
    /// path to the earlier frame
    #[argh(option)]
    previous: PathBuf,

    /// path to the later frame
    #[argh(option)]
    current: PathBuf,

    /// path of the output image
    #[argh(option, default = "PathBuf::from(\"flow.png\")")]
    output: PathBuf,

    /// side of the structure matrix window
    #[argh(option, default = "15")]
    smooth: usize,

    /// spacing of the flow grid
    #[argh(option, default = "8")]
    stride: usize,

    /// length multiplier of the drawn vectors
    #[argh(option, default = "8.0")]
    scale: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let previous = read_image(&args.previous)?;
    let current = read_image(&args.current)?;

    let params = FlowParams {
        smooth: args.smooth,
        stride: args.stride,
        ..Default::default()
    };
    let flow = optical_flow(&current, &previous, &params)?;
    log::info!("flow grid {}x{}", flow.cols(), flow.rows());

    let mut canvas = previous.clone();
    draw_flow(&mut canvas, &flow, args.scale)?;
    write_image(&args.output, &canvas)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
