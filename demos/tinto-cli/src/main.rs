use argh::FromArgs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tinto::image::{Image, ImageError};
use tinto::imgproc::{self, stylize::OverlayPolicy};
use tinto::io::{functional as F, ImageFormat, IoError};

#[derive(Clone, Copy, Debug)]
enum Op {
    Grayscale,
    Invert,
    Sepia,
    Bw,
    Rotate,
    Hue,
    Saturation,
    Lightness,
    Vintage,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "grayscale" => Op::Grayscale,
            "invert" => Op::Invert,
            "sepia" => Op::Sepia,
            "bw" => Op::Bw,
            "rotate" => Op::Rotate,
            "hue" => Op::Hue,
            "saturation" => Op::Saturation,
            "lightness" => Op::Lightness,
            "vintage" => Op::Vintage,
            _ => return Err(format!("unknown operation: {s}")),
        })
    }
}

#[derive(FromArgs)]
/// Apply a pixel transformation to an image and save the result
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output image, the format follows the extension (png otherwise)
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// one of grayscale, invert, sepia, bw, rotate, hue, saturation, lightness, vintage
    #[argh(positional)]
    op: Op,

    /// hue in degrees for the hue operation
    #[argh(option, default = "0.0")]
    hue: f32,

    /// saturation in [0, 1] for the saturation operation
    #[argh(option, default = "0.5")]
    saturation: f32,

    /// lightness in [0, 1] for the lightness operation
    #[argh(option, default = "0.5")]
    lightness: f32,

    /// path to the vignette overlay for the vintage operation
    #[argh(option, default = "PathBuf::from(\"resources/halo.png\")")]
    halo: PathBuf,

    /// path to the grain overlay for the vintage operation
    #[argh(option, default = "PathBuf::from(\"resources/decorative_grain.png\")")]
    grain: PathBuf,

    /// resample overlays that do not match the input size instead of failing
    #[argh(switch)]
    resample_overlays: bool,
}

/// Run a `(src, dst)` operator into a freshly allocated image.
fn apply(
    src: &Image<u8, 3>,
    op: impl FnOnce(&Image<u8, 3>, &mut Image<u8, 3>) -> Result<(), ImageError>,
) -> Result<Image<u8, 3>, ImageError> {
    let mut dst = Image::from_size_val(src.size(), 0)?;
    op(src, &mut dst)?;
    Ok(dst)
}

/// The output format follows the extension; paths without one are written as PNG.
fn output_format(path: &Path) -> Result<ImageFormat, IoError> {
    match path.extension() {
        None => Ok(ImageFormat::Png),
        Some(_) => ImageFormat::from_path(path),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // fail on an extension we cannot encode before doing any work
    let format = output_format(&args.output_path)?;

    // read the image
    let image: Image<u8, 3> = F::read_image_any_rgb8(&args.image_path)?;
    log::info!("loaded {} from {}", image.size(), args.image_path.display());

    let output = match args.op {
        Op::Rotate => imgproc::rotate::rotate90_cw(&image)?,
        Op::Vintage => {
            let halo = F::read_image_any_rgb8(&args.halo)?;
            let grain = F::read_image_any_rgb8(&args.grain)?;
            let params = imgproc::stylize::StylizeParams {
                overlay_policy: if args.resample_overlays {
                    OverlayPolicy::ResampleNearest
                } else {
                    OverlayPolicy::Reject
                },
                ..Default::default()
            };
            imgproc::stylize::vintage(&image, &halo, &grain, &params)?
        }
        Op::Grayscale => apply(&image, |s, d| imgproc::color::gray_average(s, d))?,
        Op::Invert => apply(&image, |s, d| imgproc::enhance::invert(s, d))?,
        Op::Sepia => apply(&image, |s, d| imgproc::color::sepia(s, d))?,
        Op::Bw => apply(&image, |s, d| {
            imgproc::threshold::threshold_median_luminance(s, d)
        })?,
        Op::Hue => apply(&image, |s, d| imgproc::adjust::set_hue(s, d, args.hue))?,
        Op::Saturation => apply(&image, |s, d| {
            imgproc::adjust::set_saturation(s, d, args.saturation)
        })?,
        Op::Lightness => apply(&image, |s, d| {
            imgproc::adjust::set_lightness(s, d, args.lightness)
        })?,
    };

    F::write_image(&args.output_path, &output, format)?;
    log::info!(
        "applied {:?}, wrote {} to {}",
        args.op,
        output.size(),
        args.output_path.display()
    );

    Ok(())
}
