use std::path::PathBuf;

use argh::FromArgs;
use image::{DynamicImage, GrayImage, RgbImage};

use pixconv::{
    image::{DynImage, ImageSize},
    imgproc::color::{into_gray, into_rgb},
    FilterConfig, FilterService,
};

#[derive(FromArgs)]
/// Apply a named convolution filter to an image file
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// path where the filtered image is written
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// the filter to apply, defaults to the configured one
    #[argh(option, short = 'f')]
    filter: Option<String>,

    /// convert the decoded image to 1 (grayscale) or 3 (RGB) channels before filtering
    #[argh(option, short = 'c')]
    channels: Option<usize>,

    /// path to a JSON config file
    #[argh(option)]
    config: Option<PathBuf>,

    /// list the available filters and exit
    #[argh(switch)]
    list: bool,
}

// grayscale files stay single channel, everything else is flattened to RGB
fn decode(img: DynamicImage) -> Result<DynImage, Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = if img.color().has_color() {
        DynImage::from_raw(size, 3, img.to_rgb8().into_raw())?
    } else {
        DynImage::from_raw(size, 1, img.to_luma8().into_raw())?
    };

    Ok(image)
}

fn convert(image: DynImage, channels: usize) -> Result<DynImage, Box<dyn std::error::Error>> {
    match channels {
        1 => Ok(DynImage::Gray(into_gray(image)?)),
        3 => Ok(DynImage::Rgb(into_rgb(image)?)),
        n => Err(format!("unsupported number of channels: {n}, expected 1 or 3").into()),
    }
}

fn encode(image: DynImage) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let size = image.size();
    let (width, height) = (size.width as u32, size.height as u32);

    let encoded = match image {
        DynImage::Gray(gray) => GrayImage::from_raw(width, height, gray.into_vec())
            .map(DynamicImage::ImageLuma8),
        DynImage::Rgb(rgb) => {
            RgbImage::from_raw(width, height, rgb.into_vec()).map(DynamicImage::ImageRgb8)
        }
    };

    encoded.ok_or_else(|| "failed to build the output image buffer".into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => FilterConfig::from_path(path)?,
        None => FilterConfig::default(),
    };
    let service = FilterService::new(config);

    if args.list {
        for name in service.available_filters() {
            println!("{name}");
        }
        return Ok(());
    }

    let (Some(input), Some(output)) = (args.input, args.output) else {
        return Err("both --input and --output are required".into());
    };

    let mut img = decode(image::open(&input)?)?;
    if let Some(channels) = args.channels {
        img = convert(img, channels)?;
    }
    log::info!(
        "Image loaded: path={}, size={}, channels={}",
        input.display(),
        img.size(),
        img.num_channels()
    );

    let filter_name = args
        .filter
        .unwrap_or_else(|| service.config().default_filter.clone());
    let filtered = service.apply_filter_dyn(&img, &filter_name)?;
    log::info!("Filter '{filter_name}' applied");

    encode(filtered)?.save(&output)?;
    log::info!("Filtered image written to {}", output.display());

    Ok(())
}
