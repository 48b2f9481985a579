use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mediapick_core::crop::controller::CropController;
use mediapick_core::io::image_io::{probe_image, sample_size};
use mediapick_core::media::MediaKind;

use super::{load_config, parse_view};
use crate::summary::print_info;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// View size the crop is laid out in
    #[arg(long, value_parser = parse_view, default_value = "1000x1000")]
    pub view: (f32, f32),

    /// Crop config TOML
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let (width, height) = probe_image(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let kind = MediaKind::from_path(&args.file);

    let sample = sample_size(width, height, config.max_decode_dimension);
    let (decoded_w, decoded_h) = (width / sample, height / sample);

    let mut controller = CropController::new(config, args.view.0, args.view.1);
    controller.load_image(decoded_w, decoded_h)?;
    let region = controller.pixel_region()?;

    print_info(
        &args.file,
        kind,
        (width, height),
        (decoded_w, decoded_h),
        &controller,
        &region,
    );
    Ok(())
}
