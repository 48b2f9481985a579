use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use mediapick_core::crop::aspect::AspectMode;
use mediapick_core::gesture::GestureScript;
use mediapick_core::session::{CropSession, SessionEvent};
use tracing::debug;

use super::{load_config, parse_aspect, parse_view};
use crate::summary::{print_crop_summary, print_media_result};

const WORKER_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Args)]
pub struct CropArgs {
    /// Input image file
    pub file: PathBuf,

    /// Output image (auto-generated if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Aspect ratio: free, 1:1, 4:5, 16:9, 9:16 or any W:H up to 10:1 or 1:10
    #[arg(long, value_parser = parse_aspect)]
    pub aspect: Option<AspectMode>,

    /// View size the crop is laid out in
    #[arg(long, value_parser = parse_view, default_value = "1000x1000")]
    pub view: (f32, f32),

    /// Gesture script TOML replayed before cropping
    #[arg(long)]
    pub gestures: Option<PathBuf>,

    /// Crop config TOML
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = match &args.gestures {
        Some(path) => Some(
            GestureScript::load(path)
                .with_context(|| format!("Failed to load gestures from {}", path.display()))?,
        ),
        None => None,
    };

    let mut session = CropSession::new(config, args.view.0, args.view.1)?;
    if let Some(mode) = args.aspect {
        session.select_aspect(mode);
    }

    session.request_load(&args.file)?;
    let loaded = expect_event(session.wait_idle(WORKER_TIMEOUT), "load")?;
    if !matches!(loaded, SessionEvent::ImageLoaded { .. }) {
        bail!("Unexpected result while loading {}", args.file.display());
    }

    if let Some(script) = &script {
        script.replay(session.controller_mut())?;
    }

    let region = session.controller().pixel_region()?;
    print_crop_summary(&args.file, session.controller(), &region);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| crop_output_path(&args.file, region.width, region.height));

    debug!(output = %output.display(), ?region, "Saving crop");
    session.request_save(&output)?;
    match expect_event(session.wait_idle(WORKER_TIMEOUT), "save")? {
        SessionEvent::Saved(result) => print_media_result(&result),
        other => bail!("Unexpected result while saving: {other:?}"),
    }
    session.close();
    Ok(())
}

/// Single event from a finished request, turning failures into errors.
fn expect_event(events: Vec<SessionEvent>, what: &str) -> Result<SessionEvent> {
    match events.into_iter().next() {
        Some(SessionEvent::Failed(message)) => bail!("Failed to {what} image: {message}"),
        Some(event) => Ok(event),
        None => bail!("Timed out waiting for image {what}"),
    }
}

fn crop_output_path(source: &Path, w: u32, h: u32) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = source.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_crop{w}x{h}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_output_path() {
        let p = crop_output_path(Path::new("/tmp/photos/cat.jpg"), 640, 480);
        assert_eq!(p, PathBuf::from("/tmp/photos/cat_crop640x480.png"));
    }
}
