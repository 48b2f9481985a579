use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::{info, warn};

use crate::error::{MediaPickError, Result};
use crate::io::orientation::{read_orientation, Orientation};

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(MediaPickError::InputMissing(path.to_path_buf()))
    }
}

/// Largest power-of-two divisor that keeps both sides at or above `max_dimension`.
pub fn sample_size(width: u32, height: u32, max_dimension: u32) -> u32 {
    let mut sample = 1u32;
    if max_dimension == 0 {
        return sample;
    }
    while width / (sample * 2) >= max_dimension && height / (sample * 2) >= max_dimension {
        sample *= 2;
    }
    sample
}

/// Decode an image, halve it while both sides stay at or above
/// `max_dimension`, and upright it according to its EXIF orientation.
pub fn load_and_downscale(path: &Path, max_dimension: u32) -> Result<DynamicImage> {
    ensure_exists(path)?;
    let decoded = image::open(path)?;
    let (w, h) = (decoded.width(), decoded.height());
    if w == 0 || h == 0 {
        return Err(MediaPickError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let sample = sample_size(w, h, max_dimension);
    let scaled = if sample > 1 {
        decoded.resize_exact(w / sample, h / sample, FilterType::Triangle)
    } else {
        decoded
    };

    let orientation = read_orientation(path).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable EXIF data");
        Orientation::Identity
    });
    let upright = orientation.apply(scaled);

    info!(
        path = %path.display(),
        source_width = w,
        source_height = h,
        sample,
        width = upright.width(),
        height = upright.height(),
        "Image loaded"
    );
    Ok(upright)
}

/// Pixel dimensions as displayed, without decoding the pixel data.
pub fn probe_image(path: &Path) -> Result<(u32, u32)> {
    ensure_exists(path)?;
    let (w, h) = image::image_dimensions(path)?;
    let orientation = read_orientation(path).unwrap_or_default();
    Ok(if orientation.swaps_axes() { (h, w) } else { (w, h) })
}

/// Write a cropped image, choosing the format from the file extension.
/// Unknown extensions are written as PNG.
pub fn save_cropped(image: &DynamicImage, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => {
            DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, ImageFormat::Jpeg)?
        }
        Some("tiff" | "tif") => image.save_with_format(path, ImageFormat::Tiff)?,
        _ => image.save_with_format(path, ImageFormat::Png)?,
    }
    info!(path = %path.display(), width = image.width(), height = image.height(), "Crop saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_powers_of_two() {
        assert_eq!(sample_size(4000, 3000, 1024), 2);
        assert_eq!(sample_size(8192, 8192, 1024), 8);
        assert_eq!(sample_size(1000, 4000, 1024), 1);
        assert_eq!(sample_size(2048, 2048, 1024), 2);
    }
}
