use image::DynamicImage;
use tracing::{info, warn};

use crate::crop::controller::CropController;
use crate::error::{MediaPickError, Result};
use crate::geometry::{Affine, RectF};
use crate::io::crop::{crop_image, CropRect};

/// Map a screen-space crop rectangle into source pixel space.
pub fn source_crop_rect(matrix: &Affine, crop: &RectF) -> Option<RectF> {
    matrix.invert().map(|inv| inv.map_rect(crop))
}

/// Round a source-space rectangle to whole pixels and clamp it to the image.
///
/// A rectangle that misses the image entirely selects the whole image.
pub fn pixel_region(rect: &RectF, src_w: u32, src_h: u32) -> CropRect {
    let whole = CropRect {
        x: 0,
        y: 0,
        width: src_w,
        height: src_h,
    };
    if !rect.is_valid() {
        warn!(?rect, "Crop region is degenerate, using whole image");
        return whole;
    }

    let left = rect.left.round().clamp(0.0, src_w as f32) as u32;
    let top = rect.top.round().clamp(0.0, src_h as f32) as u32;
    let right = rect.right.round().clamp(0.0, src_w as f32) as u32;
    let bottom = rect.bottom.round().clamp(0.0, src_h as f32) as u32;

    if right <= left || bottom <= top {
        warn!(?rect, src_w, src_h, "Crop region misses the image, using whole image");
        return whole;
    }

    CropRect {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    }
}

/// Cut the region selected by `controller` out of `image`.
///
/// `image` must be the same pixels the controller was loaded with.
pub fn extract(controller: &CropController, image: &DynamicImage) -> Result<DynamicImage> {
    let (width, height) = controller
        .source_size()
        .ok_or(MediaPickError::NoImageLoaded)?;
    if (width, height) != (image.width(), image.height()) {
        return Err(MediaPickError::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        });
    }
    let region = controller.pixel_region()?;
    info!(
        x = region.x,
        y = region.y,
        width = region.width,
        height = region.height,
        "Extracting crop"
    );
    crop_image(image, &region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_region_rounds_and_clamps() {
        let r = pixel_region(&RectF::new(-3.2, 10.4, 50.6, 120.0), 40, 100);
        assert_eq!(
            r,
            CropRect {
                x: 0,
                y: 10,
                width: 40,
                height: 90
            }
        );
    }

    #[test]
    fn test_pixel_region_outside_is_whole_image() {
        let r = pixel_region(&RectF::new(200.0, 200.0, 300.0, 300.0), 40, 100);
        assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 40, 100));
    }
}
