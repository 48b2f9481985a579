use image::DynamicImage;

use crate::error::{MediaPickError, Result};

/// A rectangle in source pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Check the rect is non-empty and lies inside a `src_w` x `src_h` image.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<CropRect> {
        if self.width == 0 || self.height == 0 {
            return Err(MediaPickError::InvalidCrop(
                "Crop width and height must be > 0".into(),
            ));
        }

        let fits_x = self.x.checked_add(self.width).is_some_and(|r| r <= src_w);
        let fits_y = self.y.checked_add(self.height).is_some_and(|b| b <= src_h);
        if !fits_x || !fits_y {
            return Err(MediaPickError::InvalidCrop(format!(
                "Crop region ({},{} {}x{}) exceeds source dimensions ({src_w}x{src_h})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }
}

/// Copy the pixels under `crop` out of `image`.
pub fn crop_image(image: &DynamicImage, crop: &CropRect) -> Result<DynamicImage> {
    let v = crop.validated(image.width(), image.height())?;
    Ok(image.crop_imm(v.x, v.y, v.width, v.height))
}
