#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};
use mediapick_core::config::CropConfig;
use mediapick_core::crop::aspect::{AspectMode, AspectRatio};
use mediapick_core::crop::controller::CropController;
use mediapick_core::geometry::RectF;

pub const TOL: f32 = 1e-2;

/// Controller on a 1000x1000 view with the default config and `mode`.
pub fn controller_with(width: u32, height: u32, mode: AspectMode) -> CropController {
    let mut controller = CropController::new(CropConfig::default(), 1000.0, 1000.0);
    controller.set_aspect_mode(mode);
    controller.load_image(width, height).unwrap();
    controller
}

pub fn square_controller() -> CropController {
    controller_with(4000, 3000, AspectMode::Locked(AspectRatio::SQUARE))
}

pub fn assert_contains(outer: &RectF, inner: &RectF) {
    assert!(
        outer.contains_rect(inner, TOL),
        "{inner:?} is not inside {outer:?}"
    );
}

/// Image whose red channel encodes x and green channel encodes y.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient_image(width, height).save(&path).unwrap();
    path
}
