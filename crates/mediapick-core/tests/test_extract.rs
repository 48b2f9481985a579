mod common;

use image::GenericImageView;
use mediapick_core::config::CropConfig;
use mediapick_core::crop::aspect::{AspectMode, AspectRatio};
use mediapick_core::crop::controller::{CropController, TouchEvent};
use mediapick_core::crop::extract::{extract, pixel_region, source_crop_rect};
use mediapick_core::error::MediaPickError;
use mediapick_core::geometry::{Affine, Point, RectF};

use common::gradient_image;

fn controller_400x300() -> CropController {
    let mut c = CropController::new(CropConfig::default(), 500.0, 500.0);
    c.set_aspect_mode(AspectMode::Locked(AspectRatio::SQUARE));
    c.load_image(400, 300).unwrap();
    c
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

#[test]
fn test_source_rect_from_known_transform() {
    let m = Affine::scale_translate(2.0, 10.0, 20.0);
    let r = source_crop_rect(&m, &RectF::new(30.0, 40.0, 130.0, 240.0)).unwrap();
    assert_eq!(r, RectF::new(10.0, 10.0, 60.0, 110.0));
}

#[test]
fn test_singular_transform_has_no_source_rect() {
    let m = Affine::scale(0.0, 0.0);
    assert!(source_crop_rect(&m, &RectF::from_size(10.0, 10.0)).is_none());
}

#[test]
fn test_pixel_region_matches_controller() {
    let c = controller_400x300();
    let mapped = c.source_crop_rect().unwrap();
    assert_eq!(c.pixel_region().unwrap(), pixel_region(&mapped, 400, 300));
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[test]
fn test_extract_initial_square() {
    let c = controller_400x300();
    let img = gradient_image(400, 300);
    let out = extract(&c, &img).unwrap();
    assert_eq!(out.dimensions(), (300, 300));
    // red channel encodes x: the crop starts 50 px in
    assert_eq!(out.get_pixel(0, 0).0[0], 50);
    assert_eq!(out.get_pixel(0, 0).0[1], 0);
}

#[test]
fn test_extract_after_zoom_matches_region() {
    let mut c = controller_400x300();
    c.handle(TouchEvent::DoubleTap(Point::new(250.0, 250.0)));
    c.finish_animations();

    let img = gradient_image(400, 300);
    let region = c.pixel_region().unwrap();
    let out = extract(&c, &img).unwrap();
    assert_eq!(out.dimensions(), (region.width, region.height));
    assert_eq!(out.get_pixel(0, 0).0[0], (region.x % 256) as u8);
    assert_eq!(out.get_pixel(0, 0).0[1], (region.y % 256) as u8);
    assert!((region.width as i64 - 150).abs() <= 1);
}

#[test]
fn test_extract_without_image_fails() {
    let c = CropController::new(CropConfig::default(), 500.0, 500.0);
    let img = gradient_image(10, 10);
    assert!(matches!(extract(&c, &img), Err(MediaPickError::NoImageLoaded)));
}

#[test]
fn test_extract_rejects_mismatched_pixels() {
    let c = controller_400x300();
    let img = gradient_image(200, 150);
    assert!(matches!(
        extract(&c, &img),
        Err(MediaPickError::InvalidDimensions { .. })
    ));
}
