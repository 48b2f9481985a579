mod common;

use image::DynamicImage;
use mediapick_core::error::MediaPickError;
use mediapick_core::io::crop::{crop_image, CropRect};
use mediapick_core::io::image_io::{load_and_downscale, probe_image, save_cropped};

use common::{gradient_image, write_png};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_small_image_unscaled() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "small.png", 64, 48);
    let img = load_and_downscale(&path, 1024).unwrap();
    assert_eq!((img.width(), img.height()), (64, 48));
}

#[test]
fn test_load_halves_until_bound() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "big.png", 400, 300);
    // 400x300 -> 200x150 -> 100x75 would drop below 100
    let img = load_and_downscale(&path, 100).unwrap();
    assert_eq!((img.width(), img.height()), (200, 150));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_and_downscale(&dir.path().join("nope.png"), 1024).unwrap_err();
    assert!(matches!(err, MediaPickError::InputMissing(_)));
}

#[test]
fn test_load_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not an image").unwrap();
    assert!(load_and_downscale(&path, 1024).is_err());
}

#[test]
fn test_probe_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "probe.png", 33, 17);
    assert_eq!(probe_image(&path).unwrap(), (33, 17));
    assert!(matches!(
        probe_image(&dir.path().join("missing.jpg")),
        Err(MediaPickError::InputMissing(_))
    ));
}

// ---------------------------------------------------------------------------
// Cropping and saving
// ---------------------------------------------------------------------------

#[test]
fn test_crop_image_rejects_out_of_bounds() {
    let img = gradient_image(20, 20);
    let r = CropRect {
        x: 10,
        y: 10,
        width: 11,
        height: 5,
    };
    assert!(matches!(
        crop_image(&img, &r),
        Err(MediaPickError::InvalidCrop(_))
    ));
}

#[test]
fn test_save_png_and_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let img = gradient_image(32, 16);

    let png = dir.path().join("out.png");
    save_cropped(&img, &png).unwrap();
    let back = image::open(&png).unwrap();
    assert_eq!((back.width(), back.height()), (32, 16));

    let jpg = dir.path().join("out.jpg");
    save_cropped(&DynamicImage::ImageRgba8(img.to_rgba8()), &jpg).unwrap();
    assert_eq!(image::image_dimensions(&jpg).unwrap(), (32, 16));
}

#[test]
fn test_save_unknown_extension_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.crop");
    save_cropped(&gradient_image(8, 8), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}
