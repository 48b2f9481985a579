mod common;

use std::time::Duration;

use mediapick_core::config::CropConfig;
use mediapick_core::crop::aspect::{AspectMode, AspectRatio};
use mediapick_core::crop::controller::TouchEvent;
use mediapick_core::error::MediaPickError;
use mediapick_core::geometry::Point;
use mediapick_core::media::MediaKind;
use mediapick_core::session::{CropSession, SessionEvent};

use common::write_png;

const TIMEOUT: Duration = Duration::from_secs(30);

fn session() -> CropSession {
    CropSession::new(CropConfig::default(), 1000.0, 1000.0).unwrap()
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[test]
fn test_load_delivers_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 400, 300);

    let mut s = session();
    s.request_load(&path).unwrap();
    let events = s.wait_idle(TIMEOUT);
    assert_eq!(
        events,
        vec![SessionEvent::ImageLoaded {
            width: 400,
            height: 300
        }]
    );
    assert!(s.is_idle());
    assert!(s.controller().has_image());
    assert!(s.poll().is_empty());
}

#[test]
fn test_superseded_load_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_png(dir.path(), "first.png", 400, 300);
    let second = write_png(dir.path(), "second.png", 120, 200);

    let mut s = session();
    s.request_load(&first).unwrap();
    s.request_load(&second).unwrap();
    let events = s.wait_idle(TIMEOUT);
    assert_eq!(
        events,
        vec![SessionEvent::ImageLoaded {
            width: 120,
            height: 200
        }]
    );
    assert_eq!(s.controller().source_size(), Some((120, 200)));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session();
    s.request_load(&dir.path().join("gone.png")).unwrap();
    let events = s.wait_idle(TIMEOUT);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], SessionEvent::Failed(_)));
    assert!(!s.controller().has_image());
}

// ---------------------------------------------------------------------------
// Close
// ---------------------------------------------------------------------------

#[test]
fn test_results_after_close_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 400, 300);

    let mut s = session();
    s.request_load(&path).unwrap();
    s.close();
    assert!(s.wait_idle(TIMEOUT).is_empty());
    assert!(!s.controller().has_image());
    assert!(matches!(
        s.request_load(&path),
        Err(MediaPickError::SessionClosed)
    ));
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[test]
fn test_save_without_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session();
    assert!(matches!(
        s.request_save(&dir.path().join("out.png")),
        Err(MediaPickError::NoImageLoaded)
    ));
}

#[test]
fn test_full_session_saves_crop() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "photo.png", 400, 300);
    let out = dir.path().join("photo_crop.png");

    let mut s = session();
    s.select_aspect(AspectMode::Locked(AspectRatio::SQUARE));
    s.request_load(&path).unwrap();
    s.wait_idle(TIMEOUT);

    s.handle_touch(TouchEvent::DoubleTap(Point::new(500.0, 500.0)));
    while s.advance(Duration::from_millis(16)) {}

    let region = s.controller().pixel_region().unwrap();
    s.request_save(&out).unwrap();
    let events = s.wait_idle(TIMEOUT);
    match events.as_slice() {
        [SessionEvent::Saved(result)] => {
            assert_eq!(result.locator, out);
            assert_eq!(result.kind, MediaKind::Image);
            assert_eq!((result.width, result.height), (region.width, region.height));
            assert_eq!(result.duration_ms, None);
        }
        other => panic!("unexpected events: {other:?}"),
    }
    assert_eq!(
        image::image_dimensions(&out).unwrap(),
        (region.width, region.height)
    );
}
