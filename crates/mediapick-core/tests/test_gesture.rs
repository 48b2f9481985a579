mod common;

use mediapick_core::crop::aspect::{AspectMode, AspectRatio};
use mediapick_core::crop::controller::DragState;
use mediapick_core::gesture::{GestureScript, GestureStep};

use common::square_controller;

#[test]
fn test_replay_corner_drag_recenters() {
    let mut c = square_controller();
    let script = GestureScript {
        steps: vec![
            GestureStep::Down { x: 940.0, y: 940.0 },
            GestureStep::Move { x: 700.0, y: 700.0 },
            GestureStep::Up,
        ],
    };
    let before = c.pixel_region().unwrap();
    script.replay(&mut c).unwrap();

    assert_eq!(c.drag_state(), DragState::Idle);
    assert!(!c.is_animating());
    let after = c.pixel_region().unwrap();
    assert!(after.width < before.width);
    assert!((after.width as i64 - after.height as i64).abs() <= 1);
}

#[test]
fn test_replay_aspect_step() {
    let mut c = square_controller();
    let script = GestureScript::from_toml_str(
        r#"
        [[step]]
        action = "aspect"
        ratio = "4:5"

        [[step]]
        action = "wait"
        ms = 100
        "#,
    )
    .unwrap();
    script.replay(&mut c).unwrap();
    assert_eq!(c.aspect_mode(), AspectMode::Locked(AspectRatio::PORTRAIT_4_5));
    let crop = c.crop_rect();
    assert!((crop.width() / crop.height() - 0.8).abs() < 1e-3);
}

#[test]
fn test_replay_bad_aspect_fails() {
    let mut c = square_controller();
    let script = GestureScript {
        steps: vec![GestureStep::Aspect {
            ratio: "tall".into(),
        }],
    };
    assert!(script.replay(&mut c).is_err());
}

#[test]
fn test_load_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.toml");
    std::fs::write(
        &path,
        "[[step]]\naction = \"double_tap\"\nx = 500.0\ny = 500.0\n",
    )
    .unwrap();
    let script = GestureScript::load(&path).unwrap();
    assert_eq!(script.steps, vec![GestureStep::DoubleTap { x: 500.0, y: 500.0 }]);
}
