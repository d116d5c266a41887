//! Integration tests for camera device switching.

mod common;

use gestureflow_capture::{CAMERA_SWITCH_FAILED_MSG, CaptureError};
use gestureflow_ui::NoticeLevel;

#[test]
fn device_switch_tests_inactive_switch_only_records_the_preference() {
    let (mut app, camera) = common::desktop_portal();
    app.webcam_mut()
        .switch_device("camera-2")
        .expect("inactive switch should work");
    assert!(!app.webcam().is_active());
    assert_eq!(camera.live_stream_count(), 0);

    app.webcam_mut().start(0).expect("start should work");
    assert_eq!(app.webcam().selected_device_id(), Some("camera-2"));
}

#[test]
fn device_switch_tests_active_switch_swaps_the_stream() {
    let (mut app, camera) = common::desktop_portal();
    app.webcam_mut().start(0).expect("start should work");
    app.tick(3_000).expect("tick should work");

    app.webcam_mut()
        .switch_device("camera-2")
        .expect("switch should work");
    assert!(app.webcam().is_active());
    assert_eq!(camera.live_stream_count(), 1);
    // The running script keeps emitting across a successful switch.
    app.tick(6_000).expect("tick should work");
    assert_eq!(app.webcam().results().len(), 2);
}

#[test]
fn device_switch_tests_failure_forces_inactive_with_no_stream() {
    let (mut app, camera) = common::desktop_portal();
    app.webcam_mut().start(0).expect("start should work");

    camera.inject_open_failure(CaptureError::DeviceBusy("camera-2".to_string()));
    let result = app.webcam_mut().switch_device("camera-2");

    assert!(matches!(result, Err(CaptureError::DeviceBusy(_))));
    assert!(!app.webcam().is_active());
    assert_eq!(camera.live_stream_count(), 0);

    let notices = app.drain_notices();
    let failure = notices
        .iter()
        .find(|notice| notice.message == CAMERA_SWITCH_FAILED_MSG)
        .expect("switch failure notice should surface");
    assert_eq!(failure.level, NoticeLevel::Error);
}

#[test]
fn device_switch_tests_unknown_device_while_active_forces_inactive() {
    let (mut app, camera) = common::desktop_portal();
    app.webcam_mut().start(0).expect("start should work");

    let result = app.webcam_mut().switch_device("camera-9");
    assert!(matches!(result, Err(CaptureError::UnknownDevice(_))));
    assert!(!app.webcam().is_active());
    assert_eq!(camera.live_stream_count(), 0);
}
