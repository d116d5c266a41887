//! Integration tests for controller-boundary error surfacing.

mod common;

use gestureflow_capture::{
    CAMERA_STARTED_MSG, CAMERA_UNAVAILABLE_MSG, CaptureError, DEVICES_UNAVAILABLE_MSG,
};
use gestureflow_ui::NoticeLevel;

#[test]
fn notice_surfacing_tests_acquisition_failure_stays_inactive() {
    let (mut app, camera) = common::desktop_portal();
    camera.inject_open_failure(CaptureError::PermissionDenied);

    let result = app.webcam_mut().start(0);
    assert!(matches!(result, Err(CaptureError::PermissionDenied)));
    assert!(!app.webcam().is_active());

    let notices = app.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, CAMERA_UNAVAILABLE_MSG);
}

#[test]
fn notice_surfacing_tests_enumeration_failure_does_not_block_acquisition() {
    let (mut app, camera) = common::desktop_portal();
    camera.inject_enumeration_failure("listing failed");

    // Acquisition falls back to the system default device.
    app.webcam_mut().start(0).expect("start should work");
    assert!(app.webcam().is_active());

    let messages: Vec<_> = app
        .drain_notices()
        .into_iter()
        .map(|notice| notice.message)
        .collect();
    assert_eq!(messages, [DEVICES_UNAVAILABLE_MSG, CAMERA_STARTED_MSG]);
}

#[test]
fn notice_surfacing_tests_errors_never_drop_held_assets() {
    let (mut app, _camera) = common::desktop_portal();
    app.image_mut()
        .select_file(&common::image_file(), 0)
        .expect("selection should work");

    let held = app.image().asset().cloned();
    let _ = app.image_mut().drop_file(&common::text_file(), 100);

    assert_eq!(app.image().asset().cloned(), held);
}
