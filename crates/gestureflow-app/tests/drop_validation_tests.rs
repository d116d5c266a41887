//! Integration tests for drop-event MIME validation.

mod common;

use gestureflow_core::TransferPhase;
use gestureflow_media::{INVALID_IMAGE_DROP_MSG, IntakeError};
use gestureflow_ui::NoticeLevel;

#[test]
fn drop_validation_tests_text_drop_is_rejected_without_state_change() {
    let (mut app, _camera) = common::desktop_portal();

    let result = app.image_mut().drop_file(&common::text_file(), 0);
    assert!(matches!(
        result,
        Err(IntakeError::UnsupportedMediaType { .. })
    ));
    assert!(app.image().asset().is_none());
    assert_eq!(app.image().transfer().phase, TransferPhase::Idle);

    let notices = app.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, INVALID_IMAGE_DROP_MSG);
}

#[test]
fn drop_validation_tests_matching_drop_starts_the_transfer() {
    let (mut app, _camera) = common::desktop_portal();

    app.image_mut()
        .drop_file(&common::image_file(), 0)
        .expect("matching drop should be accepted");
    assert!(app.image().asset().is_some());
    assert_eq!(app.image().transfer().phase, TransferPhase::Transferring);
}

#[test]
fn drop_validation_tests_video_surface_rejects_images() {
    let (mut app, _camera) = common::desktop_portal();

    let result = app.video_mut().drop_file(&common::image_file(), 0);
    assert!(matches!(
        result,
        Err(IntakeError::UnsupportedMediaType { .. })
    ));
    assert!(app.video().asset().is_none());
}
