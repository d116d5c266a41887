//! Integration tests for transfer progress monotonicity.

mod common;

use gestureflow_core::TransferPhase;
use gestureflow_media::VIDEO_UPLOADED_MSG;
use gestureflow_ui::NoticeLevel;

#[test]
fn transfer_monotonicity_tests_video_progress_never_regresses() {
    let (mut app, _camera) = common::desktop_portal();
    app.video_mut()
        .select_file(&common::video_file(), 0)
        .expect("selection should work");

    let mut observed = vec![app.video().transfer().progress];
    // Uneven polling cadence must not break the 0-100 monotonic contract.
    for now in [100, 151, 460, 900, 1_650, 2_999, 3_000, 4_000] {
        app.tick(now).expect("tick should work");
        observed.push(app.video().transfer().progress);
    }

    assert!(observed.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(*observed.first().expect("observed is non-empty"), 0);
    assert_eq!(*observed.last().expect("observed is non-empty"), 100);
    assert_eq!(app.video().transfer().phase, TransferPhase::Complete);
}

#[test]
fn transfer_monotonicity_tests_completion_notice_fires_once() {
    let (mut app, _camera) = common::desktop_portal();
    app.video_mut()
        .select_file(&common::video_file(), 0)
        .expect("selection should work");

    for step in 1..=40_u64 {
        app.tick(step * 150).expect("tick should work");
    }

    let uploaded: Vec<_> = app
        .drain_notices()
        .into_iter()
        .filter(|notice| notice.message == VIDEO_UPLOADED_MSG)
        .collect();
    assert_eq!(uploaded.len(), 1);
    assert_eq!(uploaded[0].level, NoticeLevel::Success);
}
