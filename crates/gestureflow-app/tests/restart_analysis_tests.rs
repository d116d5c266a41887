//! Integration tests for restarting the live interpretation script.

mod common;

use gestureflow_capture::CaptureError;

#[test]
fn restart_analysis_tests_clears_results_and_replays_from_first_line() {
    let (mut app, _camera) = common::desktop_portal();
    app.webcam_mut().start(0).expect("start should work");
    app.tick(9_000).expect("tick should work");
    assert_eq!(app.webcam().results().len(), 3);

    app.webcam_mut()
        .restart_analysis(9_000)
        .expect("restart should work");
    assert!(app.webcam().results().is_empty());

    app.tick(12_000).expect("tick should work");
    assert_eq!(app.webcam().results(), ["Hello"]);
}

#[test]
fn restart_analysis_tests_is_rejected_while_inactive() {
    let (mut app, _camera) = common::desktop_portal();
    assert!(matches!(
        app.webcam_mut().restart_analysis(0),
        Err(CaptureError::NotActive)
    ));
}
