//! Tests for cancellable virtual-time timers.

use gestureflow_core::{IntervalTimer, OneShotTimer};

#[test]
fn interval_timer_reports_due_ticks() {
    let mut timer = IntervalTimer::new(0, 200).expect("timer should build");
    assert_eq!(timer.poll(199), 0);
    assert_eq!(timer.poll(200), 1);
    assert_eq!(timer.poll(1_000), 4);
}

#[test]
fn cancelled_interval_timer_never_ticks_again() {
    let mut timer = IntervalTimer::new(0, 150).expect("timer should build");
    assert_eq!(timer.poll(150), 1);

    timer.cancel();
    assert_eq!(timer.poll(10_000), 0);
    assert!(timer.is_cancelled());
}

#[test]
fn one_shot_timer_fires_exactly_once() {
    let mut timer = OneShotTimer::new(1_000, 2_000).expect("timer should build");
    assert!(!timer.poll(2_999));
    assert!(timer.poll(3_000));
    assert!(!timer.poll(9_000));
    assert!(!timer.is_pending());
}

#[test]
fn cancelled_one_shot_timer_never_fires() {
    let mut timer = OneShotTimer::new(0, 500).expect("timer should build");
    timer.cancel();
    assert!(!timer.poll(10_000));
}
