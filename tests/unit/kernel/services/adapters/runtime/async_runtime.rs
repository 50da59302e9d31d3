use super::*;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

const BOX: SearchBoxId = SearchBoxId(7);

#[test]
fn armed_timer_reports_its_generation() {
    let (tx, rx) = mpsc::channel();
    let mut runtime = SearchRuntime::new(tx).unwrap();

    runtime.arm_debounce(BOX, 3, Instant::now() + Duration::from_millis(20));
    assert_eq!(runtime.armed_generation(BOX), Some(3));

    let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(
        msg,
        NavigatorMessage::DebounceElapsed {
            box_id: BOX,
            generation: 3
        }
    );
}

#[test]
fn cancelled_timer_never_reports() {
    let (tx, rx) = mpsc::channel();
    let mut runtime = SearchRuntime::new(tx).unwrap();

    runtime.arm_debounce(BOX, 1, Instant::now() + Duration::from_millis(50));
    assert!(runtime.cancel_debounce(BOX));
    assert_eq!(
        rx.recv_timeout(Duration::from_millis(200)),
        Err(RecvTimeoutError::Timeout)
    );

    // nothing left to cancel
    assert!(!runtime.cancel_debounce(BOX));
}

#[test]
fn rearming_supersedes_previous_timer() {
    let (tx, rx) = mpsc::channel();
    let mut runtime = SearchRuntime::new(tx).unwrap();

    let now = Instant::now();
    runtime.arm_debounce(BOX, 1, now + Duration::from_millis(60));
    runtime.arm_debounce(BOX, 2, now + Duration::from_millis(80));

    let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(
        msg,
        NavigatorMessage::DebounceElapsed {
            box_id: BOX,
            generation: 2
        }
    );
    assert_eq!(
        rx.recv_timeout(Duration::from_millis(100)),
        Err(RecvTimeoutError::Timeout)
    );
}

#[test]
fn boxes_have_independent_timers() {
    let (tx, rx) = mpsc::channel();
    let mut runtime = SearchRuntime::new(tx).unwrap();

    let other = SearchBoxId(8);
    let now = Instant::now();
    runtime.arm_debounce(BOX, 1, now + Duration::from_millis(20));
    runtime.arm_debounce(other, 1, now + Duration::from_millis(20));

    let mut seen = vec![
        rx.recv_timeout(Duration::from_secs(2)).unwrap(),
        rx.recv_timeout(Duration::from_secs(2)).unwrap(),
    ];
    seen.sort_by_key(|m| match m {
        NavigatorMessage::DebounceElapsed { box_id, .. } => box_id.0,
    });
    assert_eq!(
        seen,
        vec![
            NavigatorMessage::DebounceElapsed {
                box_id: BOX,
                generation: 1
            },
            NavigatorMessage::DebounceElapsed {
                box_id: other,
                generation: 1
            },
        ]
    );
}

#[test]
fn cancel_after_fire_is_noop() {
    let (tx, rx) = mpsc::channel();
    let mut runtime = SearchRuntime::new(tx).unwrap();

    runtime.arm_debounce(BOX, 5, Instant::now());
    rx.recv_timeout(Duration::from_secs(2)).unwrap();
    // the task may still be finishing its send; either way nothing else arrives
    runtime.cancel_debounce(BOX);
    assert_eq!(runtime.armed_generation(BOX), None);
    assert_eq!(
        rx.recv_timeout(Duration::from_millis(50)),
        Err(RecvTimeoutError::Timeout)
    );
}
