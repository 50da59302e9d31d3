use super::*;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn props_delay_overrides_default() {
    let sb = SearchBox::new(SearchBoxProps::with_delay_ms(250)).unwrap();
    assert_eq!(sb.debounce().delay(), ms(250));

    let sb = SearchBox::new(SearchBoxProps::default()).unwrap();
    assert_eq!(sb.debounce().delay(), ms(50));
}

#[test]
fn zero_delay_props_fail_fast() {
    let err = SearchBox::new(SearchBoxProps::with_delay_ms(0)).unwrap_err();
    assert_eq!(err, ConfigError::NonPositiveDelay);
}

#[test]
fn typing_opens_box_and_arms_timer() {
    let t0 = Instant::now();
    let mut sb = SearchBox::new(SearchBoxProps::with_delay_ms(100)).unwrap();
    assert!(!sb.is_visible());

    let outcome = sb.handle_key(SearchBoxKey::Char('r'), t0);
    assert!(outcome.changed);
    assert!(outcome.event.is_none());
    assert_eq!(
        outcome.timer,
        Some(TimerRequest::Arm {
            generation: 1,
            deadline: t0 + ms(100),
        })
    );
    assert!(sb.is_visible());
    assert_eq!(sb.text(), "r");

    sb.handle_key(SearchBoxKey::Char('m'), t0 + ms(30));
    assert_eq!(sb.poll(t0 + ms(100)), None);
    assert_eq!(
        sb.poll(t0 + ms(130)),
        Some(SearchBoxEvent::Query("rm".to_string()))
    );
}

#[test]
fn control_chars_are_ignored() {
    let mut sb = SearchBox::new(SearchBoxProps::default()).unwrap();
    let outcome = sb.handle_key(SearchBoxKey::Char('\n'), Instant::now());
    assert!(!outcome.changed);
    assert!(!sb.is_visible());
}

#[test]
fn escape_closes_and_cancels() {
    let t0 = Instant::now();
    let mut sb = SearchBox::new(SearchBoxProps::with_delay_ms(100)).unwrap();
    sb.handle_key(SearchBoxKey::Char('a'), t0);

    let outcome = sb.handle_key(SearchBoxKey::Escape, t0 + ms(10));
    assert_eq!(outcome.event, Some(SearchBoxEvent::Closed));
    assert_eq!(outcome.timer, Some(TimerRequest::Cancel));
    assert!(!sb.is_visible());
    assert_eq!(sb.text(), "");
    assert_eq!(sb.poll(t0 + ms(500)), None);

    let outcome = sb.handle_key(SearchBoxKey::Escape, t0 + ms(600));
    assert!(outcome.event.is_none());
}

#[test]
fn arrows_navigate_only_while_visible() {
    let t0 = Instant::now();
    let mut sb = SearchBox::new(SearchBoxProps::default()).unwrap();
    assert!(sb.handle_key(SearchBoxKey::Down, t0).event.is_none());

    sb.handle_key(SearchBoxKey::Char('a'), t0);
    assert_eq!(
        sb.handle_key(SearchBoxKey::Down, t0).event,
        Some(SearchBoxEvent::Next)
    );
    assert_eq!(
        sb.handle_key(SearchBoxKey::Up, t0).event,
        Some(SearchBoxEvent::Previous)
    );
}

#[test]
fn fire_uses_generation_from_arm_request() {
    let t0 = Instant::now();
    let mut sb = SearchBox::new(SearchBoxProps::with_delay_ms(100)).unwrap();
    let first = sb.handle_key(SearchBoxKey::Char('a'), t0).timer;
    let second = sb.handle_key(SearchBoxKey::Char('b'), t0 + ms(10)).timer;

    let (Some(TimerRequest::Arm { generation: g1, .. }), Some(TimerRequest::Arm { generation: g2, .. })) =
        (first, second)
    else {
        panic!("expected arm requests");
    };

    assert_eq!(sb.fire(g1, t0 + ms(100)), None);
    assert_eq!(
        sb.fire(g2, t0 + ms(110)),
        Some(SearchBoxEvent::Query("ab".to_string()))
    );
}

#[test]
fn backspace_on_empty_box_does_nothing() {
    let t0 = Instant::now();
    let mut sb = SearchBox::new(SearchBoxProps::default()).unwrap();
    sb.handle_key(SearchBoxKey::Char('a'), t0);
    assert!(sb.handle_key(SearchBoxKey::Backspace, t0).changed);
    let outcome = sb.handle_key(SearchBoxKey::Backspace, t0);
    assert!(!outcome.changed);
    assert!(outcome.timer.is_none());
}
