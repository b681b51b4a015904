use std::time::Duration;

use peacecam::{
    CaptureConfig, CaptureEvent, CaptureState, CaptureStateMachine, UiAdvisory,
};

fn secs(s: f64) -> Duration {
    Duration::from_millis((s * 1000.0).round() as u64)
}

fn machine() -> CaptureStateMachine {
    CaptureStateMachine::new(CaptureConfig {
        hold: secs(2.0),
        cooldown: secs(2.0),
    })
}

/// Feed a constant verdict over [from, to) at the given tick interval,
/// returning every emitted event.
fn feed(
    machine: &mut CaptureStateMachine,
    verdict: bool,
    from: f64,
    to: f64,
    step: f64,
) -> Vec<CaptureEvent> {
    let mut events = Vec::new();
    let mut t = from;
    while t < to {
        if let Some(event) = machine.step(verdict, secs(t)).event {
            events.push(event);
        }
        t += step;
    }
    events
}

#[test]
fn idle_with_false_verdict_is_idempotent() {
    let mut m = machine();
    for i in 0..100 {
        let out = m.step(false, secs(i as f64 * 0.1));
        assert_eq!(out.event, None);
        assert_eq!(out.advisory, None);
        assert_eq!(m.state(), CaptureState::Idle);
    }
}

#[test]
fn exactly_one_event_per_completed_hold() {
    // Coarse ticks.
    let mut m = machine();
    let events = feed(&mut m, true, 0.0, 2.5, 0.5);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].at, secs(2.0));

    // Fine ticks: granularity must not change the count.
    let mut m = machine();
    let events = feed(&mut m, true, 0.0, 2.5, 0.05);
    assert_eq!(events.len(), 1);

    // Releasing the gesture afterwards emits nothing further.
    let mut m = machine();
    let mut events = feed(&mut m, true, 0.0, 2.2, 0.1);
    events.extend(feed(&mut m, false, 2.2, 3.0, 0.1));
    assert_eq!(events.len(), 1);
}

#[test]
fn broken_holds_earn_no_partial_credit() {
    let mut m = machine();

    // 1.9 s of true, then a break: the accumulated time is discarded.
    assert!(feed(&mut m, true, 0.0, 1.9, 0.1).is_empty());
    assert!(feed(&mut m, false, 1.9, 2.1, 0.1).is_empty());

    // Another 1.9 s of true: still no event, despite 3.8 s total.
    assert!(feed(&mut m, true, 2.1, 3.9, 0.1).is_empty());
    assert_eq!(m.state(), CaptureState::Holding { since: secs(2.1) });

    // Only an unbroken run reaching the hold duration fires.
    let events = feed(&mut m, true, 3.9, 4.2, 0.1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].at, secs(4.1));
}

#[test]
fn countdown_advisory_reports_time_remaining() {
    let mut m = machine();
    let out = m.step(true, secs(0.0));
    assert_eq!(out.advisory, Some(UiAdvisory::Countdown(secs(2.0))));

    let out = m.step(true, secs(1.5));
    assert_eq!(out.advisory, Some(UiAdvisory::Countdown(secs(0.5))));
}

#[test]
fn cooldown_suppresses_and_never_extends() {
    let mut m = machine();
    let events = feed(&mut m, true, 0.0, 2.1, 0.1);
    assert_eq!(events.len(), 1);
    assert_eq!(m.state(), CaptureState::Cooldown { until: secs(4.0) });

    // Continuous true through the whole cooldown: zero events, and the
    // cooldown deadline does not move.
    let events = feed(&mut m, true, 2.1, 3.9, 0.1);
    assert!(events.is_empty());
    assert_eq!(m.state(), CaptureState::Cooldown { until: secs(4.0) });
    assert_eq!(
        m.step(true, secs(3.95)).advisory,
        Some(UiAdvisory::CooldownActive)
    );

    // After expiry a fresh full hold is required before the next event.
    let out = m.step(true, secs(4.05));
    assert_eq!(out.event, None);
    assert_eq!(m.state(), CaptureState::Holding { since: secs(4.05) });

    let events = feed(&mut m, true, 4.1, 6.2, 0.1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].at, secs(6.1));
}

#[test]
fn sparse_tick_scenario_matches_expected_trace() {
    // hold = 2.0, cooldown = 2.0; ticks at 0.0, 1.0, 2.1, 3.0, 4.2.
    let mut m = machine();

    let out = m.step(true, secs(0.0));
    assert_eq!(out.event, None);
    assert_eq!(m.state(), CaptureState::Holding { since: secs(0.0) });

    let out = m.step(true, secs(1.0));
    assert_eq!(out.event, None);
    assert_eq!(out.advisory, Some(UiAdvisory::Countdown(secs(1.0))));

    let out = m.step(true, secs(2.1));
    assert_eq!(out.event, Some(CaptureEvent { at: secs(2.1) }));
    assert_eq!(m.state(), CaptureState::Cooldown { until: secs(4.1) });

    let out = m.step(true, secs(3.0));
    assert_eq!(out.event, None);
    assert_eq!(out.advisory, Some(UiAdvisory::CooldownActive));
    assert_eq!(m.state(), CaptureState::Cooldown { until: secs(4.1) });

    // Cooldown expired: the same tick starts a fresh hold, no event.
    let out = m.step(true, secs(4.2));
    assert_eq!(out.event, None);
    assert_eq!(m.state(), CaptureState::Holding { since: secs(4.2) });
}

#[test]
fn verdict_during_cooldown_is_ignored_entirely() {
    let mut m = machine();
    feed(&mut m, true, 0.0, 2.1, 0.1);
    assert!(matches!(m.state(), CaptureState::Cooldown { .. }));

    // A false verdict during cooldown changes nothing either.
    let out = m.step(false, secs(3.0));
    assert_eq!(out.advisory, Some(UiAdvisory::CooldownActive));
    assert_eq!(m.state(), CaptureState::Cooldown { until: secs(4.0) });

    // Expiry with a false verdict lands in Idle.
    let out = m.step(false, secs(4.5));
    assert_eq!(out.event, None);
    assert_eq!(out.advisory, None);
    assert_eq!(m.state(), CaptureState::Idle);
}
