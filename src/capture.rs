//! Capture state machine.
//!
//! Converts a time-stamped stream of per-frame gesture verdicts into
//! debounced, cooldown-guarded capture decisions:
//!
//! - a capture fires only after the gesture has been continuously true for
//!   the configured hold duration;
//! - breaking the gesture before the threshold resets the hold entirely (no
//!   partial credit, so a true/false flicker cannot be stitched into a
//!   capture);
//! - after a capture, verdicts are ignored until the cooldown expires, so a
//!   continuously held gesture cannot rapid-fire.
//!
//! The machine holds no history beyond one [`CaptureState`] value: each
//! transition depends only on the current state, verdict, and timestamp.
//! Timestamps are durations since session start supplied by the caller, so
//! every property is testable without a camera or a wall clock.

use std::time::Duration;

/// Hold and cooldown durations, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct CaptureConfig {
    /// How long the gesture must be continuously true before capture fires.
    pub hold: Duration,
    /// How long after a capture new holds are suppressed.
    pub cooldown: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            hold: Duration::from_secs(2),
            cooldown: Duration::from_secs(2),
        }
    }
}

/// The machine's single state slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// No active hold.
    Idle,
    /// Gesture continuously true since `since`.
    Holding { since: Duration },
    /// A capture just fired; holds suppressed until `until`.
    Cooldown { until: Duration },
}

/// Emitted once per completed hold, on the Holding -> Cooldown transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureEvent {
    /// Timestamp of the tick that completed the hold.
    pub at: Duration,
}

/// Advisory state for the UI layer; informational only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAdvisory {
    /// Time remaining until capture, while a hold is in progress.
    Countdown(Duration),
    /// Post-capture cooldown is in effect.
    CooldownActive,
}

/// Outputs of one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutput {
    pub event: Option<CaptureEvent>,
    pub advisory: Option<UiAdvisory>,
}

/// Hold/cooldown state machine. Owned by a single control loop; stepped
/// once per frame tick, in acquisition order.
pub struct CaptureStateMachine {
    config: CaptureConfig,
    state: CaptureState,
    last_at: Duration,
}

impl CaptureStateMachine {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            state: CaptureState::Idle,
            last_at: Duration::ZERO,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Advance one frame tick.
    pub fn step(&mut self, verdict: bool, at: Duration) -> TickOutput {
        // A backwards timestamp violates the monotonic-clock precondition;
        // clamp to the last seen instant instead of propagating it.
        let at = at.max(self.last_at);
        self.last_at = at;

        // Cooldown expiry releases the machine before the verdict is
        // applied, so a gesture still held at expiry starts a fresh hold
        // within this same tick.
        if let CaptureState::Cooldown { until } = self.state {
            if at >= until {
                self.state = CaptureState::Idle;
            }
        }

        let (next, output) = match (self.state, verdict) {
            (CaptureState::Cooldown { until }, _) => (
                CaptureState::Cooldown { until },
                TickOutput {
                    event: None,
                    advisory: Some(UiAdvisory::CooldownActive),
                },
            ),
            (CaptureState::Idle, false) => (CaptureState::Idle, TickOutput::default()),
            (CaptureState::Idle, true) => (
                CaptureState::Holding { since: at },
                TickOutput {
                    event: None,
                    advisory: Some(UiAdvisory::Countdown(self.config.hold)),
                },
            ),
            (CaptureState::Holding { .. }, false) => (CaptureState::Idle, TickOutput::default()),
            (CaptureState::Holding { since }, true) => {
                let held = at - since;
                if held >= self.config.hold {
                    (
                        CaptureState::Cooldown {
                            until: at + self.config.cooldown,
                        },
                        TickOutput {
                            event: Some(CaptureEvent { at }),
                            advisory: None,
                        },
                    )
                } else {
                    (
                        CaptureState::Holding { since },
                        TickOutput {
                            event: None,
                            advisory: Some(UiAdvisory::Countdown(self.config.hold - held)),
                        },
                    )
                }
            }
        };

        self.state = next;
        output
    }
}

impl Default for CaptureStateMachine {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}
