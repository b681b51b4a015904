//! Per-frame orchestration: classify each observed hand, aggregate the
//! verdicts, step the capture state machine. No I/O happens here; the host
//! loop owns rendering and persistence.

use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;

use crate::capture::{CaptureConfig, CaptureState, CaptureStateMachine, TickOutput};
use crate::gesture::{GestureClassifier, GestureConfig};
use crate::hand::HandObservation;

/// Policy for combining per-hand verdicts into one frame verdict.
///
/// A frame with no observed hands is `false` under both policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandAggregation {
    /// Any observed hand showing the gesture counts.
    #[default]
    Any,
    /// Every observed hand must show the gesture.
    All,
}

impl HandAggregation {
    pub fn combine(self, verdicts: &[bool]) -> bool {
        match self {
            HandAggregation::Any => verdicts.iter().any(|v| *v),
            HandAggregation::All => !verdicts.is_empty() && verdicts.iter().all(|v| *v),
        }
    }
}

impl FromStr for HandAggregation {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(HandAggregation::Any),
            "all" => Ok(HandAggregation::All),
            other => Err(anyhow!(
                "unknown hand aggregation '{}' (expected any|all)",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionConfig {
    pub gesture: GestureConfig,
    pub capture: CaptureConfig,
    pub aggregation: HandAggregation,
}

/// One live capture session: classifier + aggregation + state machine.
pub struct CaptureSession {
    classifier: GestureClassifier,
    aggregation: HandAggregation,
    machine: CaptureStateMachine,
}

impl CaptureSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(config.gesture),
            aggregation: config.aggregation,
            machine: CaptureStateMachine::new(config.capture),
        }
    }

    /// Process one frame's observations at timestamp `at` (duration since
    /// session start; expected non-decreasing).
    pub fn observe(&mut self, hands: &[HandObservation], at: Duration) -> TickOutput {
        let verdicts: Vec<bool> = hands
            .iter()
            .map(|hand| self.classifier.is_peace_sign(hand))
            .collect();
        let verdict = self.aggregation.combine(&verdicts);
        self.machine.step(verdict, at)
    }

    pub fn state(&self) -> CaptureState {
        self.machine.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{open_hand, peace_hand};

    #[test]
    fn aggregation_any_vs_all() {
        assert!(HandAggregation::Any.combine(&[false, true]));
        assert!(!HandAggregation::All.combine(&[false, true]));
        assert!(HandAggregation::All.combine(&[true, true]));
        // Empty frame is false under both policies.
        assert!(!HandAggregation::Any.combine(&[]));
        assert!(!HandAggregation::All.combine(&[]));
    }

    #[test]
    fn aggregation_is_parsed_case_insensitively() {
        assert_eq!("ANY".parse::<HandAggregation>().unwrap(), HandAggregation::Any);
        assert_eq!(" all ".parse::<HandAggregation>().unwrap(), HandAggregation::All);
        assert!("most".parse::<HandAggregation>().is_err());
    }

    #[test]
    fn one_gesturing_hand_among_many_starts_a_hold() {
        let mut session = CaptureSession::new(SessionConfig::default());
        session.observe(&[open_hand(), peace_hand()], Duration::ZERO);
        assert_eq!(
            session.state(),
            CaptureState::Holding {
                since: Duration::ZERO
            }
        );
    }

    #[test]
    fn all_policy_requires_every_hand() {
        let mut session = CaptureSession::new(SessionConfig {
            aggregation: HandAggregation::All,
            ..SessionConfig::default()
        });
        session.observe(&[open_hand(), peace_hand()], Duration::ZERO);
        assert_eq!(session.state(), CaptureState::Idle);
    }
}
