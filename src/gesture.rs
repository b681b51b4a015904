//! Peace-sign classification.
//!
//! A pure geometric test over one hand observation: index and middle
//! fingers extended and separated, ring and pinky retracted. No state, no
//! I/O, total over its input — malformed geometry classifies as `false`
//! rather than surfacing an error.

use crate::hand::{self, HandObservation};

/// Classifier thresholds, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    /// Minimum index/middle tip separation as a fraction of the hand-scale
    /// reference (wrist to middle MCP). Rejects a closed fist or fingers
    /// held together, independent of hand distance from the camera.
    pub separation_ratio: f32,
    /// Additive epsilon on the hand-scale reference.
    pub scale_epsilon: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            separation_ratio: 0.18,
            scale_epsilon: 1e-6,
        }
    }
}

/// Stateless peace-sign classifier.
pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Verdict for one hand in one frame.
    pub fn is_peace_sign(&self, hand: &HandObservation) -> bool {
        self.classify(hand).unwrap_or(false)
    }

    fn classify(&self, hand: &HandObservation) -> Option<bool> {
        let index_up = finger_up(hand, hand::INDEX_TIP, hand::INDEX_PIP)?;
        let middle_up = finger_up(hand, hand::MIDDLE_TIP, hand::MIDDLE_PIP)?;
        let ring_up = finger_up(hand, hand::RING_TIP, hand::RING_PIP)?;
        let pinky_up = finger_up(hand, hand::PINKY_TIP, hand::PINKY_PIP)?;

        if !index_up || !middle_up || ring_up || pinky_up {
            return Some(false);
        }

        let separation =
            (hand.keypoint(hand::INDEX_TIP)?.x - hand.keypoint(hand::MIDDLE_TIP)?.x).abs();
        let hand_scale = (hand.keypoint(hand::WRIST)?.x - hand.keypoint(hand::MIDDLE_MCP)?.x).abs()
            + self.config.scale_epsilon;

        Some(separation > self.config.separation_ratio * hand_scale)
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

/// Tip strictly above its PIP joint (image y grows downward).
fn finger_up(hand: &HandObservation, tip: usize, pip: usize) -> Option<bool> {
    Some(hand.keypoint(tip)?.y < hand.keypoint(pip)?.y)
}
