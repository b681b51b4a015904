//! Hand-pose data model.
//!
//! A `HandObservation` is one tracked hand in one frame: exactly
//! [`KEYPOINT_COUNT`] keypoints in normalized image coordinates, with fixed
//! anatomical indices (the layout every supported landmark tracker emits).
//! Observations are immutable and scoped to a single frame's processing.
//!
//! Index identity is positional and stable across frames and sources:
//! sources MUST NOT reorder keypoints.

use anyhow::{anyhow, Result};

/// Number of keypoints in a complete hand observation.
pub const KEYPOINT_COUNT: usize = 21;

// Anatomical landmark indices. Only the subset the classifier reads is
// named; the remaining indices are carried opaquely.
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// One landmark in normalized image coordinates.
///
/// `x`/`y` are in `[0, 1]` with the origin at the top-left corner, `y`
/// increasing downward. `z` is an optional depth estimate carried for
/// interop; nothing in this crate reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// A complete hand observation: exactly [`KEYPOINT_COUNT`] keypoints.
///
/// The keypoint vector is private; a constructed value always holds a full
/// set, and accessors stay total anyway so callers downstream of an
/// untrusted source never have a panic path.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    keypoints: Vec<Keypoint>,
}

impl HandObservation {
    /// Build an observation from a tracker's keypoint list.
    ///
    /// Rejects incomplete hands; sources drop those records instead of
    /// passing partial geometry to the classifier.
    pub fn from_keypoints(keypoints: Vec<Keypoint>) -> Result<Self> {
        if keypoints.len() != KEYPOINT_COUNT {
            return Err(anyhow!(
                "hand observation requires {} keypoints, got {}",
                KEYPOINT_COUNT,
                keypoints.len()
            ));
        }
        Ok(Self { keypoints })
    }

    /// Infallible constructor from a fixed-size array.
    pub fn from_array(keypoints: [Keypoint; KEYPOINT_COUNT]) -> Self {
        Self {
            keypoints: keypoints.to_vec(),
        }
    }

    /// Keypoint by anatomical index; `None` when out of range.
    pub fn keypoint(&self, index: usize) -> Option<Keypoint> {
        self.keypoints.get(index).copied()
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_incomplete_keypoint_sets() {
        assert!(HandObservation::from_keypoints(vec![]).is_err());
        assert!(HandObservation::from_keypoints(vec![Keypoint::new(0.5, 0.5); 20]).is_err());
        assert!(HandObservation::from_keypoints(vec![Keypoint::new(0.5, 0.5); 22]).is_err());
    }

    #[test]
    fn accepts_complete_hand_and_indexes_it() {
        let mut points = vec![Keypoint::new(0.5, 0.5); KEYPOINT_COUNT];
        points[WRIST] = Keypoint::new(0.3, 0.9);
        let hand = HandObservation::from_keypoints(points).unwrap();

        assert_eq!(hand.keypoint(WRIST), Some(Keypoint::new(0.3, 0.9)));
        assert_eq!(hand.keypoint(KEYPOINT_COUNT), None);
    }
}
