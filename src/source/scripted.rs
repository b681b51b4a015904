//! Scripted synthetic landmark source.
//!
//! Deterministic stand-in for a live tracker: one hand per frame, showing a
//! canonical peace sign during a fixed window of every cycle and an open
//! palm otherwise, over synthetic gradient pixels. Two sources with the
//! same config produce identical streams, which is what the tests and the
//! demo binary rely on.

use std::time::Duration;

use anyhow::Result;

use super::{LandmarkSource, SourceFrame, SourceStats};
use crate::hand::{self, HandObservation, Keypoint, KEYPOINT_COUNT};
use crate::FramePixels;

/// Gesture script: a peace sign is shown during [GESTURE_FROM, GESTURE_UNTIL)
/// of every GESTURE_CYCLE, an open palm outside it. With the default 2 s
/// hold and 2 s cooldown this yields exactly one capture per cycle.
const GESTURE_CYCLE: Duration = Duration::from_secs(6);
const GESTURE_FROM: Duration = Duration::from_secs(1);
const GESTURE_UNTIL: Duration = Duration::from_secs(4);

#[derive(Clone, Debug)]
pub struct ScriptedConfig {
    /// Stream name (the part after `stub://`), echoed in stats and logs.
    pub name: String,
    /// Frames per second the timestamps advance by.
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
    /// Stop after this many frames; `None` streams forever.
    pub total_frames: Option<u64>,
}

impl Default for ScriptedConfig {
    fn default() -> Self {
        Self {
            name: "demo".to_string(),
            target_fps: 10,
            width: 640,
            height: 480,
            total_frames: None,
        }
    }
}

pub struct ScriptedSource {
    config: ScriptedConfig,
    frame_count: u64,
}

impl ScriptedSource {
    pub fn new(config: ScriptedConfig) -> Self {
        Self {
            config,
            frame_count: 0,
        }
    }

    fn generate_synthetic_pixels(&self) -> FramePixels {
        let pixel_count = (self.config.width * self.config.height * 3) as usize;
        let mut data = vec![0u8; pixel_count];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = ((i as u64 + self.frame_count) % 256) as u8;
        }
        FramePixels {
            width: self.config.width,
            height: self.config.height,
            data,
        }
    }

    fn gesture_shown_at(at: Duration) -> bool {
        let cycle_nanos = GESTURE_CYCLE.as_nanos();
        let phase = Duration::from_nanos((at.as_nanos() % cycle_nanos) as u64);
        phase >= GESTURE_FROM && phase < GESTURE_UNTIL
    }
}

impl LandmarkSource for ScriptedSource {
    fn connect(&mut self) -> Result<()> {
        log::info!(
            "ScriptedSource: connected to stub://{} ({} fps)",
            self.config.name,
            self.config.target_fps
        );
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<SourceFrame>> {
        if let Some(limit) = self.config.total_frames {
            if self.frame_count >= limit {
                return Ok(None);
            }
        }

        let at = Duration::from_secs_f64(
            self.frame_count as f64 / self.config.target_fps.max(1) as f64,
        );
        let pixels = self.generate_synthetic_pixels();
        self.frame_count += 1;

        let hand = if Self::gesture_shown_at(at) {
            peace_hand()
        } else {
            open_hand()
        };

        Ok(Some(SourceFrame {
            at,
            hands: vec![hand],
            pixels,
        }))
    }

    fn is_healthy(&self) -> bool {
        true
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_produced: self.frame_count,
            url: format!("stub://{}", self.config.name),
        }
    }
}

// ----------------------------------------------------------------------------
// Canonical synthetic observations
// ----------------------------------------------------------------------------

/// Keypoints of a canonical right hand showing a peace sign: index and
/// middle extended and spread, ring and pinky curled, wrist-to-middle-MCP
/// span 0.2 in x.
pub fn peace_hand_points() -> [Keypoint; KEYPOINT_COUNT] {
    let mut points = base_hand_points();
    points[hand::INDEX_TIP] = Keypoint::new(0.44, 0.35);
    points[hand::MIDDLE_TIP] = Keypoint::new(0.54, 0.35);
    points[hand::RING_TIP] = Keypoint::new(0.60, 0.75);
    points[hand::PINKY_TIP] = Keypoint::new(0.68, 0.78);
    points
}

/// Keypoints of an open palm: all four non-thumb fingers extended, so the
/// ring/pinky conditions fail the peace-sign test.
pub fn open_hand_points() -> [Keypoint; KEYPOINT_COUNT] {
    let mut points = base_hand_points();
    points[hand::INDEX_TIP] = Keypoint::new(0.44, 0.35);
    points[hand::MIDDLE_TIP] = Keypoint::new(0.54, 0.35);
    points[hand::RING_TIP] = Keypoint::new(0.60, 0.38);
    points[hand::PINKY_TIP] = Keypoint::new(0.68, 0.42);
    points
}

pub fn peace_hand() -> HandObservation {
    HandObservation::from_array(peace_hand_points())
}

pub fn open_hand() -> HandObservation {
    HandObservation::from_array(open_hand_points())
}

/// Shared palm/joint geometry; finger tips are set by the callers.
fn base_hand_points() -> [Keypoint; KEYPOINT_COUNT] {
    let mut points = [Keypoint::default(); KEYPOINT_COUNT];

    // Wrist and thumb column.
    points[hand::WRIST] = Keypoint::new(0.30, 0.90);
    points[1] = Keypoint::new(0.36, 0.85);
    points[2] = Keypoint::new(0.40, 0.80);
    points[3] = Keypoint::new(0.42, 0.76);
    points[hand::THUMB_TIP] = Keypoint::new(0.44, 0.72);

    // Index finger.
    points[5] = Keypoint::new(0.42, 0.70);
    points[hand::INDEX_PIP] = Keypoint::new(0.43, 0.55);
    points[7] = Keypoint::new(0.44, 0.45);

    // Middle finger.
    points[hand::MIDDLE_MCP] = Keypoint::new(0.50, 0.70);
    points[hand::MIDDLE_PIP] = Keypoint::new(0.52, 0.55);
    points[11] = Keypoint::new(0.53, 0.45);

    // Ring finger.
    points[13] = Keypoint::new(0.58, 0.72);
    points[hand::RING_PIP] = Keypoint::new(0.60, 0.60);
    points[15] = Keypoint::new(0.60, 0.68);

    // Pinky.
    points[17] = Keypoint::new(0.66, 0.74);
    points[hand::PINKY_PIP] = Keypoint::new(0.68, 0.64);
    points[19] = Keypoint::new(0.68, 0.70);

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_configs_produce_identical_streams() {
        let config = ScriptedConfig {
            width: 32,
            height: 24,
            total_frames: Some(30),
            ..ScriptedConfig::default()
        };
        let mut a = ScriptedSource::new(config.clone());
        let mut b = ScriptedSource::new(config);

        loop {
            let (fa, fb) = (a.next_frame().unwrap(), b.next_frame().unwrap());
            match (fa, fb) {
                (None, None) => break,
                (Some(fa), Some(fb)) => {
                    assert_eq!(fa.at, fb.at);
                    assert_eq!(fa.hands, fb.hands);
                    assert_eq!(fa.pixels.data, fb.pixels.data);
                }
                _ => panic!("streams ended at different lengths"),
            }
        }
    }

    #[test]
    fn gesture_window_follows_the_cycle() {
        assert!(!ScriptedSource::gesture_shown_at(Duration::from_millis(500)));
        assert!(ScriptedSource::gesture_shown_at(Duration::from_millis(1000)));
        assert!(ScriptedSource::gesture_shown_at(Duration::from_millis(3900)));
        assert!(!ScriptedSource::gesture_shown_at(Duration::from_millis(4000)));
        // Second cycle repeats the pattern.
        assert!(ScriptedSource::gesture_shown_at(Duration::from_millis(7500)));
    }

    #[test]
    fn frame_limit_ends_the_stream() {
        let mut source = ScriptedSource::new(ScriptedConfig {
            width: 8,
            height: 8,
            total_frames: Some(2),
            ..ScriptedConfig::default()
        });
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.stats().frames_produced, 2);
    }
}
