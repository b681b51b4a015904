//! JSONL landmark replay source.
//!
//! Replays tracker output from a local JSON-lines file, one record per
//! frame:
//!
//! ```text
//! {"t": 1.5, "hands": [[[0.30, 0.90, 0.0], ... 21 triples ...]]}
//! ```
//!
//! `t` is seconds since the start of the recording. Malformed lines and
//! records with incomplete hands are dropped with a warning rather than
//! faulting the stream. The replay has no pixel track; frames carry a
//! neutral gray image so the capture sink still has something to persist.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use super::{LandmarkSource, SourceFrame, SourceStats};
use crate::hand::{HandObservation, Keypoint};
use crate::FramePixels;

const REPLAY_GRAY: u8 = 0x80;

#[derive(Clone, Debug)]
pub struct JsonlConfig {
    /// Local file path (no URL schemes).
    pub path: String,
    /// Dimensions of the synthesized replay frames.
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
struct LandmarkRecord {
    t: f64,
    #[serde(default)]
    hands: Vec<Vec<[f32; 3]>>,
}

pub struct JsonlSource {
    config: JsonlConfig,
    reader: Option<BufReader<File>>,
    line_no: u64,
    frames_produced: u64,
    records_dropped: u64,
}

impl JsonlSource {
    pub fn new(config: JsonlConfig) -> Self {
        Self {
            config,
            reader: None,
            line_no: 0,
            frames_produced: 0,
            records_dropped: 0,
        }
    }

    /// Lines skipped so far because they failed to parse.
    pub fn records_dropped(&self) -> u64 {
        self.records_dropped
    }

    fn decode(&self, line: &str) -> Result<SourceFrame> {
        let record: LandmarkRecord =
            serde_json::from_str(line).map_err(|e| anyhow!("invalid landmark record: {}", e))?;
        if !record.t.is_finite() || record.t < 0.0 {
            return Err(anyhow!("invalid timestamp {}", record.t));
        }

        let mut hands = Vec::with_capacity(record.hands.len());
        for points in record.hands {
            let keypoints = points
                .into_iter()
                .map(|[x, y, z]| Keypoint { x, y, z })
                .collect();
            hands.push(HandObservation::from_keypoints(keypoints)?);
        }

        Ok(SourceFrame {
            at: Duration::from_secs_f64(record.t),
            hands,
            pixels: FramePixels::solid(self.config.width, self.config.height, REPLAY_GRAY),
        })
    }
}

impl LandmarkSource for JsonlSource {
    fn connect(&mut self) -> Result<()> {
        let file = File::open(&self.config.path)
            .with_context(|| format!("failed to open landmark file {}", self.config.path))?;
        self.reader = Some(BufReader::new(file));
        log::info!("JsonlSource: connected to {}", self.config.path);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<SourceFrame>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| anyhow!("JsonlSource: next_frame before connect"))?;

        loop {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match self.decode(trimmed) {
                Ok(frame) => {
                    self.frames_produced += 1;
                    return Ok(Some(frame));
                }
                Err(e) => {
                    self.records_dropped += 1;
                    log::warn!(
                        "{}:{}: dropping record: {}",
                        self.config.path,
                        self.line_no,
                        e
                    );
                }
            }
        }
    }

    fn is_healthy(&self) -> bool {
        self.reader.is_some()
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_produced: self.frames_produced,
            url: self.config.path.clone(),
        }
    }
}
