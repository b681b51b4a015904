//! Landmark sources.
//!
//! A source produces, per frame tick, zero or more hand observations plus
//! the frame's pixels and a monotonic timestamp:
//! - Scripted synthetic source (`stub://` URLs, deterministic, for tests
//!   and the demo binary)
//! - JSONL replay of tracker output (local files only)
//!
//! Sources are responsible for:
//! - Stable keypoint ordering (anatomical indices fixed across calls)
//! - Non-decreasing timestamps within one stream
//! - Dropping malformed records instead of surfacing them
//!
//! Landmark extraction itself (running a pose model on camera frames) is an
//! external capability; this crate only consumes its output.

mod jsonl;
mod scripted;

pub use jsonl::{JsonlConfig, JsonlSource};
pub use scripted::{
    open_hand, open_hand_points, peace_hand, peace_hand_points, ScriptedConfig, ScriptedSource,
};

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::config::SourceSettings;
use crate::hand::HandObservation;
use crate::FramePixels;

/// One frame's worth of observations.
pub struct SourceFrame {
    /// Time since source start; non-decreasing within a stream.
    pub at: Duration,
    pub hands: Vec<HandObservation>,
    /// The authoritative pixels for this tick, handed to the sink on
    /// capture. The core never inspects them.
    pub pixels: FramePixels,
}

/// Source statistics for health logging.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames_produced: u64,
    pub url: String,
}

pub trait LandmarkSource {
    fn connect(&mut self) -> Result<()>;

    /// Next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<SourceFrame>>;

    fn is_healthy(&self) -> bool;

    fn stats(&self) -> SourceStats;
}

/// Open a source by URL: `stub://<name>` is the scripted synthetic source,
/// anything else is a local JSONL file path (no other URL schemes).
pub fn open_source(settings: &SourceSettings) -> Result<Box<dyn LandmarkSource>> {
    if let Some(name) = settings.url.strip_prefix("stub://") {
        return Ok(Box::new(ScriptedSource::new(ScriptedConfig {
            name: name.to_string(),
            target_fps: settings.target_fps,
            width: settings.width,
            height: settings.height,
            total_frames: None,
        })));
    }
    if settings.url.contains("://") {
        return Err(anyhow!(
            "landmark ingestion only supports stub:// or local JSONL paths, got {}",
            settings.url
        ));
    }
    Ok(Box::new(JsonlSource::new(JsonlConfig {
        path: settings.url.clone(),
        width: settings.width,
        height: settings.height,
    })))
}
