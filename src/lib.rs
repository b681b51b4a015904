//! peacecam
//!
//! Gesture-triggered capture pipeline: a landmark source produces per-frame
//! hand observations, a pure classifier decides whether each hand shows a
//! peace sign, and the capture state machine turns the aggregated verdict
//! stream into debounced, cooldown-guarded capture events that a sink
//! persists (original frame + filtered variant + manifest).
//!
//! # Architecture
//!
//! The pipeline is a single-threaded synchronous loop per frame tick:
//!
//! source -> classifier (per hand) -> aggregation -> state machine -> sink
//!
//! The core (classifier + state machine) does no I/O and takes its clock as
//! an argument, so every temporal property is testable without a camera, a
//! display, or real wall-clock time. The state machine keeps exactly one
//! state value; a capture requires an unbroken hold of the gesture, and a
//! cooldown window after each capture ignores verdicts entirely.
//!
//! # Module Structure
//!
//! - `hand`: hand-pose data model (21 fixed-index keypoints)
//! - `gesture`: pure peace-sign classifier
//! - `capture`: hold/cooldown state machine
//! - `session`: per-frame orchestration (classify, aggregate, step)
//! - `source`: landmark sources (scripted `stub://`, JSONL replay)
//! - `sink`: capture sinks (filesystem, in-memory) and pixel filters
//! - `config`: file + environment configuration
//! - `ui`: terminal advisory rendering

use anyhow::{anyhow, Result};

pub mod capture;
pub mod config;
pub mod gesture;
pub mod hand;
pub mod session;
pub mod sink;
pub mod source;
pub mod ui;

pub use capture::{
    CaptureConfig, CaptureEvent, CaptureState, CaptureStateMachine, TickOutput, UiAdvisory,
};
pub use config::{AppConfig, SourceSettings};
pub use gesture::{GestureClassifier, GestureConfig};
pub use hand::{HandObservation, Keypoint, KEYPOINT_COUNT};
pub use session::{CaptureSession, HandAggregation, SessionConfig};
pub use sink::{
    CaptureRecord, CaptureSink, FilesystemSink, FilterKind, MemorySink, SinkConfig, MANIFEST_FILE,
};
pub use source::{
    open_source, JsonlConfig, JsonlSource, LandmarkSource, ScriptedConfig, ScriptedSource,
    SourceFrame, SourceStats,
};
pub use ui::{render_advisory, StatusLine, Ui, UiMode};

/// Packed RGB8 frame, row-major. The authoritative pixels handed to a sink
/// on capture; the core never inspects them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePixels {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FramePixels {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(anyhow!(
                "frame byte length {} does not match {}x{} RGB8 (expected {})",
                data.len(),
                width,
                height,
                expected
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Uniform frame of one gray value.
    pub fn solid(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize * 3],
        }
    }
}
