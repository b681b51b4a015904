//! Capture sinks.
//!
//! A sink receives a capture event plus the frame's pixels and owns
//! everything downstream of the decision: persistence, the filtered
//! variant, the manifest, and the user feedback signal. Sink failures
//! surface as errors to the host loop; the state machine has already
//! advanced and stays consistent regardless.

mod filesystem;
mod filter;

pub use filesystem::{FilesystemSink, SinkConfig, MANIFEST_FILE};
pub use filter::{apply_filter, FilterKind};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::capture::CaptureEvent;
use crate::FramePixels;

/// Record of one completed capture, as appended to the manifest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Seconds since session start at the triggering tick.
    pub at_secs: f64,
    /// Filename of the unmodified frame.
    pub original: String,
    /// Filename of the filtered variant; absent when the filter is `none`.
    pub filtered: Option<String>,
    pub filter: FilterKind,
}

pub trait CaptureSink {
    /// Persist one capture. The pixels are the authoritative frame for the
    /// event's timestamp.
    fn capture(&mut self, event: &CaptureEvent, pixels: &FramePixels) -> Result<CaptureRecord>;
}

/// In-memory sink for tests and dry runs.
#[derive(Default)]
pub struct MemorySink {
    records: Vec<CaptureRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[CaptureRecord] {
        &self.records
    }
}

impl CaptureSink for MemorySink {
    fn capture(&mut self, event: &CaptureEvent, _pixels: &FramePixels) -> Result<CaptureRecord> {
        let record = CaptureRecord {
            at_secs: event.at.as_secs_f64(),
            original: format!("memory:{}", self.records.len()),
            filtered: None,
            filter: FilterKind::None,
        };
        self.records.push(record.clone());
        Ok(record)
    }
}
