//! Filesystem capture sink.
//!
//! On each capture event this sink:
//! - encodes the frame as JPEG under a sortable timestamp-derived name,
//! - writes a filtered variant under `filtered_` + the same name,
//! - appends a [`CaptureRecord`] line to `captures.jsonl`,
//! - rings the terminal bell as the user feedback signal.
//!
//! File handles are opened per capture and closed immediately, so abrupt
//! termination loses at most the in-flight capture.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use image::{ImageFormat, RgbImage};

use super::{apply_filter, CaptureRecord, CaptureSink, FilterKind};
use crate::capture::CaptureEvent;
use crate::FramePixels;

pub const MANIFEST_FILE: &str = "captures.jsonl";

#[derive(Clone, Debug)]
pub struct SinkConfig {
    pub out_dir: PathBuf,
    pub filter: FilterKind,
    /// Ring the terminal bell on capture.
    pub feedback_bell: bool,
}

pub struct FilesystemSink {
    config: SinkConfig,
}

impl FilesystemSink {
    pub fn new(config: SinkConfig) -> Result<Self> {
        fs::create_dir_all(&config.out_dir).with_context(|| {
            format!(
                "failed to create capture directory {}",
                config.out_dir.display()
            )
        })?;
        Ok(Self { config })
    }

    fn append_manifest(&self, record: &CaptureRecord) -> Result<()> {
        let path = self.config.out_dir.join(MANIFEST_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open manifest {}", path.display()))?;
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        file.write_all(line.as_bytes())
            .with_context(|| format!("failed to append to manifest {}", path.display()))?;
        Ok(())
    }

    fn feedback(&self) {
        if self.config.feedback_bell {
            eprint!("\x07");
            let _ = std::io::stderr().flush();
        }
    }
}

impl CaptureSink for FilesystemSink {
    fn capture(&mut self, event: &CaptureEvent, pixels: &FramePixels) -> Result<CaptureRecord> {
        let img = rgb_image(pixels)?;
        let name = unique_name(&self.config.out_dir);

        let original_path = self.config.out_dir.join(&name);
        img.save_with_format(&original_path, ImageFormat::Jpeg)
            .with_context(|| format!("failed to write {}", original_path.display()))?;

        let filtered = if self.config.filter == FilterKind::None {
            None
        } else {
            let filtered_name = format!("filtered_{name}");
            let filtered_path = self.config.out_dir.join(&filtered_name);
            apply_filter(&img, self.config.filter)
                .save_with_format(&filtered_path, ImageFormat::Jpeg)
                .with_context(|| format!("failed to write {}", filtered_path.display()))?;
            Some(filtered_name)
        };

        let record = CaptureRecord {
            at_secs: event.at.as_secs_f64(),
            original: name,
            filtered,
            filter: self.config.filter,
        };
        self.append_manifest(&record)?;
        self.feedback();
        log::info!(
            "captured {} (filter={})",
            record.original,
            self.config.filter
        );
        Ok(record)
    }
}

fn rgb_image(pixels: &FramePixels) -> Result<RgbImage> {
    RgbImage::from_raw(pixels.width, pixels.height, pixels.data.clone()).ok_or_else(|| {
        anyhow!(
            "frame byte length {} does not match {}x{} RGB8",
            pixels.data.len(),
            pixels.width,
            pixels.height
        )
    })
}

/// Sortable wall-clock name, `selfie_YYYYMMDD_HHMMSS_mmm.jpg`, with a
/// numeric suffix when two captures land in the same millisecond.
fn unique_name(dir: &Path) -> String {
    let stamp = Local::now().format("selfie_%Y%m%d_%H%M%S_%3f").to_string();
    let mut name = format!("{stamp}.jpg");
    let mut n = 1u32;
    while dir.join(&name).exists() {
        name = format!("{stamp}_{n}.jpg");
        n += 1;
    }
    name
}
