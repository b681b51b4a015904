use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::session::HandAggregation;
use crate::sink::FilterKind;

const DEFAULT_SOURCE_URL: &str = "stub://demo";
const DEFAULT_TARGET_FPS: u32 = 10;
const DEFAULT_FRAME_WIDTH: u32 = 640;
const DEFAULT_FRAME_HEIGHT: u32 = 480;
const DEFAULT_HOLD_SECS: f64 = 2.0;
const DEFAULT_COOLDOWN_SECS: f64 = 2.0;
const DEFAULT_SEPARATION_RATIO: f32 = 0.18;
const DEFAULT_OUT_DIR: &str = "captures";
const DEFAULT_FILTER: FilterKind = FilterKind::Sepia;

#[derive(Debug, Deserialize, Default)]
struct AppConfigFile {
    source: Option<SourceConfigFile>,
    capture: Option<CaptureConfigFile>,
    gesture: Option<GestureConfigFile>,
    output: Option<OutputConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    url: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct CaptureConfigFile {
    hold_secs: Option<f64>,
    cooldown_secs: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct GestureConfigFile {
    separation_ratio: Option<f32>,
    aggregation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct OutputConfigFile {
    dir: Option<String>,
    filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SourceSettings,
    pub hold: Duration,
    pub cooldown: Duration,
    pub separation_ratio: f32,
    pub aggregation: HandAggregation,
    pub out_dir: PathBuf,
    pub filter: FilterKind,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
}

impl AppConfig {
    /// Load from the optional JSON file named by `PEACECAM_CONFIG`, apply
    /// environment overrides, validate.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("PEACECAM_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: AppConfigFile) -> Result<Self> {
        let source = SourceSettings {
            url: file
                .source
                .as_ref()
                .and_then(|source| source.url.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            target_fps: file
                .source
                .as_ref()
                .and_then(|source| source.target_fps)
                .unwrap_or(DEFAULT_TARGET_FPS),
            width: file
                .source
                .as_ref()
                .and_then(|source| source.width)
                .unwrap_or(DEFAULT_FRAME_WIDTH),
            height: file
                .source
                .as_ref()
                .and_then(|source| source.height)
                .unwrap_or(DEFAULT_FRAME_HEIGHT),
        };
        let hold = duration_from_secs(
            "capture.hold_secs",
            file.capture
                .as_ref()
                .and_then(|capture| capture.hold_secs)
                .unwrap_or(DEFAULT_HOLD_SECS),
        )?;
        let cooldown = duration_from_secs(
            "capture.cooldown_secs",
            file.capture
                .as_ref()
                .and_then(|capture| capture.cooldown_secs)
                .unwrap_or(DEFAULT_COOLDOWN_SECS),
        )?;
        let separation_ratio = file
            .gesture
            .as_ref()
            .and_then(|gesture| gesture.separation_ratio)
            .unwrap_or(DEFAULT_SEPARATION_RATIO);
        let aggregation = match file.gesture.as_ref().and_then(|g| g.aggregation.as_deref()) {
            Some(value) => value.parse()?,
            None => HandAggregation::default(),
        };
        let out_dir = file
            .output
            .as_ref()
            .and_then(|output| output.dir.clone())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
        let filter = match file.output.as_ref().and_then(|o| o.filter.as_deref()) {
            Some(value) => value.parse()?,
            None => DEFAULT_FILTER,
        };
        Ok(Self {
            source,
            hold,
            cooldown,
            separation_ratio,
            aggregation,
            out_dir,
            filter,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("PEACECAM_SOURCE_URL") {
            if !url.trim().is_empty() {
                self.source.url = url;
            }
        }
        if let Ok(secs) = std::env::var("PEACECAM_HOLD_SECS") {
            let secs: f64 = secs
                .parse()
                .map_err(|_| anyhow!("PEACECAM_HOLD_SECS must be a number of seconds"))?;
            self.hold = duration_from_secs("PEACECAM_HOLD_SECS", secs)?;
        }
        if let Ok(secs) = std::env::var("PEACECAM_COOLDOWN_SECS") {
            let secs: f64 = secs
                .parse()
                .map_err(|_| anyhow!("PEACECAM_COOLDOWN_SECS must be a number of seconds"))?;
            self.cooldown = duration_from_secs("PEACECAM_COOLDOWN_SECS", secs)?;
        }
        if let Ok(ratio) = std::env::var("PEACECAM_SEPARATION_RATIO") {
            self.separation_ratio = ratio
                .parse()
                .map_err(|_| anyhow!("PEACECAM_SEPARATION_RATIO must be a number"))?;
        }
        if let Ok(aggregation) = std::env::var("PEACECAM_AGGREGATION") {
            if !aggregation.trim().is_empty() {
                self.aggregation = aggregation.parse()?;
            }
        }
        if let Ok(dir) = std::env::var("PEACECAM_OUT_DIR") {
            if !dir.trim().is_empty() {
                self.out_dir = PathBuf::from(dir);
            }
        }
        if let Ok(filter) = std::env::var("PEACECAM_FILTER") {
            if !filter.trim().is_empty() {
                self.filter = filter.parse()?;
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.source.target_fps == 0 {
            return Err(anyhow!("source.target_fps must be >= 1"));
        }
        if self.source.width == 0 || self.source.height == 0 {
            return Err(anyhow!("source dimensions must be >= 1"));
        }
        if self.hold.is_zero() {
            return Err(anyhow!("capture.hold_secs must be greater than zero"));
        }
        if !self.separation_ratio.is_finite() || self.separation_ratio <= 0.0 {
            return Err(anyhow!("gesture.separation_ratio must be positive"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<AppConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn duration_from_secs(name: &str, secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(anyhow!("{} must be a non-negative number of seconds", name));
    }
    Ok(Duration::from_secs_f64(secs))
}
