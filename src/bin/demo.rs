//! demo - end-to-end synthetic run of the capture pipeline
//!
//! Runs the scripted landmark source against the real session and
//! filesystem sink: the scripted hand holds a peace sign long enough to
//! trigger at least one capture, and the resulting files land in the
//! output directory.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use peacecam::{
    render_advisory, CaptureSession, CaptureSink, FilesystemSink, FilterKind, LandmarkSource,
    ScriptedConfig, ScriptedSource, SessionConfig, SinkConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Duration in seconds of the synthetic feed.
    #[arg(long, default_value_t = 6)]
    seconds: u64,
    /// Frames per second for the synthetic source.
    #[arg(long, default_value_t = 10)]
    fps: u32,
    /// Output directory for captures.
    #[arg(long, default_value = "demo_out")]
    out: String,
    /// Filter applied to the captured frame.
    #[arg(long, default_value = "sepia")]
    filter: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.fps == 0 {
        return Err(anyhow!("fps must be >= 1"));
    }
    let filter: FilterKind = args.filter.parse()?;
    let out_dir = PathBuf::from(&args.out);

    stage("open scripted source");
    let mut source = ScriptedSource::new(ScriptedConfig {
        name: "demo".to_string(),
        target_fps: args.fps,
        width: 320,
        height: 240,
        total_frames: Some(args.seconds.saturating_mul(u64::from(args.fps))),
    });
    source.connect()?;

    let mut session = CaptureSession::new(SessionConfig::default());
    let mut sink = FilesystemSink::new(SinkConfig {
        out_dir: out_dir.clone(),
        filter,
        feedback_bell: false,
    })?;

    stage("run capture pipeline");
    let mut frames = 0u64;
    let mut captures = Vec::new();
    let mut last_advisory = None;
    while let Some(frame) = source.next_frame()? {
        frames += 1;
        let output = session.observe(&frame.hands, frame.at);
        if let Some(event) = output.event {
            captures.push(sink.capture(&event, &frame.pixels)?);
        }
        if let Some(message) = render_advisory(output.advisory) {
            if last_advisory.as_deref() != Some(message.as_str()) {
                eprintln!("demo:   {message}");
                last_advisory = Some(message);
            }
        } else {
            last_advisory = None;
        }
    }

    println!("demo summary:");
    println!("  frames processed: {}", frames);
    println!("  captures: {}", captures.len());
    for record in &captures {
        println!(
            "  t={:.1}s {} -> {}",
            record.at_secs,
            record.original,
            record.filtered.as_deref().unwrap_or("-")
        );
    }
    println!("  out dir: {}", out_dir.display());
    println!("next steps:");
    println!("  ls -la {}", out_dir.display());
    println!("  cat {}/captures.jsonl", out_dir.display());

    if captures.is_empty() {
        return Err(anyhow!(
            "expected at least one capture from the scripted hold (run >= 4 seconds)"
        ));
    }
    Ok(())
}

fn stage(msg: &str) {
    eprintln!("demo: {}", msg);
}
