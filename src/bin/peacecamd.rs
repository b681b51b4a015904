//! peacecamd - gesture-triggered capture daemon
//!
//! This daemon:
//! 1. Loads configuration (JSON file + environment overrides)
//! 2. Opens the configured landmark source (stub:// or JSONL replay)
//! 3. Classifies hands and steps the capture state machine once per frame
//! 4. Writes captures (original + filtered variant + manifest) to disk
//! 5. Renders countdown/cooldown advisories as a terminal status line
//!
//! Terminates on Ctrl-C, source end-of-stream, or source failure.

use std::io::IsTerminal;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;

use peacecam::{
    open_source, render_advisory, AppConfig, CaptureConfig, CaptureSession, CaptureSink,
    FilesystemSink, GestureConfig, LandmarkSource, SessionConfig, SinkConfig, Ui,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = AppConfig::load()?;

    let mut source = open_source(&cfg.source)?;
    source.connect()?;

    let mut session = CaptureSession::new(SessionConfig {
        gesture: GestureConfig {
            separation_ratio: cfg.separation_ratio,
            ..GestureConfig::default()
        },
        capture: CaptureConfig {
            hold: cfg.hold,
            cooldown: cfg.cooldown,
        },
        aggregation: cfg.aggregation,
    });

    let mut sink = FilesystemSink::new(SinkConfig {
        out_dir: cfg.out_dir.clone(),
        filter: cfg.filter,
        feedback_bell: true,
    })?;

    let ui = Ui::from_args(None, std::io::stderr().is_terminal());
    let mut status = ui.status_line();

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .expect("error setting Ctrl-C handler");

    let frame_interval = Duration::from_millis(1000 / u64::from(cfg.source.target_fps));
    let mut last_health_log = Instant::now();
    let mut capture_count = 0u64;

    log::info!(
        "peacecamd running. source={} out={}",
        cfg.source.url,
        cfg.out_dir.display()
    );
    log::info!(
        "hold={:.1}s cooldown={:.1}s filter={} aggregation={:?}",
        cfg.hold.as_secs_f64(),
        cfg.cooldown.as_secs_f64(),
        cfg.filter,
        cfg.aggregation
    );

    loop {
        if rx.try_recv().is_ok() {
            log::info!("shutdown signal received");
            break;
        }

        let Some(frame) = source.next_frame()? else {
            log::info!("source end of stream");
            break;
        };

        let output = session.observe(&frame.hands, frame.at);

        if let Some(event) = output.event {
            // A failed write is logged and the loop continues: the state
            // machine has already advanced and stays consistent.
            match sink.capture(&event, &frame.pixels) {
                Ok(record) => {
                    capture_count += 1;
                    log::info!(
                        "capture #{}: {} at t={:.1}s",
                        capture_count,
                        record.original,
                        record.at_secs
                    );
                }
                Err(e) => log::error!("capture write failed: {}", e),
            }
        }

        match render_advisory(output.advisory) {
            Some(message) => status.set(&message),
            None => status.idle(),
        }

        if last_health_log.elapsed() >= Duration::from_secs(5) {
            let stats = source.stats();
            log::debug!(
                "source health={} frames={} url={}",
                source.is_healthy(),
                stats.frames_produced,
                stats.url
            );
            last_health_log = Instant::now();
        }

        std::thread::sleep(frame_interval);
    }

    status.finish();
    log::info!("peacecamd stopped. captures written: {}", capture_count);
    Ok(())
}
