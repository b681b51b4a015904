use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::capture::UiAdvisory;

/// Render the per-tick advisory as user-facing text.
pub fn render_advisory(advisory: Option<UiAdvisory>) -> Option<String> {
    match advisory? {
        UiAdvisory::Countdown(remaining) => Some(format!(
            "taking selfie in {:.1}s",
            remaining.as_secs_f64()
        )),
        UiAdvisory::CooldownActive => Some("cooldown...".to_string()),
    }
}

#[derive(Clone, Copy, Debug)]
pub enum UiMode {
    Auto,
    Plain,
    Pretty,
}

#[derive(Clone, Debug)]
pub struct Ui {
    mode: UiMode,
    is_tty: bool,
}

impl Ui {
    pub fn new(mode: UiMode, is_tty: bool) -> Self {
        Self { mode, is_tty }
    }

    pub fn from_args(ui_flag: Option<&str>, is_tty: bool) -> Self {
        let mode = match ui_flag {
            Some("plain") => UiMode::Plain,
            Some("pretty") => UiMode::Pretty,
            _ => UiMode::Auto,
        };
        Self::new(mode, is_tty)
    }

    /// A single updating status line: a spinner on a TTY, change-triggered
    /// stderr lines otherwise.
    pub fn status_line(&self) -> StatusLine {
        let use_pretty = match self.mode {
            UiMode::Pretty => true,
            UiMode::Auto => self.is_tty,
            UiMode::Plain => false,
        };

        if use_pretty {
            let spinner = ProgressBar::new_spinner();
            spinner.set_draw_target(ProgressDrawTarget::stderr());
            spinner.enable_steady_tick(Duration::from_millis(120));
            let style = ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            StatusLine {
                spinner: Some(spinner),
                last: None,
            }
        } else {
            StatusLine {
                spinner: None,
                last: None,
            }
        }
    }
}

pub struct StatusLine {
    spinner: Option<ProgressBar>,
    last: Option<String>,
}

impl StatusLine {
    pub fn set(&mut self, message: &str) {
        if self.last.as_deref() == Some(message) {
            return;
        }
        self.last = Some(message.to_string());
        match &self.spinner {
            Some(spinner) => spinner.set_message(message.to_string()),
            None => eprintln!("{message}"),
        }
    }

    /// Clear the line when there is nothing to advise.
    pub fn idle(&mut self) {
        if self.last.is_none() {
            return;
        }
        self.last = None;
        if let Some(spinner) = &self.spinner {
            spinner.set_message(String::new());
        }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}
