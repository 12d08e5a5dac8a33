//! Busy indicator shown while pages are being fetched
//!
//! The indicator is handed down the traversal by reference. Every method
//! takes `&self` and is idempotent, so a recursive call can pause and resume
//! it without tracking how many callers above it did the same.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Something that can show the user work is in progress.
pub trait BusyIndicator: Send + Sync {
    fn play(&self);
    fn pause(&self);
    /// Stop for good. Calling it again does nothing.
    fn stop(&self);
}

/// Indicator that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndicator;

impl BusyIndicator for NoopIndicator {
    fn play(&self) {}
    fn pause(&self) {}
    fn stop(&self) {}
}

const PAUSED: u8 = 0;
const PLAYING: u8 = 1;
const STOPPED: u8 = 2;

/// Terminal spinner drawn on stderr.
pub struct Spinner {
    bar: ProgressBar,
    state: AtomicU8,
}

impl Spinner {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self {
            bar,
            state: AtomicU8::new(PAUSED),
        }
    }

    /// Set the message shown next to the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.bar.set_message(msg.into());
    }

    fn transition(&self, from: u8, to: u8) -> bool {
        self.state
            .compare_exchange(from, to, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyIndicator for Spinner {
    fn play(&self) {
        if self.transition(PAUSED, PLAYING) {
            self.bar.set_draw_target(ProgressDrawTarget::stderr());
            self.bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    fn pause(&self) {
        if self.transition(PLAYING, PAUSED) {
            self.bar.disable_steady_tick();
            // Wipe the spinner line so a prompt starts on a clean row.
            self.bar.finish_and_clear();
            self.bar.reset();
            self.bar.set_draw_target(ProgressDrawTarget::hidden());
        }
    }

    fn stop(&self) {
        if self.state.swap(STOPPED, Ordering::SeqCst) != STOPPED {
            self.bar.disable_steady_tick();
            self.bar.finish_and_clear();
        }
    }
}
