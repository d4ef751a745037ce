// src/progress.rs

//! Progress reporting for a batch of tasks.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Receives progress updates while a batch runs, one step per task.
///
/// # Examples
///
/// ```
/// use digest_runner::progress::ProgressReporter;
/// use std::sync::Mutex;
///
/// struct LastMessage(Mutex<String>);
///
/// impl ProgressReporter for LastMessage {
///     fn set_length(&self, _len: u64) {}
///     fn set_position(&self, _pos: u64) {}
///     fn set_message(&self, msg: String) {
///         *self.0.lock().unwrap() = msg;
///     }
///     fn finish_with_message(&self, msg: String) {
///         *self.0.lock().unwrap() = msg;
///     }
/// }
///
/// let reporter = LastMessage(Mutex::new(String::new()));
/// reporter.set_message("Ingesting /srv/app".to_string());
/// assert_eq!(*reporter.0.lock().unwrap(), "Ingesting /srv/app");
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Sets the number of tasks in the batch.
    fn set_length(&self, len: u64);
    /// Sets the number of tasks finished so far.
    fn set_position(&self, pos: u64);
    /// Describes the task currently running.
    fn set_message(&self, msg: String);
    /// Finishes reporting with a final message.
    fn finish_with_message(&self, msg: String);
}

/// A `ProgressReporter` that does nothing.
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn set_length(&self, _len: u64) {}
    fn set_position(&self, _pos: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish_with_message(&self, _msg: String) {}
}

/// A `ProgressReporter` drawing an `indicatif` bar on stderr.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn set_length(&self, len: u64) {
        self.bar.set_length(len);
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish_with_message(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}
