//! Paced playback of sorting traces.
//!
//! This module provides:
//! - `PlaybackController` - Session lifecycle (start/pause/resume/stop) around
//!   a single background worker
//! - `StopSignal` - Cancellation flag that also interrupts the pacing delay
//! - `Renderer` - The collaborator that receives initial bars, steps and completion
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sortvis_core::playback::{PlaybackConfig, PlaybackController, PlaybackState, Renderer};
//! use sortvis_core::trace::{AlgorithmKind, StepRecord};
//!
//! struct Quiet;
//!
//! impl Renderer for Quiet {
//!     fn on_initial_state(&self, _data: &[u32], _max_value: u32) {}
//!     fn on_step(&self, _step: &StepRecord<u32>, _max_value: u32) {}
//!     fn on_complete(&self) {}
//! }
//!
//! let config = PlaybackConfig::default().with_base_delay(Duration::from_millis(1));
//! let mut controller = PlaybackController::new(vec![3, 1, 2], Arc::new(Quiet), config);
//!
//! controller.start(AlgorithmKind::BubbleSort, 10.0).unwrap();
//! assert_eq!(controller.wait().unwrap(), PlaybackState::Completed);
//! assert_eq!(controller.data(), Some(&[1, 2, 3][..]));
//! ```

mod controller;
mod signal;
mod worker;

use std::time::Duration;

use crate::config::VisualizerConfig;
use crate::trace::StepRecord;

pub use controller::PlaybackController;
pub use signal::StopSignal;

/// Receives the visible output of a playback session.
///
/// Steps arrive on the worker thread, in trace order.
pub trait Renderer: Send + Sync {
    /// Bars to draw before any step, also sent after reset/randomize.
    fn on_initial_state(&self, data: &[u32], max_value: u32);

    /// One applied algorithm step.
    fn on_step(&self, step: &StepRecord<u32>, max_value: u32);

    /// The trace ran to the end without interruption.
    fn on_complete(&self);
}

/// Current state of a playback session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started, stopped or reset.
    Idle,
    /// Worker is consuming the trace.
    Running,
    /// Interrupted with a resume point.
    Paused,
    /// Trace exhausted.
    Completed,
}

/// Configuration for the playback controller.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Delay between steps at speed 1.0.
    pub base_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(100),
        }
    }
}

impl PlaybackConfig {
    /// Set the delay between steps at speed 1.0.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }
}

impl From<&VisualizerConfig> for PlaybackConfig {
    fn from(config: &VisualizerConfig) -> Self {
        Self {
            base_delay: config.base_delay(),
        }
    }
}
