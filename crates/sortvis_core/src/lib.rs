//! sortvis Core
//!
//! The stepwise sorting engine behind the sortvis bar-chart visualizer:
//!
//! - **Traces**: bubble sort and quick sort re-expressed as lazy iterators of
//!   [`StepRecord`]s that mutate the array in place one step at a time
//! - **Playback**: a single-flight background worker that paces a trace and
//!   forwards each step to a [`Renderer`], with pause/resume/stop
//! - **Chart**: pure functions from step records to bar geometry and deltas
//! - **Config**: serde-backed visualizer settings and random data generation
//!
//! # Example
//!
//! ```rust
//! use sortvis_core::trace::trace_bubble_sort;
//!
//! let mut data = vec![5, 3, 1, 4, 2];
//! let len = data.len();
//! let last = trace_bubble_sort(&mut data, 0, len, 0, 0).last().unwrap();
//!
//! assert_eq!(last.snapshot, vec![1, 2, 3, 4, 5]);
//! assert_eq!(last.comparisons, 10);
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod playback;
pub mod trace;

pub use chart::{bar_rect, max_value, visual_deltas, BarDelta, BarHighlight, BarRect};
pub use config::{generate_data, DataConfig, ValueRange, VisualizerConfig};
pub use error::{ConfigError, PlaybackError, Result, TraceError};
pub use playback::{PlaybackConfig, PlaybackController, PlaybackState, Renderer, StopSignal};
pub use trace::{
    trace_bubble_sort, trace_quick_sort, trace_quick_sort_range, AlgorithmKind, BubbleSortTrace,
    Checkpoint, QuickSortTrace, StepRecord, Trace,
};
