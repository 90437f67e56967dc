//! Lazy sorting traces.
//!
//! This module provides:
//! - `BubbleSortTrace` - Two-index bubble sort, resumable at any step
//! - `QuickSortTrace` - Lomuto quick sort flattened onto an explicit work stack
//! - `AlgorithmKind` - Single dispatch point from algorithm to trace
//!
//! A trace borrows the array mutably and applies exactly one algorithm step
//! per `next()`. Dropping a trace early leaves the array with the mutations of
//! the steps consumed so far and nothing more.
//!
//! # Example
//!
//! ```rust
//! use sortvis_core::trace::AlgorithmKind;
//!
//! let mut data = vec![3, 1, 2];
//! let steps: Vec<_> = AlgorithmKind::QuickSort
//!     .produce_trace(&mut data, None)
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(steps.last().unwrap().snapshot, vec![1, 2, 3]);
//! assert_eq!(data, vec![1, 2, 3]);
//! ```

mod bubble;
mod quick;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TraceError};

pub use bubble::{trace_bubble_sort, BubbleSortTrace};
pub use quick::{trace_quick_sort, trace_quick_sort_range, QuickSortTrace};

/// Snapshot emitted once per algorithm step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord<T> {
    /// Copy of the array right after this step.
    pub snapshot: Vec<T>,
    /// Pair of indices compared or swapped by this step.
    pub touched: (usize, usize),
    /// Outer-loop index (bubble sort) or partition right boundary (quick sort).
    pub outer_index: usize,
    /// Comparisons since the trace began.
    pub comparisons: u64,
    /// Swaps since the trace began.
    pub swaps: u64,
}

impl<T> StepRecord<T> {
    /// Checkpoint that continues the trace right after this step.
    ///
    /// Only meaningful for bubble sort records.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            outer_index: self.outer_index,
            inner_index: self.touched.0 + 1,
            comparisons: self.comparisons,
            swaps: self.swaps,
        }
    }
}

/// Saved position inside a bubble sort trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub outer_index: usize,
    /// Next inner index to compare at `outer_index`.
    pub inner_index: usize,
    pub comparisons: u64,
    pub swaps: u64,
}

/// Supported sorting algorithms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    #[default]
    BubbleSort,
    QuickSort,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 2] = [AlgorithmKind::BubbleSort, AlgorithmKind::QuickSort];

    /// UI label for the algorithm.
    pub fn label(self) -> &'static str {
        match self {
            AlgorithmKind::BubbleSort => "Bubble Sort",
            AlgorithmKind::QuickSort => "Quick Sort",
        }
    }

    /// Whether a paused trace can continue from a checkpoint.
    pub fn supports_resume(self) -> bool {
        matches!(self, AlgorithmKind::BubbleSort)
    }

    /// Produce a trace over `data`, optionally continuing from `checkpoint`.
    pub fn produce_trace<'a, T: PartialOrd + Clone>(
        self,
        data: &'a mut [T],
        checkpoint: Option<&Checkpoint>,
    ) -> Result<Trace<'a, T>, TraceError> {
        match (self, checkpoint) {
            (AlgorithmKind::BubbleSort, None) => {
                let len = data.len();
                Ok(Trace::Bubble(trace_bubble_sort(data, 0, len, 0, 0)))
            }
            (AlgorithmKind::BubbleSort, Some(checkpoint)) => {
                if checkpoint.outer_index > data.len() {
                    return Err(TraceError::InvalidCheckpoint {
                        outer_index: checkpoint.outer_index,
                        len: data.len(),
                    });
                }
                Ok(Trace::Bubble(BubbleSortTrace::resume(data, checkpoint)))
            }
            (AlgorithmKind::QuickSort, None) => Ok(Trace::Quick(trace_quick_sort(data))),
            (AlgorithmKind::QuickSort, Some(_)) => Err(TraceError::UnsupportedResume(self)),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "bubble" | "bubblesort" => Ok(AlgorithmKind::BubbleSort),
            "quick" | "quicksort" => Ok(AlgorithmKind::QuickSort),
            _ => Err(ConfigError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// A trace of either algorithm.
pub enum Trace<'a, T> {
    Bubble(BubbleSortTrace<'a, T>),
    Quick(QuickSortTrace<'a, T>),
}

impl<T: PartialOrd + Clone> Iterator for Trace<'_, T> {
    type Item = StepRecord<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Trace::Bubble(trace) => trace.next(),
            Trace::Quick(trace) => trace.next(),
        }
    }
}
