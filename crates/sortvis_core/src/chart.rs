//! Bar chart geometry and per-step visual deltas.
//!
//! Renderers stay free of algorithm knowledge: they draw the initial bars with
//! [`bar_rect`] and then apply the [`BarDelta`]s derived from each step.

use smallvec::SmallVec;

use crate::trace::{AlgorithmKind, StepRecord};

/// Screen-space rectangle of one bar, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BarRect {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

/// Rectangle for bar `index` of `len` bars on a `width` x `height` canvas.
///
/// Bars are scaled so that `max_value` fills the full canvas height.
pub fn bar_rect(
    index: usize,
    value: u32,
    len: usize,
    width: f32,
    height: f32,
    max_value: u32,
) -> BarRect {
    let bar_width = if len == 0 { 0.0 } else { width / len as f32 };
    let ratio = if max_value == 0 {
        0.0
    } else {
        value as f32 / max_value as f32
    };
    BarRect {
        x1: index as f32 * bar_width,
        y1: height - ratio * height,
        x2: (index + 1) as f32 * bar_width,
        y2: height,
    }
}

/// Largest value in `data`, or 0 when empty.
pub fn max_value(data: &[u32]) -> u32 {
    data.iter().copied().max().unwrap_or(0)
}

/// How a bar should be styled after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarHighlight {
    /// Compared or swapped by this step.
    Touched,
    /// In its final sorted position.
    Finalized,
}

/// Change to a single bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarDelta {
    pub index: usize,
    pub value: u32,
    pub highlight: BarHighlight,
}

/// Deltas produced by `step`.
///
/// Touched bars are always reported. For bubble sort the bar that settles at
/// the end of each outer pass is reported as finalized on that pass's last
/// comparison.
///
/// Finalized positions are derived from `step.snapshot.len()`, so `step` must
/// come from a trace over the whole array. Records from a partial range
/// (`trace_bubble_sort` with `end_bound < len`) mark the wrong bars.
pub fn visual_deltas(kind: AlgorithmKind, step: &StepRecord<u32>) -> SmallVec<[BarDelta; 4]> {
    let mut deltas: SmallVec<[BarDelta; 4]> = SmallVec::new();
    let (a, b) = step.touched;
    let len = step.snapshot.len();

    for index in [a, b] {
        if index < len && !deltas.iter().any(|d| d.index == index) {
            deltas.push(BarDelta {
                index,
                value: step.snapshot[index],
                highlight: BarHighlight::Touched,
            });
        }
    }

    if kind == AlgorithmKind::BubbleSort && len >= step.outer_index + 2 {
        let settled = len - step.outer_index - 1;
        if b == settled {
            deltas.retain(|d| d.index != settled);
            deltas.push(BarDelta {
                index: settled,
                value: step.snapshot[settled],
                highlight: BarHighlight::Finalized,
            });
            // the final pass also settles bar 0
            if settled == 1 {
                deltas.retain(|d| d.index != 0);
                deltas.push(BarDelta {
                    index: 0,
                    value: step.snapshot[0],
                    highlight: BarHighlight::Finalized,
                });
            }
        }
    }

    deltas
}
