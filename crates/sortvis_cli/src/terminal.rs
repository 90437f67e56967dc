//! Terminal bar chart renderer.
//!
//! Draws one row of block characters per step. Touched bars are shown in red
//! and bars in their final position in green.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sortvis_core::{visual_deltas, AlgorithmKind, BarHighlight, Renderer, StepRecord};

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Renders steps as colored block rows
pub struct TerminalRenderer<W: Write + Send> {
    out: Mutex<W>,
    kind: AlgorithmKind,
    color: bool,
    /// Bars known to be in their final position.
    finalized: Mutex<Vec<bool>>,
    steps: AtomicU64,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, kind: AlgorithmKind, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            kind,
            color,
            finalized: Mutex::new(Vec::new()),
            steps: AtomicU64::new(0),
        }
    }

    /// Steps rendered so far
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Acquire)
    }

    /// Consume the renderer and return the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn row(&self, data: &[u32], max_value: u32, highlights: &[Option<BarHighlight>]) -> String {
        let mut row = String::with_capacity(data.len() * 8);
        for (index, &value) in data.iter().enumerate() {
            let level = if max_value == 0 {
                0
            } else {
                ((value as u64 * (LEVELS.len() as u64 - 1)) / max_value as u64) as usize
            };
            let bar = LEVELS[level.min(LEVELS.len() - 1)];
            let color = match highlights.get(index).copied().flatten() {
                Some(BarHighlight::Touched) if self.color => Some(RED),
                Some(BarHighlight::Finalized) if self.color => Some(GREEN),
                _ => None,
            };
            match color {
                Some(color) => {
                    row.push_str(color);
                    row.push(bar);
                    row.push_str(RESET);
                }
                None => row.push(bar),
            }
        }
        row
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn on_initial_state(&self, data: &[u32], max_value: u32) {
        *self.finalized.lock() = vec![false; data.len()];
        let row = self.row(data, max_value, &[]);
        self.write_line(&format!("{}  {} bars", row, data.len()));
    }

    fn on_step(&self, step: &StepRecord<u32>, max_value: u32) {
        let mut finalized = self.finalized.lock();
        finalized.resize(step.snapshot.len(), false);

        let mut highlights: Vec<Option<BarHighlight>> = finalized
            .iter()
            .map(|&done| done.then_some(BarHighlight::Finalized))
            .collect();
        for delta in visual_deltas(self.kind, step) {
            if delta.highlight == BarHighlight::Finalized {
                finalized[delta.index] = true;
            }
            highlights[delta.index] = Some(delta.highlight);
        }
        drop(finalized);

        let row = self.row(&step.snapshot, max_value, &highlights);
        self.write_line(&format!(
            "{}  cmp={} swp={}",
            row, step.comparisons, step.swaps
        ));
        self.steps.fetch_add(1, Ordering::AcqRel);
    }

    fn on_complete(&self) {
        self.write_line(&format!("{} finished after {} steps", self.kind, self.steps()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortvis_core::trace_bubble_sort;

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_initial_state_row() {
        let renderer = TerminalRenderer::new(Vec::new(), AlgorithmKind::BubbleSort, false);
        renderer.on_initial_state(&[0, 7, 14], 14);
        assert_eq!(output(renderer), "▁▄█  3 bars\n");
    }

    #[test]
    fn test_step_rows_count_steps() {
        let renderer = TerminalRenderer::new(Vec::new(), AlgorithmKind::BubbleSort, false);
        let mut data = vec![3, 2, 1];
        renderer.on_initial_state(&data, 3);
        for step in trace_bubble_sort(&mut data, 0, 3, 0, 0) {
            renderer.on_step(&step, 3);
        }
        renderer.on_complete();

        assert_eq!(renderer.steps(), 3);
        let text = output(renderer);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].ends_with("cmp=3 swp=3"));
        assert_eq!(lines[4], "Bubble Sort finished after 3 steps");
    }

    #[test]
    fn test_colors_touched_and_finalized_bars() {
        let renderer = TerminalRenderer::new(Vec::new(), AlgorithmKind::BubbleSort, true);
        let step = StepRecord {
            snapshot: vec![1, 2],
            touched: (0, 1),
            outer_index: 0,
            comparisons: 1,
            swaps: 1,
        };
        renderer.on_initial_state(&[2, 1], 2);
        renderer.on_step(&step, 2);

        let text = output(renderer);
        assert!(text.contains(GREEN));
        assert!(!text.contains(RED));
    }
}
