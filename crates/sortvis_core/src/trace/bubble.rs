//! Bubble sort trace.

use super::{Checkpoint, StepRecord};

/// Trace bubble sort over `data[..end_bound]` starting at outer pass `start_outer`.
///
/// Malformed bounds produce an empty trace.
pub fn trace_bubble_sort<T: PartialOrd + Clone>(
    data: &mut [T],
    start_outer: usize,
    end_bound: usize,
    comparisons: u64,
    swaps: u64,
) -> BubbleSortTrace<'_, T> {
    BubbleSortTrace::new(data, start_outer, 0, end_bound, comparisons, swaps)
}

/// Lazy two-index bubble sort.
///
/// Emits one record per inner iteration, whether or not it swapped.
pub struct BubbleSortTrace<'a, T> {
    data: &'a mut [T],
    outer: usize,
    inner: usize,
    end: usize,
    comparisons: u64,
    swaps: u64,
}

impl<'a, T: PartialOrd + Clone> BubbleSortTrace<'a, T> {
    fn new(
        data: &'a mut [T],
        start_outer: usize,
        start_inner: usize,
        end_bound: usize,
        comparisons: u64,
        swaps: u64,
    ) -> Self {
        let valid = start_outer <= end_bound && end_bound <= data.len();
        Self {
            data,
            outer: if valid { start_outer } else { end_bound },
            inner: start_inner,
            end: if valid { end_bound } else { 0 },
            comparisons,
            swaps,
        }
    }

    /// Continue a trace at the step after the one `checkpoint` was taken from.
    pub fn resume(data: &'a mut [T], checkpoint: &Checkpoint) -> Self {
        let end = data.len();
        Self::new(
            data,
            checkpoint.outer_index,
            checkpoint.inner_index,
            end,
            checkpoint.comparisons,
            checkpoint.swaps,
        )
    }

    /// Position the next step will run at.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            outer_index: self.outer,
            inner_index: self.inner,
            comparisons: self.comparisons,
            swaps: self.swaps,
        }
    }
}

impl<T: PartialOrd + Clone> Iterator for BubbleSortTrace<'_, T> {
    type Item = StepRecord<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.outer < self.end {
            let limit = self.end - self.outer - 1;
            if self.inner >= limit {
                self.outer += 1;
                self.inner = 0;
                continue;
            }

            let j = self.inner;
            self.inner += 1;
            self.comparisons += 1;
            if self.data[j] > self.data[j + 1] {
                self.data.swap(j, j + 1);
                self.swaps += 1;
            }

            return Some(StepRecord {
                snapshot: self.data.to_vec(),
                touched: (j, j + 1),
                outer_index: self.outer,
                comparisons: self.comparisons,
                swaps: self.swaps,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(data: &mut [i32]) -> Vec<StepRecord<i32>> {
        let len = data.len();
        trace_bubble_sort(data, 0, len, 0, 0).collect()
    }

    #[test]
    fn test_sorts_five_elements() {
        let mut data = vec![5, 3, 1, 4, 2];
        let steps = run(&mut data);

        let last = steps.last().unwrap();
        assert_eq!(last.snapshot, vec![1, 2, 3, 4, 5]);
        assert_eq!(last.comparisons, 10);
        // One swap per inversion
        assert_eq!(last.swaps, 7);
        assert_eq!(steps.len(), 10);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_emits_every_inner_iteration() {
        let mut data = vec![1, 2, 3, 4];
        let steps = run(&mut data);

        let positions: Vec<_> = steps.iter().map(|s| (s.outer_index, s.touched)).collect();
        assert_eq!(
            positions,
            vec![
                (0, (0, 1)),
                (0, (1, 2)),
                (0, (2, 3)),
                (1, (0, 1)),
                (1, (1, 2)),
                (2, (0, 1)),
            ]
        );
    }

    #[test]
    fn test_sorted_input_accrues_comparisons_only() {
        let mut data = vec![1, 2, 3, 4, 5, 6];
        let steps = run(&mut data);

        assert_eq!(steps.len(), 15);
        for (n, step) in steps.iter().enumerate() {
            assert_eq!(step.swaps, 0);
            assert_eq!(step.comparisons, n as u64 + 1);
            assert_eq!(step.snapshot, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_trivial_inputs_emit_nothing() {
        assert!(run(&mut []).is_empty());
        assert!(run(&mut [7]).is_empty());
    }

    #[test]
    fn test_equal_elements_never_swap() {
        let mut data = vec![2, 2, 2];
        let steps = run(&mut data);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.last().unwrap().swaps, 0);
    }

    #[test]
    fn test_malformed_bounds_yield_empty_trace() {
        let mut data = vec![3, 2, 1];
        assert_eq!(trace_bubble_sort(&mut data, 2, 1, 0, 0).count(), 0);
        assert_eq!(trace_bubble_sort(&mut data, 0, 4, 0, 0).count(), 0);
        assert_eq!(data, vec![3, 2, 1]);
    }

    #[test]
    fn test_partial_range_and_seeded_counters() {
        let mut data = vec![4, 3, 2, 1, 0];
        let steps: Vec<_> = trace_bubble_sort(&mut data, 1, 3, 10, 4).collect();

        // end_bound 3: outer 1 scans j in 0..1, outer 2 scans nothing
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].touched, (0, 1));
        assert_eq!(steps[0].outer_index, 1);
        assert_eq!(steps[0].comparisons, 11);
        assert_eq!(steps[0].swaps, 5);
        assert_eq!(data, vec![3, 4, 2, 1, 0]);
    }

    #[test]
    fn test_dropping_trace_keeps_only_consumed_steps() {
        let mut data = vec![5, 4, 3, 2, 1];
        let len = data.len();
        let third = trace_bubble_sort(&mut data, 0, len, 0, 0).nth(2).unwrap();

        assert_eq!(third.snapshot, vec![4, 3, 2, 5, 1]);
        assert_eq!(data, vec![4, 3, 2, 5, 1]);
    }

    #[test]
    fn test_resume_from_record_checkpoint() {
        let original = vec![9, 4, 7, 1, 8, 2, 6];
        let mut uninterrupted = original.clone();
        let full = run(&mut uninterrupted);

        for cut in 0..full.len() {
            let mut data = original.clone();
            let len = data.len();
            let record = trace_bubble_sort(&mut data, 0, len, 0, 0).nth(cut).unwrap();
            let rest: Vec<_> = BubbleSortTrace::resume(&mut data, &record.checkpoint()).collect();

            assert_eq!(rest.len(), full.len() - cut - 1);
            assert_eq!(data, uninterrupted);
            if let Some(last) = rest.last() {
                assert_eq!(last.comparisons, full.last().unwrap().comparisons);
                assert_eq!(last.swaps, full.last().unwrap().swaps);
            }
        }
    }

    #[test]
    fn test_resume_at_outer_pass_start() {
        let mut data = vec![3, 1, 2, 5, 4];
        let len = data.len();
        let mut trace = trace_bubble_sort(&mut data, 0, len, 0, 0);
        for _ in 0..4 {
            trace.next();
        }
        let checkpoint = trace.checkpoint();
        drop(trace);

        let approx: Vec<_> = trace_bubble_sort(
            &mut data,
            checkpoint.outer_index,
            len,
            checkpoint.comparisons,
            checkpoint.swaps,
        )
        .collect();
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
        assert!(approx.windows(2).all(|w| w[0].comparisons < w[1].comparisons));
    }
}
