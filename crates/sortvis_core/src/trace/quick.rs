//! Quick sort trace.
//!
//! The recursive Lomuto quick sort is flattened onto an explicit work stack so
//! each `next()` runs exactly one scan position of the active partition. Ranges
//! are pushed right-then-left, giving depth-first order: a partition's own
//! steps, then its whole left range, then its whole right range.

use smallvec::SmallVec;

use super::StepRecord;

/// Trace quick sort over the whole of `data`.
pub fn trace_quick_sort<T: PartialOrd + Clone>(data: &mut [T]) -> QuickSortTrace<'_, T> {
    match data.len() {
        0 => QuickSortTrace::empty(data),
        len => trace_quick_sort_range(data, 0, len - 1, 0, 0),
    }
}

/// Trace quick sort over the inclusive range `data[low..=high]`.
///
/// A `high` outside the array yields an empty trace.
pub fn trace_quick_sort_range<T: PartialOrd + Clone>(
    data: &mut [T],
    low: usize,
    high: usize,
    comparisons: u64,
    swaps: u64,
) -> QuickSortTrace<'_, T> {
    let mut trace = QuickSortTrace::empty(data);
    trace.comparisons = comparisons;
    trace.swaps = swaps;
    if high < trace.data.len() {
        trace.stack.push(Frame::Range { low, high });
    }
    trace
}

#[derive(Clone, Copy, Debug)]
enum Frame {
    /// Range not yet partitioned.
    Range { low: usize, high: usize },
    /// Lomuto scan in progress over `low..high` with pivot at `high`.
    Partition {
        low: usize,
        high: usize,
        /// Next slot for an element smaller than the pivot.
        store: usize,
        /// Next index to compare against the pivot.
        scan: usize,
    },
}

/// Lazy Lomuto quick sort.
///
/// Emits one record per swap during a partition scan, then one for the
/// pivot-placing swap. Comparisons that do not swap are counted but not
/// emitted.
pub struct QuickSortTrace<'a, T> {
    data: &'a mut [T],
    stack: SmallVec<[Frame; 16]>,
    comparisons: u64,
    swaps: u64,
}

impl<'a, T: PartialOrd + Clone> QuickSortTrace<'a, T> {
    fn empty(data: &'a mut [T]) -> Self {
        Self {
            data,
            stack: SmallVec::new(),
            comparisons: 0,
            swaps: 0,
        }
    }

    fn record(&self, touched: (usize, usize), high: usize) -> StepRecord<T> {
        StepRecord {
            snapshot: self.data.to_vec(),
            touched,
            outer_index: high,
            comparisons: self.comparisons,
            swaps: self.swaps,
        }
    }
}

impl<T: PartialOrd + Clone> Iterator for QuickSortTrace<'_, T> {
    type Item = StepRecord<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match *frame {
                Frame::Range { low, high } if low >= high => {
                    self.stack.pop();
                }
                Frame::Range { low, high } => {
                    *frame = Frame::Partition {
                        low,
                        high,
                        store: low,
                        scan: low,
                    };
                }
                Frame::Partition {
                    low,
                    high,
                    store,
                    scan,
                } if scan < high => {
                    let smaller = self.data[scan] < self.data[high];
                    *frame = Frame::Partition {
                        low,
                        high,
                        store: if smaller { store + 1 } else { store },
                        scan: scan + 1,
                    };
                    self.comparisons += 1;
                    if smaller {
                        self.data.swap(store, scan);
                        self.swaps += 1;
                        return Some(self.record((store, scan), high));
                    }
                }
                Frame::Partition {
                    low, high, store, ..
                } => {
                    self.stack.pop();
                    self.data.swap(store, high);
                    self.swaps += 1;

                    self.stack.push(Frame::Range {
                        low: store + 1,
                        high,
                    });
                    if store > low {
                        self.stack.push(Frame::Range {
                            low,
                            high: store - 1,
                        });
                    }
                    return Some(self.record((store, high), high));
                }
            }
        }
    }
}
