//! Background trace consumption.
//!
//! ```text
//! Controller             Worker thread          Renderer
//!     |                        |                    |
//! [start/resume] --array--> [produce trace]         |
//!     |                    [check stop]             |
//!     |                    [pull one step]          |
//!     |                    [forward] ----------> [on_step]
//!     |                    [wait delay / stop]      |
//! [pause/stop] --signal--> [exit]                   |
//! [join] <--array + checkpoint--+                   |
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::{Renderer, StopSignal};
use crate::chart::max_value;
use crate::trace::{AlgorithmKind, Checkpoint};

/// How a worker run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Completed,
    Interrupted,
    Failed(String),
}

/// Handed back to the controller when the worker is joined.
pub(crate) struct WorkerReport {
    /// The array-under-sort, with every consumed step applied.
    pub data: Vec<u32>,
    /// Checkpoint after the last forwarded step, if any step was forwarded.
    pub last: Option<Checkpoint>,
    /// Steps forwarded during this run.
    pub steps: u64,
    pub outcome: Outcome,
}

/// Parameters for one worker run.
pub(crate) struct WorkerJob {
    pub data: Vec<u32>,
    pub kind: AlgorithmKind,
    pub checkpoint: Option<Checkpoint>,
    pub delay: Duration,
    pub stop: Arc<StopSignal>,
    pub renderer: Arc<dyn Renderer>,
}

impl WorkerJob {
    /// Spawn the worker thread.
    pub fn spawn(self) -> std::io::Result<JoinHandle<WorkerReport>> {
        thread::Builder::new()
            .name("sortvis-playback".into())
            .spawn(move || self.run())
    }

    /// Consume the trace until it ends or the stop signal is raised.
    pub fn run(self) -> WorkerReport {
        let WorkerJob {
            mut data,
            kind,
            checkpoint,
            delay,
            stop,
            renderer,
        } = self;
        let max = max_value(&data);
        let mut last = None;
        let mut steps = 0;

        let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Outcome, String> {
            let mut trace = kind
                .produce_trace(&mut data, checkpoint.as_ref())
                .map_err(|e| e.to_string())?;
            loop {
                if stop.is_raised() {
                    return Ok(Outcome::Interrupted);
                }
                let Some(step) = trace.next() else {
                    break;
                };
                renderer.on_step(&step, max);
                last = Some(step.checkpoint());
                steps += 1;
                if stop.wait_timeout(delay) {
                    return Ok(Outcome::Interrupted);
                }
            }
            renderer.on_complete();
            Ok(Outcome::Completed)
        }));

        let outcome = match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(message)) => Outcome::Failed(message),
            Err(payload) => Outcome::Failed(panic_message(payload.as_ref())),
        };
        tracing::debug!("Playback worker exited after {} steps: {:?}", steps, outcome);

        WorkerReport {
            data,
            last,
            steps,
            outcome,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::StepRecord;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collect {
        steps: Mutex<Vec<StepRecord<u32>>>,
        completions: Mutex<u32>,
    }

    impl Renderer for Collect {
        fn on_initial_state(&self, _data: &[u32], _max_value: u32) {}

        fn on_step(&self, step: &StepRecord<u32>, _max_value: u32) {
            self.steps.lock().push(step.clone());
        }

        fn on_complete(&self) {
            *self.completions.lock() += 1;
        }
    }

    struct Exploding;

    impl Renderer for Exploding {
        fn on_initial_state(&self, _data: &[u32], _max_value: u32) {}

        fn on_step(&self, step: &StepRecord<u32>, _max_value: u32) {
            if step.comparisons == 2 {
                panic!("renderer exploded");
            }
        }

        fn on_complete(&self) {}
    }

    fn job(data: Vec<u32>, kind: AlgorithmKind, renderer: Arc<dyn Renderer>) -> WorkerJob {
        WorkerJob {
            data,
            kind,
            checkpoint: None,
            delay: Duration::ZERO,
            stop: Arc::new(StopSignal::new()),
            renderer,
        }
    }

    #[test]
    fn test_run_to_completion() {
        let renderer = Arc::new(Collect::default());
        let report = job(vec![3, 2, 1], AlgorithmKind::BubbleSort, renderer.clone()).run();

        assert_eq!(report.outcome, Outcome::Completed);
        assert_eq!(report.data, vec![1, 2, 3]);
        assert_eq!(report.steps, 3);
        assert_eq!(renderer.steps.lock().len(), 3);
        assert_eq!(*renderer.completions.lock(), 1);
    }

    #[test]
    fn test_pre_raised_signal_pulls_nothing() {
        let renderer = Arc::new(Collect::default());
        let job = job(vec![3, 2, 1], AlgorithmKind::QuickSort, renderer.clone());
        job.stop.raise();
        let report = job.run();

        assert_eq!(report.outcome, Outcome::Interrupted);
        assert_eq!(report.data, vec![3, 2, 1]);
        assert!(report.last.is_none());
        assert_eq!(*renderer.completions.lock(), 0);
    }

    #[test]
    fn test_renderer_panic_is_contained() {
        let report = job(vec![3, 2, 1], AlgorithmKind::BubbleSort, Arc::new(Exploding)).run();

        assert_eq!(report.outcome, Outcome::Failed("renderer exploded".into()));
        // second step was applied before the renderer saw it
        assert_eq!(report.data, vec![2, 1, 3]);
        assert_eq!(report.steps, 1);
    }

    #[test]
    fn test_bad_checkpoint_fails_session() {
        let mut job = job(vec![2, 1], AlgorithmKind::BubbleSort, Arc::new(Collect::default()));
        job.checkpoint = Some(Checkpoint {
            outer_index: 9,
            ..Checkpoint::default()
        });
        let report = job.run();

        assert!(matches!(report.outcome, Outcome::Failed(_)));
        assert_eq!(report.data, vec![2, 1]);
    }
}
