//! Cancellation signal shared between the controller and its worker.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// One-shot stop flag.
///
/// The worker polls it between steps and sleeps on it for the pacing delay,
/// so raising it wakes a waiting worker immediately.
#[derive(Debug, Default)]
pub struct StopSignal {
    raised: Mutex<bool>,
    condvar: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal and wake any waiter.
    pub fn raise(&self) {
        let mut raised = self.raised.lock();
        *raised = true;
        self.condvar.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        *self.raised.lock()
    }

    /// Sleep for `timeout` unless the signal is raised first.
    ///
    /// Returns true if the signal was raised.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut raised = self.raised.lock();
        while !*raised {
            match deadline {
                Some(deadline) => {
                    if self.condvar.wait_until(&mut raised, deadline).timed_out() {
                        break;
                    }
                }
                None => self.condvar.wait(&mut raised),
            }
        }
        *raised
    }
}
