//! Playback controller for paced sorting sessions.
//!
//! The controller owns the array-under-sort. While a session is running the
//! array is moved into the single background worker and handed back when the
//! worker is joined, so nothing else can touch it mid-trace.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use rand::Rng;

use super::worker::{Outcome, WorkerJob, WorkerReport};
use super::{PlaybackConfig, PlaybackState, Renderer, StopSignal};
use crate::chart::max_value;
use crate::config::{generate_data, validate_speed, DataConfig};
use crate::error::{ConfigError, PlaybackError, Result};
use crate::trace::{AlgorithmKind, Checkpoint};

/// The one active worker.
struct Session {
    stop: Arc<StopSignal>,
    handle: JoinHandle<WorkerReport>,
}

/// Drives a trace on a background worker and forwards steps to a renderer.
pub struct PlaybackController {
    /// Array-under-sort; empty while a worker holds it.
    data: Vec<u32>,
    renderer: Arc<dyn Renderer>,
    config: PlaybackConfig,
    state: PlaybackState,
    /// Algorithm of the current or last session.
    algorithm: AlgorithmKind,
    speed: f64,
    /// Resume point captured on pause.
    checkpoint: Option<Checkpoint>,
    session: Option<Session>,
    /// Failure of the last worker, if it ended in error.
    last_error: Option<PlaybackError>,
}

impl PlaybackController {
    /// Create an idle controller over `data`.
    pub fn new(data: Vec<u32>, renderer: Arc<dyn Renderer>, config: PlaybackConfig) -> Self {
        Self {
            data,
            renderer,
            config,
            state: PlaybackState::Idle,
            algorithm: AlgorithmKind::default(),
            speed: 1.0,
            checkpoint: None,
            session: None,
            last_error: None,
        }
    }

    /// Get the current state, collecting a worker that has already finished.
    pub fn state(&mut self) -> PlaybackState {
        self.reap();
        self.state
    }

    /// The array-under-sort, or `None` while a worker is running.
    pub fn data(&self) -> Option<&[u32]> {
        match self.session {
            Some(_) => None,
            None => Some(&self.data),
        }
    }

    /// Algorithm of the current or last session.
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Resume point captured by the last pause.
    pub fn checkpoint(&self) -> Option<Checkpoint> {
        self.checkpoint
    }

    /// Take the error left by a failed worker.
    pub fn take_error(&mut self) -> Option<PlaybackError> {
        self.reap();
        self.last_error.take()
    }

    /// Whether data/algorithm controls may be used.
    pub fn controls_enabled(&mut self) -> bool {
        self.state() != PlaybackState::Running
    }

    /// Change the speed used by the next `resume`.
    ///
    /// A running worker keeps its pace until it is paused.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        validate_speed(speed)?;
        self.speed = speed;
        Ok(())
    }

    /// Delay between steps at `speed`.
    pub fn step_delay(&self, speed: f64) -> Result<Duration> {
        validate_speed(speed)?;
        Duration::try_from_secs_f64(self.config.base_delay.as_secs_f64() / speed)
            .map_err(|_| ConfigError::InvalidSpeed(speed).into())
    }

    /// Start a new trace from the beginning.
    ///
    /// Valid from `Idle` and `Completed`. An empty array is refused the same
    /// way `reset` refuses one.
    pub fn start(&mut self, kind: AlgorithmKind, speed: f64) -> Result<()> {
        self.reap();
        if matches!(self.state, PlaybackState::Running | PlaybackState::Paused) {
            return Err(self.conflict("start"));
        }
        let delay = self.step_delay(speed)?;
        if self.data.is_empty() {
            return Err(ConfigError::InvalidArraySize.into());
        }

        self.checkpoint = None;
        self.renderer.on_initial_state(&self.data, max_value(&self.data));
        tracing::info!(
            "Starting {} over {} elements at speed {}",
            kind,
            self.data.len(),
            speed
        );
        self.launch(kind, speed, delay, None)
    }

    /// Stop whatever is running and start a new trace.
    pub fn restart(&mut self, kind: AlgorithmKind, speed: f64) -> Result<()> {
        self.step_delay(speed)?;
        self.stop();
        self.start(kind, speed)
    }

    /// Pause a running trace and keep its resume point.
    ///
    /// Returns once the worker has halted. If the worker had already
    /// exhausted the trace the session is `Completed` and a conflict is
    /// returned.
    pub fn pause(&mut self) -> Result<()> {
        self.reap();
        if self.state != PlaybackState::Running {
            return Err(self.conflict("pause"));
        }

        let report = self.halt();
        match self.absorb(report)? {
            PlaybackState::Paused => {
                tracing::info!("Paused {} at {:?}", self.algorithm, self.checkpoint);
                Ok(())
            }
            _ => Err(self.conflict("pause")),
        }
    }

    /// Continue a paused trace from its checkpoint.
    ///
    /// Quick sort sessions cannot be resumed; the session stays paused.
    pub fn resume(&mut self) -> Result<()> {
        self.reap();
        if self.state != PlaybackState::Paused {
            return Err(self.conflict("resume"));
        }
        if !self.algorithm.supports_resume() {
            return Err(PlaybackError::UnsupportedResume(self.algorithm));
        }

        let delay = self.step_delay(self.speed)?;
        tracing::info!("Resuming {} from {:?}", self.algorithm, self.checkpoint);
        self.launch(self.algorithm, self.speed, delay, self.checkpoint)
    }

    /// Play/pause button: pause when running, resume when paused, start otherwise.
    pub fn toggle(&mut self, kind: AlgorithmKind, speed: f64) -> Result<PlaybackState> {
        match self.state() {
            PlaybackState::Running => self.pause()?,
            PlaybackState::Paused => self.resume()?,
            PlaybackState::Idle | PlaybackState::Completed => self.start(kind, speed)?,
        }
        Ok(self.state)
    }

    /// Halt any worker, discard the checkpoint and go idle.
    ///
    /// No step is delivered to the renderer after this returns. The array
    /// keeps the mutations applied so far.
    pub fn stop(&mut self) {
        if self.session.is_some() {
            let report = self.halt();
            if let Err(err) = self.absorb(report) {
                tracing::warn!("Playback worker failed while stopping: {}", err);
            }
        }
        self.checkpoint = None;
        if self.state != PlaybackState::Idle {
            tracing::debug!("Playback {:?} -> Idle", self.state);
        }
        self.state = PlaybackState::Idle;
    }

    /// Stop and replace the array-under-sort.
    pub fn reset(&mut self, data: Vec<u32>) -> Result<()> {
        if data.is_empty() {
            return Err(ConfigError::InvalidArraySize.into());
        }
        self.stop();
        self.data = data;
        self.renderer.on_initial_state(&self.data, max_value(&self.data));
        Ok(())
    }

    /// Stop and replace the array with freshly generated values.
    pub fn randomize<R: Rng + ?Sized>(&mut self, config: &DataConfig, rng: &mut R) -> Result<()> {
        let data = generate_data(config, rng)?;
        self.reset(data)
    }

    /// Block until the running worker ends on its own.
    pub fn wait(&mut self) -> Result<PlaybackState> {
        if let Some(session) = self.session.take() {
            let report = Self::join(session);
            self.absorb(report)?;
        }
        Ok(self.state)
    }

    fn launch(
        &mut self,
        kind: AlgorithmKind,
        speed: f64,
        delay: Duration,
        checkpoint: Option<Checkpoint>,
    ) -> Result<()> {
        // Surface a bad checkpoint before the array leaves the controller.
        drop(kind.produce_trace(&mut self.data, checkpoint.as_ref())?);

        let stop = Arc::new(StopSignal::new());
        let job = WorkerJob {
            data: std::mem::take(&mut self.data),
            kind,
            checkpoint,
            delay,
            stop: stop.clone(),
            renderer: self.renderer.clone(),
        };
        // A failed spawn drops the job and the array with it.
        let handle = job.spawn().map_err(|e| {
            tracing::error!("Failed to spawn playback worker: {}", e);
            self.state = PlaybackState::Idle;
            PlaybackError::SessionFailed(e.to_string())
        })?;

        self.algorithm = kind;
        self.speed = speed;
        self.last_error = None;
        self.session = Some(Session { stop, handle });
        self.state = PlaybackState::Running;
        Ok(())
    }

    /// Collect a worker that finished without being asked to.
    fn reap(&mut self) {
        let finished = self
            .session
            .as_ref()
            .is_some_and(|session| session.handle.is_finished());
        if !finished {
            return;
        }
        if let Some(session) = self.session.take() {
            let report = Self::join(session);
            if let Err(err) = self.absorb(report) {
                self.last_error = Some(err);
            }
        }
    }

    /// Raise the stop signal and join the worker.
    fn halt(&mut self) -> WorkerReport {
        match self.session.take() {
            Some(session) => {
                session.stop.raise();
                Self::join(session)
            }
            None => WorkerReport {
                data: std::mem::take(&mut self.data),
                last: None,
                steps: 0,
                outcome: Outcome::Interrupted,
            },
        }
    }

    fn join(session: Session) -> WorkerReport {
        session.handle.join().unwrap_or_else(|_| WorkerReport {
            data: Vec::new(),
            last: None,
            steps: 0,
            outcome: Outcome::Failed("playback worker panicked".into()),
        })
    }

    /// Take back the array and move to the state the worker ended in.
    fn absorb(&mut self, report: WorkerReport) -> Result<PlaybackState> {
        self.data = report.data;
        tracing::debug!("Playback worker returned after {} steps", report.steps);

        match report.outcome {
            Outcome::Completed => {
                self.checkpoint = None;
                self.state = PlaybackState::Completed;
                tracing::info!("{} completed", self.algorithm);
            }
            Outcome::Interrupted => {
                if self.algorithm.supports_resume() {
                    if let Some(last) = report.last {
                        self.checkpoint = Some(last);
                    }
                } else {
                    self.checkpoint = None;
                }
                self.state = PlaybackState::Paused;
            }
            Outcome::Failed(message) => {
                tracing::error!("Playback session failed: {}", message);
                self.checkpoint = None;
                self.state = PlaybackState::Idle;
                return Err(PlaybackError::SessionFailed(message));
            }
        }
        Ok(self.state)
    }

    fn conflict(&self, operation: &'static str) -> PlaybackError {
        PlaybackError::SessionConflict {
            operation,
            state: self.state,
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.stop.raise();
            let _ = session.handle.join();
        }
    }
}
