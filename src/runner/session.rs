//! Async driver for a runner game.
//!
//! One tokio task owns the game and its clock. Host input arrives on an
//! unbounded channel and clock steps come from an interval, and the task
//! handles both one at a time, so every mutation of the game is serialized.
//! After each input or tick the task publishes a fresh [`RunnerSnapshot`]
//! on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::animator::Timeline;
use super::logic::{tick_runner, RunnerGame, RunnerInput};
use super::tracker::PositionTracker;
use super::types::RunnerSnapshot;
use crate::config::RunnerConfig;
use crate::error::{ConfigError, SessionError};

/// Longest gap fed to the clock in one go. A host that was suspended resumes
/// where it stopped instead of replaying the whole gap.
pub const MAX_CATCH_UP_MS: u64 = 250;

/// Handle to a running session task.
pub struct RunnerSession {
    inputs: mpsc::UnboundedSender<RunnerInput>,
    snapshots: watch::Receiver<RunnerSnapshot>,
    tracker: Arc<PositionTracker>,
    task: JoinHandle<()>,
}

impl RunnerSession {
    /// Validate `config` and spawn the session task on the current runtime.
    pub fn spawn(config: RunnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let clock = Timeline::new(config.clock_step_ms);
        let game = RunnerGame::new(config);
        let tracker = Arc::clone(game.tracker());

        let (inputs, input_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(game.snapshot());
        let task = tokio::spawn(run_session(game, clock, input_rx, snapshot_tx));

        Ok(Self {
            inputs,
            snapshots,
            tracker,
            task,
        })
    }

    pub fn start(&self) -> Result<(), SessionError> {
        self.send(RunnerInput::Start)
    }

    pub fn jump(&self) -> Result<(), SessionError> {
        self.send(RunnerInput::Jump)
    }

    pub fn reset(&self) -> Result<(), SessionError> {
        self.send(RunnerInput::Reset)
    }

    /// Queue an input. Never blocks.
    pub fn send(&self, input: RunnerInput) -> Result<(), SessionError> {
        self.inputs.send(input).map_err(|_| SessionError::Closed)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> RunnerSnapshot {
        *self.snapshots.borrow()
    }

    /// A receiver that is notified whenever the published state changes.
    pub fn subscribe(&self) -> watch::Receiver<RunnerSnapshot> {
        self.snapshots.clone()
    }

    /// Live offsets, updated on every clock step rather than per snapshot.
    pub fn tracker(&self) -> &Arc<PositionTracker> {
        &self.tracker
    }

    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(self) {
        let Self { inputs, task, .. } = self;
        drop(inputs);
        let _ = task.await;
    }
}

async fn run_session(
    mut game: RunnerGame,
    mut clock: Timeline,
    mut inputs: mpsc::UnboundedReceiver<RunnerInput>,
    snapshots: watch::Sender<RunnerSnapshot>,
) {
    let mut interval = time::interval(Duration::from_millis(clock.step_ms()));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            biased;

            input = inputs.recv() => match input {
                Some(input) => {
                    debug!(?input, mode = game.mode().name(), "session input");
                    game.process_input(input, &mut clock);
                }
                None => break,
            },
            now = interval.tick() => {
                let dt_ms = now.duration_since(last_tick).as_millis() as u64;
                last_tick = now;
                tick_runner(&mut game, &mut clock, dt_ms.min(MAX_CATCH_UP_MS));
            }
        }

        let next = game.snapshot();
        snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    debug!(
        score = game.score(),
        high_score = game.high_score(),
        "runner session stopped"
    );
}
