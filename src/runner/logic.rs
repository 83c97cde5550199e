//! Runner game logic: mode transitions, scoring, collision checks.
//!
//! The state machine never drives time itself. It issues commands to an
//! [`Animator`] and reacts to the events that clock delivers back through
//! [`RunnerGame::handle_event`]. Every event names the animation that
//! produced it; events from animations the machine no longer tracks are
//! dropped.

use std::sync::Arc;

use tracing::{debug, info, trace};

use super::animator::{AnimationHandle, Animator, AnimatorEvent, Segment, Timeline};
use super::collision::{check_collision, Geometry};
use super::easing::Easing;
use super::tracker::PositionTracker;
use super::types::*;
use crate::config::RunnerConfig;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerInput {
    Start,
    Jump,
    Reset,
}

/// An animation the machine started, with the tracker epoch its samples
/// must be written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveAnimation {
    handle: AnimationHandle,
    epoch: u64,
}

#[derive(Debug)]
pub struct RunnerGame {
    config: RunnerConfig,
    geometry: Geometry,
    mode: GameMode,
    score: u32,
    high_score: u32,
    tracker: Arc<PositionTracker>,
    traversal: Option<ActiveAnimation>,
    jump: Option<ActiveAnimation>,
}

impl RunnerGame {
    pub fn new(config: RunnerConfig) -> Self {
        let tracker = PositionTracker::new(PLAYER_REST, config.obstacle_start);
        Self {
            geometry: config.geometry(),
            config,
            mode: GameMode::Ready,
            score: 0,
            high_score: 0,
            tracker: Arc::new(tracker),
            traversal: None,
            jump: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Shared read access to the latest offsets.
    pub fn tracker(&self) -> &Arc<PositionTracker> {
        &self.tracker
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// Handle of the running obstacle pass, if any.
    pub fn traversal_handle(&self) -> Option<AnimationHandle> {
        self.traversal.map(|a| a.handle)
    }

    /// Handle of the running jump, if any.
    pub fn jump_handle(&self) -> Option<AnimationHandle> {
        self.jump.map(|a| a.handle)
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            mode: self.mode,
            score: self.score,
            high_score: self.high_score,
            player_offset: self.tracker.player_offset(),
            obstacle_offset: self.tracker.obstacle_offset(),
            jumping: self.is_jumping(),
        }
    }

    /// Ready -> Running. Starts the looping obstacle pass.
    pub fn start<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        if self.mode != GameMode::Ready {
            return;
        }
        self.cancel_all(animator);
        self.score = 0;
        self.tracker.reset(PLAYER_REST, self.config.obstacle_start);
        self.mode = GameMode::Running;
        debug!("runner started");
        self.begin_traversal(animator);
    }

    /// Start a jump, superseding one already in flight.
    pub fn request_jump<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        if self.mode != GameMode::Running {
            return;
        }
        if let Some(previous) = self.jump.take() {
            animator.cancel(previous.handle);
            debug!(handle = previous.handle.id(), "jump superseded");
        }

        let epoch = self.tracker.reset_track(Track::Player, PLAYER_REST);
        let peak = PLAYER_REST + self.config.jump_peak;
        let phase_ms = self.config.jump_phase_ms;
        let handle = animator.animate_sequence(
            Track::Player,
            &[
                Segment::new(PLAYER_REST, peak, phase_ms, Easing::EaseOut),
                Segment::new(peak, PLAYER_REST, phase_ms, Easing::EaseIn),
            ],
        );
        self.jump = Some(ActiveAnimation { handle, epoch });

        // Dropping back to the resting offset can itself land on the obstacle
        self.check_for_collision(animator);
    }

    /// Over -> Ready. Zeroes score and offsets.
    pub fn reset<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        if self.mode != GameMode::Over {
            return;
        }
        self.cancel_all(animator);
        self.tracker.reset(PLAYER_REST, self.config.obstacle_start);
        self.score = 0;
        self.mode = GameMode::Ready;
        debug!("runner reset");
    }

    /// Record a sampled value for `track` and test for a collision.
    ///
    /// Ignored unless running; offsets only move outside a run through
    /// `start` and `reset`.
    pub fn on_tick<A: Animator + ?Sized>(&mut self, track: Track, value: f64, animator: &mut A) {
        if self.mode != GameMode::Running {
            return;
        }
        let epoch = self.tracker.epoch(track);
        self.tracker.write(track, value, epoch);
        self.check_for_collision(animator);
    }

    /// The obstacle finished a full pass: score it and send the next one.
    pub fn on_obstacle_traversal_complete<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        if self.mode != GameMode::Running {
            return;
        }
        self.score += 1;
        debug!(score = self.score, "obstacle cleared");
        self.begin_traversal(animator);
    }

    /// Route one clock event, dropping it if its animation is no longer the
    /// current one on its track.
    pub fn handle_event<A: Animator + ?Sized>(&mut self, event: AnimatorEvent, animator: &mut A) {
        let track = event.track();
        let active = match track {
            Track::Player => self.jump,
            Track::Obstacle => self.traversal,
        };
        let Some(active) = active.filter(|a| a.handle == event.handle()) else {
            trace!(handle = event.handle().id(), ?track, "dropped stale animation event");
            return;
        };

        match event {
            AnimatorEvent::Tick { value, .. } => {
                if !self.tracker.write(track, value, active.epoch) {
                    trace!(handle = active.handle.id(), ?track, "dropped superseded sample");
                    return;
                }
                self.check_for_collision(animator);
            }
            AnimatorEvent::Complete { .. } => match track {
                Track::Player => self.jump = None,
                Track::Obstacle => {
                    self.traversal = None;
                    self.on_obstacle_traversal_complete(animator);
                }
            },
        }
    }

    /// Apply a host input.
    pub fn process_input<A: Animator + ?Sized>(&mut self, input: RunnerInput, animator: &mut A) {
        match input {
            RunnerInput::Start => self.start(animator),
            RunnerInput::Jump => self.request_jump(animator),
            RunnerInput::Reset => self.reset(animator),
        }
    }

    fn begin_traversal<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        if let Some(previous) = self.traversal.take() {
            animator.cancel(previous.handle);
        }
        let epoch = self
            .tracker
            .reset_track(Track::Obstacle, self.config.obstacle_start);
        let handle = animator.animate(
            Track::Obstacle,
            self.config.obstacle_start,
            self.config.obstacle_end,
            self.config.traversal_ms,
            self.config.traversal_easing,
        );
        self.traversal = Some(ActiveAnimation { handle, epoch });
    }

    fn check_for_collision<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        if self.mode != GameMode::Running {
            return;
        }
        let hit = check_collision(
            &self.geometry,
            self.tracker.player_offset(),
            self.tracker.obstacle_offset(),
        );
        if hit {
            self.game_over(animator);
        }
    }

    fn game_over<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        self.mode = GameMode::Over;
        self.cancel_all(animator);
        let previous_best = self.high_score;
        self.high_score = self.high_score.max(self.score);
        info!(
            score = self.score,
            high_score = self.high_score,
            new_record = self.high_score > previous_best,
            "runner collided"
        );
    }

    fn cancel_all<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        for active in [self.traversal.take(), self.jump.take()].into_iter().flatten() {
            animator.cancel(active.handle);
        }
    }
}

/// Advance the clock by `dt_ms` and feed every resulting event to the game.
///
/// Time is consumed in whole clock steps; leftovers carry to the next call.
/// Returns true if at least one step ran.
pub fn tick_runner(game: &mut RunnerGame, clock: &mut Timeline, dt_ms: u64) -> bool {
    clock.accumulate(dt_ms);
    let mut stepped = false;
    while let Some(events) = clock.next_step() {
        stepped = true;
        for event in events {
            game.handle_event(event, clock);
        }
    }
    stepped
}
