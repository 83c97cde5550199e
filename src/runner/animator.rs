//! Animation clock: the contract the game issues commands against, and a
//! deterministic fixed-step implementation of it.

use super::easing::Easing;
use super::types::Track;

/// Identifies one started animation. Ids are never reused by a clock, so a
/// handle doubles as the token that tells current callbacks from stale ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// One leg of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Segment {
    pub fn new(from: f64, to: f64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
        }
    }

    /// Value after `elapsed_ms` into this leg.
    pub fn value_at(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

/// Callback delivered by a clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorEvent {
    /// An intermediate (or final) value of a running animation.
    Tick {
        handle: AnimationHandle,
        track: Track,
        value: f64,
    },
    /// The animation ran to its end. Never sent for a cancelled animation.
    Complete {
        handle: AnimationHandle,
        track: Track,
    },
}

impl AnimatorEvent {
    pub fn handle(&self) -> AnimationHandle {
        match self {
            Self::Tick { handle, .. } | Self::Complete { handle, .. } => *handle,
        }
    }

    pub fn track(&self) -> Track {
        match self {
            Self::Tick { track, .. } | Self::Complete { track, .. } => *track,
        }
    }
}

/// Commands the game state machine issues to a clock.
pub trait Animator {
    /// Play `segments` back to back on `track` with no gap between them.
    fn animate_sequence(&mut self, track: Track, segments: &[Segment]) -> AnimationHandle;

    /// Stop an animation. No further events are produced for it. Unknown or
    /// finished handles are ignored.
    fn cancel(&mut self, handle: AnimationHandle);

    fn animate(
        &mut self,
        track: Track,
        from: f64,
        to: f64,
        duration_ms: u64,
        easing: Easing,
    ) -> AnimationHandle {
        self.animate_sequence(track, &[Segment::new(from, to, duration_ms, easing)])
    }
}

#[derive(Debug, Clone)]
struct RunningAnimation {
    handle: AnimationHandle,
    track: Track,
    segments: Vec<Segment>,
    elapsed_ms: u64,
    total_ms: u64,
}

impl RunningAnimation {
    fn value(&self) -> f64 {
        let mut remaining = self.elapsed_ms;
        for segment in &self.segments {
            if remaining < segment.duration_ms {
                return segment.value_at(remaining);
            }
            remaining -= segment.duration_ms;
        }
        self.segments.last().map_or(0.0, |s| s.to)
    }

    fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.total_ms
    }
}

/// Fixed-step clock. Elapsed time is fed in with [`Timeline::accumulate`]
/// and consumed one whole step at a time, so every animation is sampled at
/// the same step boundaries regardless of how irregular the host's frames
/// are.
#[derive(Debug, Clone)]
pub struct Timeline {
    step_ms: u64,
    accumulated_ms: u64,
    next_id: u64,
    running: Vec<RunningAnimation>,
    /// Total steps taken.
    pub step_count: u64,
}

impl Timeline {
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1),
            accumulated_ms: 0,
            next_id: 1,
            running: Vec::new(),
            step_count: 0,
        }
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    pub fn is_active(&self, handle: AnimationHandle) -> bool {
        self.running.iter().any(|a| a.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    /// Number of running animations on `track`.
    pub fn active_on(&self, track: Track) -> usize {
        self.running.iter().filter(|a| a.track == track).count()
    }

    /// Add elapsed wall time. Whole steps are then taken with
    /// [`Timeline::next_step`].
    pub fn accumulate(&mut self, dt_ms: u64) {
        self.accumulated_ms += dt_ms;
    }

    /// Take one step if at least one whole step has accumulated.
    pub fn next_step(&mut self) -> Option<Vec<AnimatorEvent>> {
        if self.accumulated_ms < self.step_ms {
            return None;
        }
        self.accumulated_ms -= self.step_ms;
        Some(self.step())
    }

    /// Advance every running animation by one step.
    ///
    /// All ticks of the step come before any completion, so a consumer sees
    /// the final sampled positions before learning that a pass finished.
    pub fn step(&mut self) -> Vec<AnimatorEvent> {
        self.step_count += 1;
        let mut events = Vec::with_capacity(self.running.len() * 2);

        for animation in &mut self.running {
            animation.elapsed_ms = (animation.elapsed_ms + self.step_ms).min(animation.total_ms);
            events.push(AnimatorEvent::Tick {
                handle: animation.handle,
                track: animation.track,
                value: animation.value(),
            });
        }

        for animation in self.running.iter().filter(|a| a.is_finished()) {
            events.push(AnimatorEvent::Complete {
                handle: animation.handle,
                track: animation.track,
            });
        }
        self.running.retain(|a| !a.is_finished());

        events
    }
}

impl Animator for Timeline {
    fn animate_sequence(&mut self, track: Track, segments: &[Segment]) -> AnimationHandle {
        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;
        self.running.push(RunningAnimation {
            handle,
            track,
            segments: segments.to_vec(),
            elapsed_ms: 0,
            total_ms: segments.iter().map(|s| s.duration_ms).sum(),
        });
        handle
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.running.retain(|a| a.handle != handle);
    }
}
