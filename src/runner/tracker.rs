//! Latest sampled value of each animated track.
//!
//! Each cell stores the `f64` bit pattern in an `AtomicU64`, so a reader on
//! any thread sees either the previous or the new value, never a torn one.
//! The game state machine is the only writer.
//!
//! Every cell also carries an epoch. Resetting a track bumps its epoch, and
//! a write tagged with an older epoch is refused. That way a sample from a
//! superseded animation cannot land after the reset.

use std::sync::atomic::{AtomicU64, Ordering};

use super::types::Track;

#[derive(Debug)]
pub struct PositionTracker {
    values: [AtomicU64; 2],
    epochs: [AtomicU64; 2],
}

impl PositionTracker {
    pub fn new(player_offset: f64, obstacle_offset: f64) -> Self {
        Self {
            values: [
                AtomicU64::new(player_offset.to_bits()),
                AtomicU64::new(obstacle_offset.to_bits()),
            ],
            epochs: [AtomicU64::new(0), AtomicU64::new(0)],
        }
    }

    pub fn get(&self, track: Track) -> f64 {
        f64::from_bits(self.values[track.index()].load(Ordering::Acquire))
    }

    pub fn player_offset(&self) -> f64 {
        self.get(Track::Player)
    }

    pub fn obstacle_offset(&self) -> f64 {
        self.get(Track::Obstacle)
    }

    /// Current epoch of `track`.
    pub fn epoch(&self, track: Track) -> u64 {
        self.epochs[track.index()].load(Ordering::Acquire)
    }

    /// Store a sample produced under `epoch`. Returns false and leaves the
    /// cell unchanged if the track was reset since that epoch began.
    pub fn write(&self, track: Track, value: f64, epoch: u64) -> bool {
        let i = track.index();
        if self.epochs[i].load(Ordering::Acquire) != epoch {
            return false;
        }
        self.values[i].store(value.to_bits(), Ordering::Release);
        true
    }

    /// Set `track` to `value` and start a new epoch. Returns the new epoch,
    /// which the next animation on this track must write under.
    pub fn reset_track(&self, track: Track, value: f64) -> u64 {
        let i = track.index();
        let epoch = self.epochs[i].fetch_add(1, Ordering::AcqRel) + 1;
        self.values[i].store(value.to_bits(), Ordering::Release);
        epoch
    }

    /// Reset both tracks. Returns the new `[player, obstacle]` epochs.
    pub fn reset(&self, player_offset: f64, obstacle_offset: f64) -> [u64; 2] {
        [
            self.reset_track(Track::Player, player_offset),
            self.reset_track(Track::Obstacle, obstacle_offset),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_holds_initial_values() {
        let tracker = PositionTracker::new(0.0, 400.0);
        assert_eq!(tracker.player_offset(), 0.0);
        assert_eq!(tracker.obstacle_offset(), 400.0);
        assert_eq!(tracker.epoch(Track::Player), 0);
        assert_eq!(tracker.epoch(Track::Obstacle), 0);
    }

    #[test]
    fn test_write_with_current_epoch() {
        let tracker = PositionTracker::new(0.0, 400.0);
        assert!(tracker.write(Track::Obstacle, 123.5, 0));
        assert_eq!(tracker.obstacle_offset(), 123.5);
        // Other track untouched
        assert_eq!(tracker.player_offset(), 0.0);
    }

    #[test]
    fn test_stale_write_after_reset_is_refused() {
        let tracker = PositionTracker::new(0.0, 400.0);
        let old = tracker.epoch(Track::Player);
        tracker.write(Track::Player, 90.0, old);

        let fresh = tracker.reset_track(Track::Player, 0.0);
        assert_ne!(old, fresh);

        assert!(!tracker.write(Track::Player, 120.0, old));
        assert_eq!(tracker.player_offset(), 0.0);

        assert!(tracker.write(Track::Player, 10.0, fresh));
        assert_eq!(tracker.player_offset(), 10.0);
    }

    #[test]
    fn test_reset_bumps_both_epochs() {
        let tracker = PositionTracker::new(33.0, -5.0);
        let [p, o] = tracker.reset(0.0, 400.0);
        assert_eq!(p, 1);
        assert_eq!(o, 1);
        assert_eq!(tracker.player_offset(), 0.0);
        assert_eq!(tracker.obstacle_offset(), 400.0);
    }

    #[test]
    fn test_reader_thread_sees_written_values() {
        let tracker = Arc::new(PositionTracker::new(0.0, 400.0));
        let epoch = tracker.epoch(Track::Obstacle);
        for x in [300.0, 200.0, 100.0] {
            tracker.write(Track::Obstacle, x, epoch);
        }
        let reader = Arc::clone(&tracker);
        let seen = std::thread::spawn(move || reader.obstacle_offset())
            .join()
            .unwrap();
        assert_eq!(seen, 100.0);
    }
}
