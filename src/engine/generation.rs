// src/engine/generation.rs

use tracing::debug;

use super::Generation;

/// Generation counter plus the "latest requested" and "last applied" marks.
///
/// Semantics:
/// - every recompute request takes the next generation, which immediately
///   becomes the latest requested one;
/// - only the latest requested generation may be applied;
/// - applied generations strictly increase.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    latest_requested: Generation,
    last_applied: Generation,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new generation and record it as the latest requested.
    pub fn next(&mut self) -> Generation {
        self.latest_requested += 1;
        self.latest_requested
    }

    pub fn latest_requested(&self) -> Generation {
        self.latest_requested
    }

    pub fn last_applied(&self) -> Generation {
        self.last_applied
    }

    pub fn is_latest(&self, generation: Generation) -> bool {
        generation == self.latest_requested
    }

    /// Whether something newer than `generation` has been requested.
    pub fn superseded(&self, generation: Generation) -> bool {
        generation < self.latest_requested
    }

    /// Record that `generation` was applied. Returns `false` (and changes
    /// nothing) if it is not newer than the last applied generation.
    pub fn mark_applied(&mut self, generation: Generation) -> bool {
        if generation <= self.last_applied {
            debug!(
                gen = generation,
                last_applied = self.last_applied,
                "refusing to apply a generation older than the last applied one"
            );
            return false;
        }
        self.last_applied = generation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase_and_only_latest_counts() {
        let mut tracker = GenerationTracker::new();
        let first = tracker.next();
        let second = tracker.next();

        assert_eq!((first, second), (1, 2));
        assert!(tracker.superseded(first));
        assert!(tracker.is_latest(second));
    }

    #[test]
    fn applied_generations_never_go_backwards() {
        let mut tracker = GenerationTracker::new();
        tracker.next();
        tracker.next();

        assert!(tracker.mark_applied(2));
        assert!(!tracker.mark_applied(1));
        assert!(!tracker.mark_applied(2));
        assert_eq!(tracker.last_applied(), 2);
    }
}
