//! Session score bookkeeping.

use serde::{Deserialize, Serialize};

/// Scoring event emitted by the answer flow when an attempt completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Whether this event counts as a finished attempt.
    pub counted: bool,
    pub correct: bool,
}

/// Running score/streak/attempt counters.
///
/// A pure reducer over the score events the answer flow emits; it never
/// inspects item content. Serializable so a persistence collaborator can
/// carry it between sessions as an opaque blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub streak: u32,
    pub attempts: u32,
}

impl SessionStats {
    /// Fold one event into the counters. Uncounted events are no-ops.
    pub fn apply(&mut self, event: ScoreEvent) {
        if !event.counted {
            return;
        }
        self.attempts = self.attempts.saturating_add(1);
        if event.correct {
            self.score = self.score.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }
    }

    /// Zero all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
