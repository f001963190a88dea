//! The active challenge value.

use crate::model::Gesture;
use serde::{Deserialize, Serialize};

/// A time-boxed demand for one gesture.
///
/// Exists only while the session is in `ChallengeActive` and is dropped the
/// moment it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub gesture: Gesture,
    pub seconds_left: u32,
    /// Sequence length when the challenge interrupted play
    pub created_during_round: usize,
}

impl Challenge {
    pub fn new(gesture: Gesture, countdown_secs: u32, sequence_len: usize) -> Self {
        Self {
            gesture,
            seconds_left: countdown_secs,
            created_during_round: sequence_len,
        }
    }

    /// Count one second down. Returns `true` once time is up.
    pub fn tick(&mut self) -> bool {
        self.seconds_left = self.seconds_left.saturating_sub(1);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.seconds_left == 0
    }

    pub fn answered_by(&self, gesture: Gesture) -> bool {
        self.gesture == gesture
    }
}
