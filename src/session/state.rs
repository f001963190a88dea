//! Session state.
//!
//! Owned and mutated exclusively by [`Session`](super::Session); everyone
//! else sees it through a shared reference.

use crate::core::Phase;
use crate::model::{Color, Gesture, Sequence};
use serde::{Deserialize, Serialize};

/// Why a session ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "cause")]
pub enum FailureCause {
    /// The player pressed the wrong colour
    WrongColor { expected: Color, submitted: Color },
    /// A gesture challenge ran out of time
    ChallengeMissed { gesture: Gesture },
}

/// Complete game state of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub sequence: Sequence,
    /// Index of the next colour the player must submit
    pub player_progress: usize,
    pub level: u32,
    pub score: u32,
    /// Consecutive correct submissions since the last failure
    pub combo: u32,
    pub phase: Phase,
    pub repeat_used_this_round: bool,
    /// Set while a submission's side effects are still settling
    pub input_locked: bool,
    /// Next sequence index to flash while displaying
    pub playback_cursor: usize,
    pub rounds_completed: u32,
}

impl SessionState {
    /// Fresh state: empty sequence, level 1, nothing scored.
    pub fn new() -> Self {
        Self {
            sequence: Sequence::new(),
            player_progress: 0,
            level: 1,
            score: 0,
            combo: 0,
            phase: Phase::AwaitingReady,
            repeat_used_this_round: false,
            input_locked: false,
            playback_cursor: 0,
            rounds_completed: 0,
        }
    }

    /// Colour the player must submit next, if any.
    pub fn expected_color(&self) -> Option<Color> {
        self.sequence.get(self.player_progress)
    }

    /// Colours still missing in the current round.
    pub fn remaining(&self) -> usize {
        self.sequence.len().saturating_sub(self.player_progress)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
