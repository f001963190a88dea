//! Session phases.
//!
//! A phase is a pure value describing where a game session currently is.
//! All inspection methods are side-effect free; the session machine is the
//! only place that moves from one phase to another.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a game session in its lifecycle.
///
/// # Example
///
/// ```rust
/// use recall::core::Phase;
///
/// assert!(Phase::AwaitingInput.accepts_input());
/// assert!(!Phase::Displaying.accepts_input());
/// assert!(Phase::GameOver.is_terminal());
/// assert_eq!(Phase::ChallengeActive.name(), "ChallengeActive");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for every tracking target to be acquired
    AwaitingReady,
    /// Playing the sequence back; input is rejected
    Displaying,
    /// The player is reproducing the sequence
    AwaitingInput,
    /// The whole sequence was reproduced; the next round is pending
    RoundComplete,
    /// A gesture challenge has suspended normal input
    ChallengeActive,
    /// Terminal. Only a fresh session can play again.
    GameOver,
}

impl Phase {
    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingReady => "AwaitingReady",
            Self::Displaying => "Displaying",
            Self::AwaitingInput => "AwaitingInput",
            Self::RoundComplete => "RoundComplete",
            Self::ChallengeActive => "ChallengeActive",
            Self::GameOver => "GameOver",
        }
    }

    /// Check if this is the terminal phase.
    ///
    /// No transition leaves a terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver)
    }

    /// Check if colour submissions and repeat requests may be considered.
    ///
    /// This is the phase half of input legality; the session adds the input
    /// lock and sequence bounds on top of it.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::AwaitingInput)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
