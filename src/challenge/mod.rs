//! Gesture challenges that interrupt the player's turn.

#[allow(clippy::module_inception)]
mod challenge;
mod engine;

pub use challenge::Challenge;
pub use engine::{ChallengeEngine, EngineStatus, GestureOutcome};
