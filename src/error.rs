//! Crate-level errors.
//!
//! Gameplay outcomes (wrong colour, missed challenge, input out of turn) are
//! never errors; they are state transitions. These variants cover the shell
//! around the game: bad configuration and a game loop nobody talks to.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("game loop is no longer running")]
    LoopClosed,

    #[error("every input handle was dropped before the game ended (level {level}, score {score})")]
    Abandoned { level: u32, score: u32 },

    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}
