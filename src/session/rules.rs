//! Input legality rules.

use super::state::SessionState;
use crate::core::Guard;

/// Guards consulted before a submission or repeat may touch the session.
#[derive(Debug)]
pub struct InputRules {
    pub submit: Guard<SessionState>,
    pub repeat: Guard<SessionState>,
}

impl InputRules {
    /// The rules the game is played by.
    ///
    /// Both operations need the player's turn with no submission in flight.
    /// A submission additionally needs an unanswered colour; a repeat needs
    /// something to replay.
    pub fn standard() -> Self {
        Self {
            submit: players_turn().and(Guard::new("submit", |s: &SessionState| {
                s.player_progress < s.sequence.len()
            })),
            repeat: players_turn().and(Guard::new("repeat", |s: &SessionState| {
                !s.sequence.is_empty()
            })),
        }
    }
}

impl Default for InputRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Player's turn: awaiting input and not locked.
pub fn players_turn() -> Guard<SessionState> {
    Guard::new("players_turn", |s: &SessionState| {
        s.phase.accepts_input() && !s.input_locked
    })
}
