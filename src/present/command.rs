//! Display commands sent to the presentation layer.

use crate::model::{Color, Gesture};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tone of a status line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Info,
    Progress,
    Success,
    Warning,
    Failure,
}

/// Status line content.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StatusMessage {
    AimAtTargets,
    Starting,
    Watch,
    YourTurn,
    WellDone { bonus: u32 },
    Replaying { penalty: u32 },
    RepeatAlreadyUsed,
    WrongColor,
    ChallengeSucceeded { bonus: u32 },
    ChallengeMissed,
}

impl StatusMessage {
    /// Mood a presenter should use when none is given explicitly.
    pub fn mood(&self) -> Mood {
        match self {
            Self::AimAtTargets | Self::Watch => Mood::Progress,
            Self::Starting | Self::WellDone { .. } | Self::ChallengeSucceeded { .. } => {
                Mood::Success
            }
            Self::YourTurn | Self::Replaying { .. } => Mood::Info,
            Self::RepeatAlreadyUsed => Mood::Warning,
            Self::WrongColor | Self::ChallengeMissed => Mood::Failure,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AimAtTargets => f.write_str("Point the camera at all markers..."),
            Self::Starting => f.write_str("START! The game is beginning..."),
            Self::Watch => f.write_str("Watch the sequence..."),
            Self::YourTurn => f.write_str("Your turn!"),
            Self::WellDone { bonus } => write!(f, "Well done! +{bonus} points, next level..."),
            Self::Replaying { penalty } => write!(f, "Replaying the sequence... (-{penalty} points)"),
            Self::RepeatAlreadyUsed => f.write_str("Repeat already used this round!"),
            Self::WrongColor => f.write_str("Wrong! Game over"),
            Self::ChallengeSucceeded { bonus } => write!(f, "Great! +{bonus} points!"),
            Self::ChallengeMissed => f.write_str("Too slow with the gesture! Game over"),
        }
    }
}

/// Fire-and-forget command for the presentation sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "args")]
pub enum DisplayCommand {
    ShowSequenceStep { color: Color },
    SetLevel(u32),
    SetScore(u32),
    SetCombo(u32),
    SetStatus { message: StatusMessage, mood: Mood },
    SetInputEnabled(bool),
    ShowChallenge { gesture: Gesture, seconds_left: u32 },
    UpdateChallengeCountdown(u32),
    HideChallenge,
    ShowGameOver { level: u32, score: u32 },
}

impl DisplayCommand {
    /// Status command using the message's default mood.
    pub fn status(message: StatusMessage) -> Self {
        Self::SetStatus {
            mood: message.mood(),
            message,
        }
    }
}
