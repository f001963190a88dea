//! Unified gesture vocabulary.
//!
//! The classifier emits one of a small closed set of labels. Each label has
//! exactly one role in the game, given by [`GESTURE_ROLES`]: either it asks
//! for a sequence repeat, or it can answer a challenge. The challenge engine
//! draws its prompts from the same table, so there is a single place that
//! interprets gestures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    OpenPalm,
    ThumbsUp,
    Peace,
}

/// What a gesture does when it reaches the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GestureRole {
    /// Same as pressing the repeat control
    Repeat,
    /// Can be requested by, and can answer, a gesture challenge
    Challenge,
}

/// Gesture to role mapping.
pub const GESTURE_ROLES: [(Gesture, GestureRole); 3] = [
    (Gesture::OpenPalm, GestureRole::Repeat),
    (Gesture::ThumbsUp, GestureRole::Challenge),
    (Gesture::Peace, GestureRole::Challenge),
];

impl Gesture {
    /// Classifier label, e.g. `"thumbs_up"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenPalm => "open_palm",
            Self::ThumbsUp => "thumbs_up",
            Self::Peace => "peace",
        }
    }

    /// Parse a classifier label.
    ///
    /// Anything outside the vocabulary is an idle frame, not an error.
    ///
    /// ```rust
    /// use recall::model::Gesture;
    ///
    /// assert_eq!(Gesture::from_label("peace"), Some(Gesture::Peace));
    /// assert_eq!(Gesture::from_label("fist"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Gesture> {
        GESTURE_ROLES
            .iter()
            .map(|(gesture, _)| *gesture)
            .find(|gesture| gesture.label() == label)
    }

    pub fn role(&self) -> GestureRole {
        GESTURE_ROLES
            .iter()
            .find(|(gesture, _)| gesture == self)
            .map(|(_, role)| *role)
            .unwrap_or(GestureRole::Challenge)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gestures a challenge may ask for.
pub fn challenge_vocabulary() -> Vec<Gesture> {
    GESTURE_ROLES
        .iter()
        .filter(|(_, role)| *role == GestureRole::Challenge)
        .map(|(gesture, _)| *gesture)
        .collect()
}

/// Drops repeats of the same gesture inside a cooldown window.
///
/// A held pose is classified on every frame; only the first frame of the
/// pose (or the first after the cooldown lapses) is forwarded.
#[derive(Debug, Clone)]
pub struct GestureDebouncer {
    cooldown: Duration,
    last: Option<(Gesture, Instant)>,
}

impl GestureDebouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: None,
        }
    }

    /// Returns the gesture if it should be forwarded.
    pub fn observe(&mut self, gesture: Gesture, now: Instant) -> Option<Gesture> {
        if let Some((last, at)) = self.last {
            if last == gesture && now.saturating_duration_since(at) < self.cooldown {
                return None;
            }
        }
        self.last = Some((gesture, now));
        Some(gesture)
    }
}
