//! Phase change history.
//!
//! Every phase transition a session makes is recorded with the level it
//! happened at and a UTC timestamp. The history ends up in the game summary.

use super::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    /// The phase being left
    pub from: Phase,
    /// The phase being entered
    pub to: Phase,
    /// Level at the moment of the change
    pub level: u32,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of phase transitions.
///
/// # Example
///
/// ```rust
/// use recall::core::{Phase, PhaseChange, PhaseHistory};
/// use chrono::Utc;
///
/// let mut history = PhaseHistory::new();
/// history.record(PhaseChange {
///     from: Phase::AwaitingReady,
///     to: Phase::Displaying,
///     level: 1,
///     timestamp: Utc::now(),
/// });
/// history.record(PhaseChange {
///     from: Phase::Displaying,
///     to: Phase::AwaitingInput,
///     level: 1,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(
///     history.path(),
///     vec![Phase::AwaitingReady, Phase::Displaying, Phase::AwaitingInput]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseHistory {
    changes: Vec<PhaseChange>,
}

impl PhaseHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Append a change.
    pub fn record(&mut self, change: PhaseChange) {
        self.changes.push(change);
    }

    /// Phases traversed: the first change's origin, then each destination.
    pub fn path(&self) -> Vec<Phase> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.first() {
            path.push(first.from);
        }
        path.extend(self.changes.iter().map(|change| change.to));
        path
    }

    /// Time between the first and last recorded change.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.first()?, self.changes.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// How many times the session entered `phase`.
    pub fn entries_into(&self, phase: Phase) -> usize {
        self.changes.iter().filter(|change| change.to == phase).count()
    }

    /// All recorded changes, oldest first.
    pub fn changes(&self) -> &[PhaseChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
