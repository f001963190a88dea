//! Guard predicates for gating input.
//!
//! Guards are pure boolean functions that decide whether an operation may
//! touch the session at all. Rejected operations are silent no-ops, so a
//! guard never produces an error, only a yes or no.

use std::fmt;

/// Named pure predicate over a value.
///
/// # Example
///
/// ```rust
/// use recall::core::{Guard, Phase};
///
/// let can_play = Guard::new("can_play", |phase: &Phase| phase.accepts_input());
///
/// assert!(can_play.check(&Phase::AwaitingInput));
/// assert!(!can_play.check(&Phase::Displaying));
/// assert_eq!(can_play.label(), "can_play");
/// ```
pub struct Guard<T> {
    label: &'static str,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(label: &'static str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            label,
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the operation for this value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    /// Name used when logging a rejection.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<T: 'static> Guard<T> {
    /// Combine two guards; both must pass.
    ///
    /// ```rust
    /// use recall::core::Guard;
    ///
    /// let positive = Guard::new("positive", |n: &i32| *n > 0);
    /// let small = Guard::new("small", |n: &i32| *n < 10);
    /// let both = positive.and(small);
    ///
    /// assert!(both.check(&5));
    /// assert!(!both.check(&12));
    /// assert!(!both.check(&-1));
    /// ```
    pub fn and(self, other: Guard<T>) -> Guard<T> {
        let label = self.label;
        Guard::new(label, move |value: &T| {
            self.check(value) && other.check(value)
        })
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("label", &self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;

    #[test]
    fn guard_allows_matching_values() {
        let guard = Guard::new("input", |p: &Phase| matches!(p, Phase::AwaitingInput));

        assert!(guard.check(&Phase::AwaitingInput));
        assert!(!guard.check(&Phase::RoundComplete));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new("not_over", |p: &Phase| !p.is_terminal());

        let first = guard.check(&Phase::Displaying);
        let second = guard.check(&Phase::Displaying);

        assert_eq!(first, second);
    }

    #[test]
    fn combined_guard_short_circuits_on_first_failure() {
        let guard = Guard::new("not_over", |p: &Phase| !p.is_terminal())
            .and(Guard::new("input", |p: &Phase| p.accepts_input()));

        assert!(guard.check(&Phase::AwaitingInput));
        assert!(!guard.check(&Phase::GameOver));
        assert!(!guard.check(&Phase::ChallengeActive));
        assert_eq!(guard.label(), "not_over");
    }

    #[test]
    fn debug_shows_label_only() {
        let guard = Guard::new("repeat", |_: &u8| true);
        assert_eq!(format!("{guard:?}"), "Guard { label: \"repeat\" }");
    }
}
