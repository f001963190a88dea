//! Score arithmetic.
//!
//! All functions are pure and saturating; scores are never negative.

use crate::config::{ChallengeConfig, ScoringConfig};

/// Points for completing a round.
///
/// The streak rate applies only when `combo` is strictly greater than the
/// threshold.
///
/// ```rust
/// use recall::config::ScoringConfig;
/// use recall::session::scoring::round_bonus;
///
/// let scoring = ScoringConfig::default();
/// assert_eq!(round_bonus(3, 6, &scoring), 45);
/// assert_eq!(round_bonus(3, 5, &scoring), 30);
/// ```
pub fn round_bonus(level: u32, combo: u32, scoring: &ScoringConfig) -> u32 {
    let per_level = if combo > scoring.combo_threshold {
        scoring.combo_round_points
    } else {
        scoring.round_points
    };
    level.saturating_mul(per_level)
}

/// Points for answering a challenge with `seconds_left` on the clock.
pub fn challenge_bonus(seconds_left: u32, challenge: &ChallengeConfig) -> u32 {
    challenge
        .bonus_base
        .saturating_add(seconds_left.saturating_mul(challenge.bonus_per_second))
}

/// Deduct a penalty, clamping at zero.
pub fn apply_penalty(score: u32, penalty: u32) -> u32 {
    score.saturating_sub(penalty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_round_is_worth_ten() {
        assert_eq!(round_bonus(1, 1, &ScoringConfig::default()), 10);
    }

    #[test]
    fn combo_boundary_is_exclusive() {
        let scoring = ScoringConfig::default();
        assert_eq!(round_bonus(3, 5, &scoring), 30);
        assert_eq!(round_bonus(3, 6, &scoring), 45);
    }

    #[test]
    fn challenge_bonus_grows_with_time_left() {
        let challenge = ChallengeConfig::default();
        assert_eq!(challenge_bonus(0, &challenge), 20);
        assert_eq!(challenge_bonus(3, &challenge), 35);
        assert!(challenge_bonus(4, &challenge) > challenge_bonus(1, &challenge));
    }

    #[test]
    fn penalty_never_goes_negative() {
        assert_eq!(apply_penalty(25, 10), 15);
        assert_eq!(apply_penalty(4, 10), 0);
        assert_eq!(apply_penalty(0, 10), 0);
    }
}
