//! Game configuration.
//!
//! Every timing, scoring and challenge constant lives here with the
//! defaults the game ships with. A configuration can be loaded from JSON,
//! where any omitted field keeps its default, and is validated with
//! `Validation` so that every problem is reported at once.
//!
//! # Example
//!
//! ```rust
//! use recall::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "challenge": { "trigger_chance": 0.5 } }"#)
//!     .unwrap();
//!
//! assert_eq!(config.challenge.trigger_chance, 0.5);
//! assert_eq!(config.challenge.countdown_secs, 4);
//! assert_eq!(config.scoring.repeat_penalty, 10);
//! ```

pub mod error;

pub use error::{ConfigError, ConfigIssue};

use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigIssue>>;

/// Delays that drive sequence playback and round flow, in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Lead-in between the ready signal and the first playback
    pub start_delay_ms: u64,
    /// Lead-in before each later round's playback
    pub sequence_delay_ms: u64,
    /// Pause before every flash
    pub sequence_pause_ms: u64,
    /// How long a single flash lasts
    pub flash_duration_ms: u64,
    /// Input lock after a correct, non-final submission
    pub input_unlock_ms: u64,
    /// Delay between completing a round and starting the next one
    pub round_advance_ms: u64,
    /// Lead-in before a requested replay
    pub repeat_delay_ms: u64,
    /// How long a transient status stays up before "your turn" returns
    pub status_restore_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 2500,
            sequence_delay_ms: 1000,
            sequence_pause_ms: 600,
            flash_duration_ms: 600,
            input_unlock_ms: 300,
            round_advance_ms: 2000,
            repeat_delay_ms: 500,
            status_restore_ms: 1500,
        }
    }
}

impl TimingConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn sequence_delay(&self) -> Duration {
        Duration::from_millis(self.sequence_delay_ms)
    }

    pub fn sequence_pause(&self) -> Duration {
        Duration::from_millis(self.sequence_pause_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }

    pub fn input_unlock(&self) -> Duration {
        Duration::from_millis(self.input_unlock_ms)
    }

    pub fn round_advance(&self) -> Duration {
        Duration::from_millis(self.round_advance_ms)
    }

    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms)
    }

    pub fn status_restore(&self) -> Duration {
        Duration::from_millis(self.status_restore_ms)
    }
}

/// Points awarded and deducted by the main game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Per-level points for a completed round
    pub round_points: u32,
    /// Per-level points for a completed round while on a combo streak
    pub combo_round_points: u32,
    /// Combo must be strictly greater than this for the streak rate
    pub combo_threshold: u32,
    /// Cost of a replay, clamped so the score never goes negative
    pub repeat_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            round_points: 10,
            combo_round_points: 15,
            combo_threshold: 5,
            repeat_penalty: 10,
        }
    }
}

/// Gesture challenge behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    pub enabled: bool,
    /// Probability that a single check starts a challenge
    pub trigger_chance: f64,
    pub check_interval_ms: u64,
    /// Delay between the first completed round and the first check
    pub arm_delay_ms: u64,
    /// Seconds the player has to answer
    pub countdown_secs: u32,
    pub tick_ms: u64,
    /// Pause after a solved challenge before play resumes
    pub grace_ms: u64,
    pub bonus_base: u32,
    pub bonus_per_second: u32,
    /// Repeats of the same classifier label inside this window are dropped
    pub gesture_cooldown_ms: u64,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_chance: 0.3,
            check_interval_ms: 8000,
            arm_delay_ms: 5000,
            countdown_secs: 4,
            tick_ms: 1000,
            grace_ms: 2000,
            bonus_base: 20,
            bonus_per_second: 5,
            gesture_cooldown_ms: 1000,
        }
    }
}

impl ChallengeConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    pub fn arm_delay(&self) -> Duration {
        Duration::from_millis(self.arm_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    pub fn gesture_cooldown(&self) -> Duration {
        Duration::from_millis(self.gesture_cooldown_ms)
    }
}

/// Tracking targets that must all be visible before the game starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub targets: Vec<String>,
    /// Colour submitted by clicking the sphere anchored on a target
    pub click_colors: BTreeMap<String, Color>,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "marker1".to_string(),
                "marker2".to_string(),
                "marker3".to_string(),
            ],
            click_colors: BTreeMap::from([
                ("marker1".to_string(), Color::Red),
                ("marker2".to_string(), Color::Green),
                ("marker3".to_string(), Color::Blue),
            ]),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub challenge: ChallengeConfig,
    pub readiness: ReadinessConfig,
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Replace the challenge settings.
    pub fn with_challenge(mut self, challenge: ChallengeConfig) -> Self {
        self.challenge = challenge;
        self
    }

    /// Turn the challenge feature off.
    pub fn without_challenges(mut self) -> Self {
        self.challenge.enabled = false;
        self
    }

    /// Replace the tracking target ids.
    ///
    /// Click colours of targets no longer listed are dropped.
    pub fn with_targets<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let readiness = &mut self.readiness;
        readiness.targets = targets.into_iter().map(Into::into).collect();
        let targets = &readiness.targets;
        readiness
            .click_colors
            .retain(|target, _| targets.contains(target));
        self
    }

    /// Check every value, accumulating ALL issues.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigIssue>> {
        let timing = &self.timing;
        let challenge = &self.challenge;

        let mut checks: Vec<Check> = vec![
            non_zero("timing.flash_duration_ms", timing.flash_duration_ms),
            non_zero("challenge.tick_ms", challenge.tick_ms),
            non_zero("challenge.check_interval_ms", challenge.check_interval_ms),
        ];

        checks.push(if (0.0..=1.0).contains(&challenge.trigger_chance) {
            Validation::success(())
        } else {
            Validation::fail(ConfigIssue::TriggerChanceOutOfRange(
                challenge.trigger_chance,
            ))
        });

        checks.push(if challenge.countdown_secs > 0 {
            Validation::success(())
        } else {
            Validation::fail(ConfigIssue::ZeroCountdown)
        });

        checks.push(if self.readiness.targets.is_empty() {
            Validation::fail(ConfigIssue::NoTargets)
        } else {
            Validation::success(())
        });

        let mut seen = HashSet::new();
        for target in &self.readiness.targets {
            if !seen.insert(target.as_str()) {
                checks.push(Validation::fail(ConfigIssue::DuplicateTarget(
                    target.clone(),
                )));
            }
        }

        for target in self.readiness.click_colors.keys() {
            if !seen.contains(target.as_str()) {
                checks.push(Validation::fail(ConfigIssue::UnknownClickTarget(
                    target.clone(),
                )));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate, converting failures into a `ConfigError`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(issues) => {
                Err(ConfigError::Invalid(issues.iter().cloned().collect()))
            }
        }
    }
}

fn non_zero(field: &'static str, value: u64) -> Check {
    if value > 0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigIssue::ZeroDuration { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_success());
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let config = GameConfig::from_json_str(r#"{ "timing": { "flash_duration_ms": 400 } }"#)
            .unwrap();

        assert_eq!(config.timing.flash_duration_ms, 400);
        assert_eq!(config.timing.sequence_pause_ms, 600);
        assert_eq!(config.readiness.targets.len(), 3);
    }

    #[test]
    fn validation_accumulates_all_issues() {
        let mut config = GameConfig::default().with_targets(["a", "a"]);
        config.challenge.trigger_chance = 1.5;
        config.challenge.countdown_secs = 0;
        config.timing.flash_duration_ms = 0;

        match config.validate() {
            Validation::Failure(issues) => {
                let issues: Vec<_> = issues.iter().cloned().collect();
                assert_eq!(issues.len(), 4);
                assert!(issues.contains(&ConfigIssue::TriggerChanceOutOfRange(1.5)));
                assert!(issues.contains(&ConfigIssue::ZeroCountdown));
                assert!(issues.contains(&ConfigIssue::DuplicateTarget("a".to_string())));
                assert!(issues.contains(&ConfigIssue::ZeroDuration {
                    field: "timing.flash_duration_ms"
                }));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn empty_target_list_is_rejected() {
        let result = GameConfig::default()
            .with_targets(Vec::<String>::new())
            .validated();

        match result {
            Err(ConfigError::Invalid(issues)) => assert_eq!(issues, vec![ConfigIssue::NoTargets]),
            other => panic!("Expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn click_color_for_unlisted_target_is_rejected() {
        let mut config = GameConfig::default();
        config
            .readiness
            .click_colors
            .insert("marker9".to_string(), Color::Red);

        match config.validated() {
            Err(ConfigError::Invalid(issues)) => assert_eq!(
                issues,
                vec![ConfigIssue::UnknownClickTarget("marker9".to_string())]
            ),
            other => panic!("Expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn click_colors_load_from_json() {
        let config = GameConfig::from_json_str(
            r#"{ "readiness": { "targets": ["left"], "click_colors": { "left": "blue" } } }"#,
        )
        .unwrap();

        assert_eq!(config.readiness.click_colors.get("left"), Some(&Color::Blue));
        assert_eq!(config.challenge.gesture_cooldown_ms, 1000);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = GameConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_error_lists_every_issue() {
        let error = ConfigError::Invalid(vec![ConfigIssue::NoTargets, ConfigIssue::ZeroCountdown]);
        let message = error.to_string();
        assert!(message.contains("tracking target"));
        assert!(message.contains("countdown"));
    }
}
