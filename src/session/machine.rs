//! Session state machine.
//!
//! Owns the sequence, the player's progress and the score, decides whether
//! input is legal, and drives sequence playback through its phase timer.
//! A second slot restores the turn prompt after transient notices. Every
//! phase change clears both, so a delayed step can never land in a phase it
//! was not scheduled for.

use super::rules::InputRules;
use super::scoring;
use super::state::{FailureCause, SessionState};
use crate::config::{ScoringConfig, TimingConfig};
use crate::core::{Outbox, Phase, PhaseChange, PhaseHistory, TimerId, TimerKind, TimerSlot};
use crate::model::{Color, Gesture};
use crate::present::{DisplayCommand, StatusMessage};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// Outcome of a colour submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Not the player's turn; nothing changed
    Ignored,
    /// Correct colour, more to go
    Advanced { progress: usize },
    /// Correct colour that finished the sequence
    RoundComplete { bonus: u32, first_round: bool },
    /// Wrong colour; the session is over
    Failed(FailureCause),
}

/// Outcome of a repeat request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatOutcome {
    /// Not the player's turn; nothing changed
    Ignored,
    /// The round's repeat was already spent
    Rejected,
    /// Replay started and the penalty was deducted
    Replaying { penalty: u32 },
}

/// One game session, from waiting for the scene to game over.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    state: SessionState,
    rules: InputRules,
    timing: TimingConfig,
    scoring: ScoringConfig,
    timer: TimerSlot,
    status_timer: TimerSlot,
    history: PhaseHistory,
    failure: Option<FailureCause>,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(timing: TimingConfig, scoring: ScoringConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::new(),
            rules: InputRules::standard(),
            timing,
            scoring,
            timer: TimerSlot::new(),
            status_timer: TimerSlot::new(),
            history: PhaseHistory::new(),
            failure: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    pub fn failure(&self) -> Option<FailureCause> {
        self.failure
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    /// Begin the first round. Only legal while awaiting ready.
    pub fn start<R: Rng>(&mut self, rng: &mut R, out: &mut Outbox) -> bool {
        if self.state.phase != Phase::AwaitingReady {
            trace!(phase = %self.state.phase, "start ignored");
            return false;
        }
        info!(session = %self.id, "session starting");
        out.present(DisplayCommand::status(StatusMessage::Starting));
        out.present(DisplayCommand::SetScore(self.state.score));
        out.present(DisplayCommand::SetCombo(self.state.combo));
        self.start_round(rng, self.timing.start_delay(), out);
        true
    }

    /// Validate one colour against the sequence.
    pub fn submit_color(&mut self, color: Color, out: &mut Outbox) -> Submission {
        if !self.rules.submit.check(&self.state) {
            trace!(
                %color,
                phase = %self.state.phase,
                rule = self.rules.submit.label(),
                "submission ignored"
            );
            return Submission::Ignored;
        }

        let Some(expected) = self.state.expected_color() else {
            return Submission::Ignored;
        };

        self.state.input_locked = true;
        out.present(DisplayCommand::SetInputEnabled(false));

        if color != expected {
            let cause = FailureCause::WrongColor {
                expected,
                submitted: color,
            };
            self.fail(cause, out);
            return Submission::Failed(cause);
        }

        self.state.player_progress += 1;
        self.state.combo += 1;
        out.present(DisplayCommand::SetCombo(self.state.combo));
        let remaining = self.state.remaining();
        debug!(
            %color,
            progress = self.state.player_progress,
            remaining,
            combo = self.state.combo,
            "correct color"
        );

        if remaining > 0 {
            self.timer
                .arm(TimerKind::InputUnlock, self.timing.input_unlock(), out);
            return Submission::Advanced {
                progress: self.state.player_progress,
            };
        }

        let bonus = scoring::round_bonus(self.state.level, self.state.combo, &self.scoring);
        self.state.score = self.state.score.saturating_add(bonus);
        self.state.rounds_completed += 1;
        self.state.input_locked = false;
        self.transition(Phase::RoundComplete, out);
        out.present(DisplayCommand::SetScore(self.state.score));
        out.present(DisplayCommand::status(StatusMessage::WellDone { bonus }));
        self.timer
            .arm(TimerKind::RoundAdvance, self.timing.round_advance(), out);

        info!(
            level = self.state.level,
            bonus,
            score = self.state.score,
            "round complete"
        );
        Submission::RoundComplete {
            bonus,
            first_round: self.state.rounds_completed == 1,
        }
    }

    /// Replay the current sequence once per round, for a penalty.
    pub fn request_repeat(&mut self, out: &mut Outbox) -> RepeatOutcome {
        if !self.rules.repeat.check(&self.state) {
            trace!(
                phase = %self.state.phase,
                rule = self.rules.repeat.label(),
                "repeat ignored"
            );
            return RepeatOutcome::Ignored;
        }

        if self.state.repeat_used_this_round {
            out.present(DisplayCommand::status(StatusMessage::RepeatAlreadyUsed));
            self.status_timer
                .arm(TimerKind::StatusRestore, self.timing.status_restore(), out);
            return RepeatOutcome::Rejected;
        }

        let penalty = self.scoring.repeat_penalty;
        self.state.repeat_used_this_round = true;
        self.state.score = scoring::apply_penalty(self.state.score, penalty);
        out.present(DisplayCommand::SetScore(self.state.score));
        out.present(DisplayCommand::status(StatusMessage::Replaying { penalty }));
        info!(penalty, score = self.state.score, "replaying sequence");

        self.begin_playback(self.timing.repeat_delay(), out);
        RepeatOutcome::Replaying { penalty }
    }

    /// Handle a fired timer. Returns `false` if the id is not ours.
    pub fn on_timer<R: Rng>(&mut self, id: TimerId, rng: &mut R, out: &mut Outbox) -> bool {
        let Some(kind) = self
            .timer
            .fire(id)
            .or_else(|| self.status_timer.fire(id))
        else {
            return false;
        };

        match kind {
            TimerKind::PlaybackStep => self.play_next_step(out),
            TimerKind::PlaybackEnd => self.open_input(out),
            TimerKind::InputUnlock => {
                self.state.input_locked = false;
                if self.state.phase.accepts_input() {
                    out.present(DisplayCommand::SetInputEnabled(true));
                }
            }
            TimerKind::RoundAdvance => {
                self.state.level += 1;
                self.start_round(rng, self.timing.sequence_delay(), out);
            }
            TimerKind::StatusRestore => {
                if self.state.phase.accepts_input() {
                    out.present(DisplayCommand::status(StatusMessage::YourTurn));
                }
            }
            other => warn!(kind = ?other, "session received a timer it never starts"),
        }
        true
    }

    /// Pause normal play for a gesture challenge.
    pub(crate) fn suspend_for_challenge(&mut self, out: &mut Outbox) -> bool {
        if !self.transition(Phase::ChallengeActive, out) {
            return false;
        }
        out.present(DisplayCommand::SetInputEnabled(false));
        true
    }

    pub(crate) fn award_bonus(&mut self, points: u32, out: &mut Outbox) {
        self.state.score = self.state.score.saturating_add(points);
        out.present(DisplayCommand::SetScore(self.state.score));
    }

    /// Return from a challenge to the player's turn, sequence untouched.
    pub(crate) fn resume_after_challenge(&mut self, out: &mut Outbox) {
        if self.state.phase != Phase::ChallengeActive {
            return;
        }
        self.transition(Phase::AwaitingInput, out);
        out.present(DisplayCommand::SetInputEnabled(true));
        out.present(DisplayCommand::status(StatusMessage::YourTurn));
    }

    pub(crate) fn fail_challenge(&mut self, gesture: Gesture, out: &mut Outbox) {
        self.fail(FailureCause::ChallengeMissed { gesture }, out);
    }

    fn start_round<R: Rng>(&mut self, rng: &mut R, lead_in: Duration, out: &mut Outbox) {
        self.state.player_progress = 0;
        self.state.repeat_used_this_round = false;
        let color = self.state.sequence.extend_random(rng);
        debug!(%color, length = self.state.sequence.len(), "sequence extended");

        out.present(DisplayCommand::SetLevel(self.state.level));
        self.begin_playback(lead_in, out);
    }

    fn begin_playback(&mut self, lead_in: Duration, out: &mut Outbox) {
        self.transition(Phase::Displaying, out);
        self.state.playback_cursor = 0;
        out.present(DisplayCommand::SetInputEnabled(false));
        out.present(DisplayCommand::status(StatusMessage::Watch));
        self.timer.arm(
            TimerKind::PlaybackStep,
            lead_in + self.timing.sequence_pause(),
            out,
        );
    }

    fn play_next_step(&mut self, out: &mut Outbox) {
        let Some(color) = self.state.sequence.get(self.state.playback_cursor) else {
            self.open_input(out);
            return;
        };

        out.present(DisplayCommand::ShowSequenceStep { color });
        self.state.playback_cursor += 1;
        trace!(%color, step = self.state.playback_cursor, "flash");

        if self.state.playback_cursor < self.state.sequence.len() {
            self.timer.arm(
                TimerKind::PlaybackStep,
                self.timing.flash_duration() + self.timing.sequence_pause(),
                out,
            );
        } else {
            self.timer
                .arm(TimerKind::PlaybackEnd, self.timing.flash_duration(), out);
        }
    }

    fn open_input(&mut self, out: &mut Outbox) {
        self.transition(Phase::AwaitingInput, out);
        self.state.input_locked = false;
        out.present(DisplayCommand::SetInputEnabled(true));
        out.present(DisplayCommand::status(StatusMessage::YourTurn));
    }

    fn fail(&mut self, cause: FailureCause, out: &mut Outbox) {
        self.state.combo = 0;
        self.state.input_locked = true;
        self.failure = Some(cause);
        self.transition(Phase::GameOver, out);

        let message = match cause {
            FailureCause::WrongColor { .. } => StatusMessage::WrongColor,
            FailureCause::ChallengeMissed { .. } => StatusMessage::ChallengeMissed,
        };
        out.present(DisplayCommand::SetCombo(0));
        out.present(DisplayCommand::SetInputEnabled(false));
        out.present(DisplayCommand::status(message));
        out.present(DisplayCommand::ShowGameOver {
            level: self.state.level,
            score: self.state.score,
        });
        info!(
            ?cause,
            level = self.state.level,
            score = self.state.score,
            "game over"
        );
    }

    /// Move to `to`, clearing the phase timer. GameOver is never left.
    fn transition(&mut self, to: Phase, out: &mut Outbox) -> bool {
        let from = self.state.phase;
        if from.is_terminal() {
            return false;
        }
        self.timer.clear(out);
        self.status_timer.clear(out);
        self.state.phase = to;
        self.history.record(PhaseChange {
            from,
            to,
            level: self.state.level,
            timestamp: Utc::now(),
        });
        debug!(%from, %to, "phase change");
        true
    }
}
