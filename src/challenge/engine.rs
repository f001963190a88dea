//! Challenge engine.
//!
//! Once armed by the first completed round, the engine checks periodically
//! whether to interrupt the player's turn with a gesture challenge. A
//! challenge counts down once a second; the matching gesture earns a
//! bonus and resumes play, running out of time ends the game.
//!
//! The engine owns three timer slots (schedule, countdown, grace). Each is
//! cleared the moment its purpose ends, and a tick that still arrives after
//! resolution finds no challenge and does nothing.

use super::challenge::Challenge;
use crate::config::ChallengeConfig;
use crate::core::{Guard, Outbox, TimerId, TimerKind, TimerSlot};
use crate::model::{challenge_vocabulary, Gesture};
use crate::present::{DisplayCommand, StatusMessage};
use crate::session::rules::players_turn;
use crate::session::{scoring, Session, SessionState};
use rand::Rng;
use tracing::{debug, info, trace, warn};

/// Lifecycle of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    /// Waiting for the first completed round
    Dormant,
    /// First check scheduled
    Arming,
    /// Periodic checks running
    Running,
    /// Feature off for the rest of the game
    Disabled,
    /// Session ended; nothing left to do
    Halted,
}

/// What a classified gesture did to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No challenge was waiting for an answer
    Ignored,
    /// A challenge is active but wants a different gesture
    WrongGesture,
    /// The challenge was answered in time
    Solved { bonus: u32 },
}

#[derive(Debug)]
pub struct ChallengeEngine {
    config: ChallengeConfig,
    status: EngineStatus,
    vocabulary: Vec<Gesture>,
    window: Guard<SessionState>,
    challenge: Option<Challenge>,
    schedule: TimerSlot,
    countdown: TimerSlot,
    grace: TimerSlot,
}

impl ChallengeEngine {
    pub fn new(config: ChallengeConfig) -> Self {
        let status = if config.enabled {
            EngineStatus::Dormant
        } else {
            EngineStatus::Disabled
        };
        Self {
            config,
            status,
            vocabulary: challenge_vocabulary(),
            window: players_turn(),
            challenge: None,
            schedule: TimerSlot::new(),
            countdown: TimerSlot::new(),
            grace: TimerSlot::new(),
        }
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// A challenge is pending an answer or its success grace is running.
    pub fn is_busy(&self) -> bool {
        self.challenge.is_some() || self.grace.is_armed()
    }

    /// Schedule the first check. Takes effect only once per game.
    pub fn arm(&mut self, out: &mut Outbox) -> bool {
        if self.status != EngineStatus::Dormant {
            return false;
        }
        self.status = EngineStatus::Arming;
        self.schedule
            .arm(TimerKind::ChallengeArm, self.config.arm_delay(), out);
        debug!(delay_ms = self.config.arm_delay_ms, "challenge engine armed");
        true
    }

    /// Handle a fired timer. Returns `false` if the id is not ours.
    pub fn on_timer<R: Rng>(
        &mut self,
        id: TimerId,
        session: &mut Session,
        rng: &mut R,
        out: &mut Outbox,
    ) -> bool {
        if let Some(kind) = self.schedule.fire(id) {
            match kind {
                TimerKind::ChallengeArm => {
                    self.status = EngineStatus::Running;
                    self.schedule_check(out);
                }
                TimerKind::ChallengeCheck => self.check(session, rng, out),
                other => warn!(kind = ?other, "unexpected timer in challenge schedule"),
            }
            return true;
        }

        if self.countdown.fire(id).is_some() {
            self.tick(session, out);
            return true;
        }

        if self.grace.fire(id).is_some() {
            session.resume_after_challenge(out);
            return true;
        }

        false
    }

    /// Offer a classified gesture to the active challenge.
    pub fn on_gesture(
        &mut self,
        gesture: Gesture,
        session: &mut Session,
        out: &mut Outbox,
    ) -> GestureOutcome {
        let Some(challenge) = self.challenge else {
            trace!(%gesture, "no challenge waiting");
            return GestureOutcome::Ignored;
        };

        if !challenge.answered_by(gesture) {
            debug!(%gesture, expected = %challenge.gesture, "wrong challenge gesture");
            return GestureOutcome::WrongGesture;
        }

        self.countdown.clear(out);
        self.challenge = None;

        let bonus = scoring::challenge_bonus(challenge.seconds_left, &self.config);
        session.award_bonus(bonus, out);
        out.present(DisplayCommand::HideChallenge);
        out.present(DisplayCommand::status(StatusMessage::ChallengeSucceeded {
            bonus,
        }));
        self.grace
            .arm(TimerKind::ChallengeGrace, self.config.grace(), out);

        info!(
            %gesture,
            seconds_left = challenge.seconds_left,
            bonus,
            "challenge solved"
        );
        GestureOutcome::Solved { bonus }
    }

    /// Permanently switch the feature off, e.g. when the classifier is gone.
    ///
    /// An in-flight challenge is withdrawn without bonus or penalty.
    pub fn disable(&mut self, session: &mut Session, out: &mut Outbox) {
        if self.status == EngineStatus::Disabled {
            return;
        }
        let was_busy = self.is_busy();
        if self.challenge.take().is_some() {
            out.present(DisplayCommand::HideChallenge);
        }
        self.clear_timers(out);
        self.status = EngineStatus::Disabled;

        if was_busy {
            session.resume_after_challenge(out);
        }
        warn!("gesture challenges disabled");
    }

    /// Stop everything because the session ended.
    pub fn halt(&mut self, out: &mut Outbox) {
        self.challenge = None;
        self.clear_timers(out);
        if self.status != EngineStatus::Disabled {
            self.status = EngineStatus::Halted;
        }
    }

    fn clear_timers(&mut self, out: &mut Outbox) {
        self.schedule.clear(out);
        self.countdown.clear(out);
        self.grace.clear(out);
    }

    fn schedule_check(&mut self, out: &mut Outbox) {
        self.schedule
            .arm(TimerKind::ChallengeCheck, self.config.check_interval(), out);
    }

    fn check<R: Rng>(&mut self, session: &mut Session, rng: &mut R, out: &mut Outbox) {
        if self.status != EngineStatus::Running || session.is_over() {
            return;
        }
        self.schedule_check(out);

        if self.is_busy() || !self.window.check(session.state()) {
            trace!(phase = %session.phase(), "challenge check skipped");
            return;
        }

        if rng.random_bool(self.config.trigger_chance) {
            self.trigger(session, rng, out);
        }
    }

    fn trigger<R: Rng>(&mut self, session: &mut Session, rng: &mut R, out: &mut Outbox) {
        if self.vocabulary.is_empty() {
            return;
        }
        let gesture = self.vocabulary[rng.random_range(0..self.vocabulary.len())];

        if !session.suspend_for_challenge(out) {
            return;
        }

        let challenge = Challenge::new(
            gesture,
            self.config.countdown_secs,
            session.state().sequence.len(),
        );
        self.challenge = Some(challenge);
        out.present(DisplayCommand::ShowChallenge {
            gesture,
            seconds_left: challenge.seconds_left,
        });
        self.countdown
            .arm(TimerKind::ChallengeTick, self.config.tick(), out);

        info!(%gesture, seconds = challenge.seconds_left, "challenge started");
    }

    fn tick(&mut self, session: &mut Session, out: &mut Outbox) {
        let Some(challenge) = self.challenge.as_mut() else {
            return;
        };

        let expired = challenge.tick();
        let (gesture, seconds_left) = (challenge.gesture, challenge.seconds_left);
        out.present(DisplayCommand::UpdateChallengeCountdown(seconds_left));

        if !expired {
            self.countdown
                .arm(TimerKind::ChallengeTick, self.config.tick(), out);
            return;
        }

        self.challenge = None;
        out.present(DisplayCommand::HideChallenge);
        info!(%gesture, "challenge missed");
        session.fail_challenge(gesture, out);
        self.halt(out);
    }
}
