//! The game: readiness gate, session and challenge engine behind one
//! event entry point.
//!
//! [`Game::handle`] is the only way state changes. Drivers feed it events
//! one at a time and execute the directives it returns, which gives the
//! single logical thread of control the session relies on.

use crate::challenge::{ChallengeEngine, EngineStatus};
use crate::config::GameConfig;
use crate::core::{Directive, Outbox, Phase, PhaseHistory, TimerId};
use crate::error::GameError;
use crate::model::{Color, Gesture, GestureRole};
use crate::present::{DisplayCommand, StatusMessage};
use crate::readiness::{GateOutcome, ReadinessGate};
use crate::session::{FailureCause, Session, Submission};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info_span, trace, warn, Span};
use uuid::Uuid;

/// Everything that can happen to a game from the outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A tracking target was found or lost
    TargetReported { target: String, visible: bool },
    /// A colour button was pressed
    SubmitColor(Color),
    /// The click sphere on a tracking target was pressed
    TargetClicked { target: String },
    /// The repeat control was pressed
    RequestRepeat,
    /// The classifier recognised a gesture
    Gesture(Gesture),
    /// The classifier failed to start or died
    ClassifierUnavailable { reason: String },
    /// A timer started by a directive elapsed
    TimerFired(TimerId),
}

/// Final (or current) standing of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub session_id: Uuid,
    pub level: u32,
    pub score: u32,
    pub combo: u32,
    pub sequence_length: usize,
    pub rounds_completed: u32,
    pub phase: Phase,
    pub failure: Option<FailureCause>,
    pub started_at: DateTime<Utc>,
    pub history: PhaseHistory,
}

pub struct Game<R: Rng = StdRng> {
    gate: ReadinessGate,
    session: Session,
    engine: ChallengeEngine,
    rng: R,
    out: Outbox,
    span: Span,
}

impl Game<StdRng> {
    /// A game with an entropy-seeded random source.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// A reproducible game.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        let config = config.validated()?;
        let session = Session::new(config.timing.clone(), config.scoring.clone());
        let span = info_span!("game", session = %session.id());

        let mut out = Outbox::new();
        out.present(DisplayCommand::SetLevel(session.state().level));
        out.present(DisplayCommand::SetScore(session.state().score));
        out.present(DisplayCommand::SetCombo(session.state().combo));
        out.present(DisplayCommand::SetInputEnabled(false));
        out.present(DisplayCommand::status(StatusMessage::AimAtTargets));

        Ok(Self {
            gate: ReadinessGate::new(config.readiness.targets.iter().cloned())
                .with_click_colors(config.readiness.click_colors.clone()),
            session,
            engine: ChallengeEngine::new(config.challenge.clone()),
            rng,
            out,
            span,
        })
    }

    /// Apply one event and return the directives it produced.
    pub fn handle(&mut self, event: GameEvent) -> Vec<Directive> {
        let span = self.span.clone();
        let _entered = span.enter();

        match event {
            GameEvent::TargetReported { target, visible } => {
                if self.gate.report(&target, visible) == GateOutcome::Ready {
                    self.session.start(&mut self.rng, &mut self.out);
                }
            }
            GameEvent::SubmitColor(color) => self.submit(color),
            GameEvent::TargetClicked { target } => {
                if let Some(color) = self.gate.click(&target) {
                    self.submit(color);
                }
            }
            GameEvent::RequestRepeat => {
                self.session.request_repeat(&mut self.out);
            }
            GameEvent::Gesture(gesture) => self.route_gesture(gesture),
            GameEvent::ClassifierUnavailable { reason } => {
                warn!(%reason, "gesture classifier unavailable");
                self.engine.disable(&mut self.session, &mut self.out);
            }
            GameEvent::TimerFired(id) => {
                let consumed = self.session.on_timer(id, &mut self.rng, &mut self.out)
                    || self
                        .engine
                        .on_timer(id, &mut self.session, &mut self.rng, &mut self.out);
                if !consumed {
                    trace!(%id, "stale timer ignored");
                }
            }
        }

        if self.session.is_over() && self.engine.status() != EngineStatus::Halted {
            self.engine.halt(&mut self.out);
        }

        self.out.drain()
    }

    /// Directives queued outside of `handle`, e.g. the initial display.
    pub fn take_directives(&mut self) -> Vec<Directive> {
        self.out.drain()
    }

    fn submit(&mut self, color: Color) {
        let outcome = self.session.submit_color(color, &mut self.out);
        if let Submission::RoundComplete {
            first_round: true, ..
        } = outcome
        {
            self.engine.arm(&mut self.out);
        }
    }

    fn route_gesture(&mut self, gesture: Gesture) {
        match gesture.role() {
            GestureRole::Repeat => {
                if self.engine.is_busy() {
                    trace!(%gesture, "repeat gesture ignored during challenge");
                    return;
                }
                self.session.request_repeat(&mut self.out);
            }
            GestureRole::Challenge => {
                self.engine
                    .on_gesture(gesture, &mut self.session, &mut self.out);
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn engine(&self) -> &ChallengeEngine {
        &self.engine
    }

    pub fn gate(&self) -> &ReadinessGate {
        &self.gate
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn summary(&self) -> GameSummary {
        let state = self.session.state();
        GameSummary {
            session_id: self.session.id(),
            level: state.level,
            score: state.score,
            combo: state.combo,
            sequence_length: state.sequence.len(),
            rounds_completed: state.rounds_completed,
            phase: state.phase,
            failure: self.session.failure(),
            started_at: self.session.created_at(),
            history: self.session.history().clone(),
        }
    }
}
