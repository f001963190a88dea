//! Tokio driver.
//!
//! [`GameLoop`] owns the game and a presentation sink. External input
//! arrives through cloneable [`GameHandle`]s; timers are spawned sleeps that
//! post their id back into the loop. Both feed the same `select!`, so the
//! game only ever sees one event at a time.

use crate::core::{Directive, TimerId};
use crate::error::GameError;
use crate::game::{Game, GameEvent, GameSummary};
use crate::model::{Color, Gesture, GestureDebouncer};
use crate::present::PresentationSink;
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Sends input events into a running [`GameLoop`].
#[derive(Clone, Debug)]
pub struct GameHandle {
    events: mpsc::UnboundedSender<GameEvent>,
}

impl GameHandle {
    pub fn send(&self, event: GameEvent) -> Result<(), GameError> {
        self.events.send(event).map_err(|_| GameError::LoopClosed)
    }

    pub fn report_target(&self, target: impl Into<String>, visible: bool) -> Result<(), GameError> {
        self.send(GameEvent::TargetReported {
            target: target.into(),
            visible,
        })
    }

    pub fn submit_color(&self, color: Color) -> Result<(), GameError> {
        self.send(GameEvent::SubmitColor(color))
    }

    pub fn click_target(&self, target: impl Into<String>) -> Result<(), GameError> {
        self.send(GameEvent::TargetClicked {
            target: target.into(),
        })
    }

    pub fn request_repeat(&self) -> Result<(), GameError> {
        self.send(GameEvent::RequestRepeat)
    }

    pub fn gesture(&self, gesture: Gesture) -> Result<(), GameError> {
        self.send(GameEvent::Gesture(gesture))
    }

    pub fn classifier_unavailable(&self, reason: impl Into<String>) -> Result<(), GameError> {
        self.send(GameEvent::ClassifierUnavailable {
            reason: reason.into(),
        })
    }

    /// A debounced adapter for a raw classifier label stream.
    pub fn gesture_feed(&self, cooldown: Duration) -> GestureFeed {
        GestureFeed {
            handle: self.clone(),
            debouncer: GestureDebouncer::new(cooldown),
        }
    }
}

/// Turns raw classifier output into debounced gesture events.
///
/// Labels outside the gesture vocabulary and repeats inside the cooldown
/// are dropped without reaching the game.
#[derive(Debug)]
pub struct GestureFeed {
    handle: GameHandle,
    debouncer: GestureDebouncer,
}

impl GestureFeed {
    /// Offer one classification. `None` means nothing was recognised.
    pub fn observe(&mut self, label: Option<&str>) -> Result<Option<Gesture>, GameError> {
        self.observe_at(label, Instant::now())
    }

    pub fn observe_at(
        &mut self,
        label: Option<&str>,
        now: Instant,
    ) -> Result<Option<Gesture>, GameError> {
        let Some(gesture) = label.and_then(Gesture::from_label) else {
            return Ok(None);
        };
        match self.debouncer.observe(gesture, now) {
            Some(gesture) => {
                self.handle.gesture(gesture)?;
                Ok(Some(gesture))
            }
            None => Ok(None),
        }
    }

    pub fn classifier_unavailable(&self, reason: impl Into<String>) -> Result<(), GameError> {
        self.handle.classifier_unavailable(reason)
    }
}

pub struct GameLoop<R: Rng, S: PresentationSink> {
    game: Game<R>,
    sink: S,
    events: mpsc::UnboundedReceiver<GameEvent>,
    fired_tx: mpsc::UnboundedSender<TimerId>,
    fired_rx: mpsc::UnboundedReceiver<TimerId>,
    timers: HashMap<TimerId, JoinHandle<()>>,
}

impl<R, S> GameLoop<R, S>
where
    R: Rng,
    S: PresentationSink,
{
    pub fn new(game: Game<R>, sink: S) -> (Self, GameHandle) {
        let (events_tx, events) = mpsc::unbounded_channel();
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let game_loop = Self {
            game,
            sink,
            events,
            fired_tx,
            fired_rx,
            timers: HashMap::new(),
        };
        (game_loop, GameHandle { events: events_tx })
    }

    /// Run until the game ends.
    ///
    /// Returns the final summary, or [`GameError::Abandoned`] if every
    /// handle is dropped first.
    pub async fn run(mut self) -> Result<GameSummary, GameError> {
        let initial = self.game.take_directives();
        self.apply(initial);

        loop {
            let event = tokio::select! {
                Some(id) = self.fired_rx.recv() => {
                    self.timers.remove(&id);
                    GameEvent::TimerFired(id)
                }
                event = self.events.recv() => match event {
                    Some(event) => event,
                    None => {
                        self.cancel_all();
                        let state = self.game.session().state();
                        warn!(level = state.level, score = state.score, "all input handles dropped");
                        return Err(GameError::Abandoned {
                            level: state.level,
                            score: state.score,
                        });
                    }
                },
            };

            let directives = self.game.handle(event);
            self.apply(directives);

            if self.game.is_over() {
                self.cancel_all();
                let summary = self.game.summary();
                info!(
                    level = summary.level,
                    score = summary.score,
                    rounds = summary.rounds_completed,
                    "game loop finished"
                );
                return Ok(summary);
            }
        }
    }

    fn apply(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::Present(command) => {
                    if let Err(error) = self.sink.present(&command) {
                        warn!(%error, ?command, "presentation sink rejected command");
                    }
                }
                Directive::StartTimer { handle, after } => {
                    let fired = self.fired_tx.clone();
                    let id = handle.id;
                    let task = tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = fired.send(id);
                    });
                    if let Some(previous) = self.timers.insert(id, task) {
                        previous.abort();
                    }
                }
                Directive::CancelTimer(id) => {
                    if let Some(task) = self.timers.remove(&id) {
                        task.abort();
                        debug!(%id, "timer cancelled");
                    }
                }
            }
        }
    }

    fn cancel_all(&mut self) {
        for (_, task) in self.timers.drain() {
            task.abort();
        }
    }
}

impl<R: Rng, S: PresentationSink> Drop for GameLoop<R, S> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
