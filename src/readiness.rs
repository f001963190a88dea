//! Marker readiness gate.
//!
//! Aggregates the visibility of every tracking target into a one-shot latch.
//! The first time all targets are visible together the gate reports
//! [`GateOutcome::Ready`]; after that it stays latched no matter how the
//! targets flicker.
//!
//! Visibility keeps being tracked after the latch: a target's click sphere
//! only submits its colour while the target is in view.

use crate::model::Color;
use std::collections::BTreeMap;
use tracing::{debug, info, trace, warn};

/// Result of a single visibility report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Not every target is visible yet
    Pending,
    /// This report completed the set; start the game
    Ready,
    /// The gate fired earlier; the report changes nothing that matters
    Latched,
    /// The report named a target the gate does not track
    UnknownTarget,
}

/// One-shot "all targets acquired" latch.
///
/// ```rust
/// use recall::readiness::{GateOutcome, ReadinessGate};
///
/// let mut gate = ReadinessGate::new(["left", "right"]);
/// assert_eq!(gate.report("left", true), GateOutcome::Pending);
/// assert_eq!(gate.report("right", true), GateOutcome::Ready);
/// assert_eq!(gate.report("left", false), GateOutcome::Latched);
/// assert_eq!(gate.report("left", true), GateOutcome::Latched);
/// ```
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    visible: BTreeMap<String, bool>,
    click_colors: BTreeMap<String, Color>,
    latched: bool,
}

impl ReadinessGate {
    pub fn new<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            visible: targets
                .into_iter()
                .map(|target| (target.into(), false))
                .collect(),
            click_colors: BTreeMap::new(),
            latched: false,
        }
    }

    /// Attach the colour each target's click sphere submits.
    pub fn with_click_colors<I, T>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (T, Color)>,
        T: Into<String>,
    {
        self.click_colors = colors
            .into_iter()
            .map(|(target, color)| (target.into(), color))
            .collect();
        self
    }

    /// Update one target's visibility.
    pub fn report(&mut self, target_id: &str, visible: bool) -> GateOutcome {
        let Some(entry) = self.visible.get_mut(target_id) else {
            warn!(target_id, "visibility report for unknown tracking target");
            return GateOutcome::UnknownTarget;
        };
        *entry = visible;
        debug!(target_id, visible, "tracking target report");

        if self.latched {
            return GateOutcome::Latched;
        }
        if self.all_visible() {
            self.latched = true;
            info!(targets = self.visible.len(), "all tracking targets acquired");
            return GateOutcome::Ready;
        }
        GateOutcome::Pending
    }

    /// Every tracked target is currently visible.
    pub fn all_visible(&self) -> bool {
        !self.visible.is_empty() && self.visible.values().all(|visible| *visible)
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn is_visible(&self, target_id: &str) -> Option<bool> {
        self.visible.get(target_id).copied()
    }

    /// Colour behind a click on `target_id`, if its target is in view.
    ///
    /// ```rust
    /// use recall::model::Color;
    /// use recall::readiness::ReadinessGate;
    ///
    /// let mut gate = ReadinessGate::new(["left"]).with_click_colors([("left", Color::Red)]);
    /// assert_eq!(gate.click("left"), None);
    /// gate.report("left", true);
    /// assert_eq!(gate.click("left"), Some(Color::Red));
    /// ```
    pub fn click(&self, target_id: &str) -> Option<Color> {
        let Some(color) = self.click_colors.get(target_id).copied() else {
            trace!(target_id, "click on target without a colour");
            return None;
        };
        if self.is_visible(target_id) != Some(true) {
            trace!(target_id, %color, "click on hidden target dropped");
            return None;
        }
        Some(color)
    }
}
