//! Health, death and the one-way enrage latch.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health at or below which an agent counts as fatally wounded.
pub const DEATH_THRESHOLD: f32 = 0.0;

/// Agent health.
///
/// Damage is only accepted while health is above [`DEATH_THRESHOLD`]. The
/// hit that crosses it may leave health negative; that value is then frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthModel {
    health: f32,
    max_health: f32,
    enrage_threshold: f32,
    enraged: bool,
}

impl HealthModel {
    /// Creates a model at full health.
    #[must_use]
    pub fn new(max_health: f32, enrage_threshold: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            enrage_threshold,
            enraged: false,
        }
    }

    /// Current health. May be negative after the killing blow.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health at or below which the agent enrages.
    #[must_use]
    pub fn enrage_threshold(&self) -> f32 {
        self.enrage_threshold
    }

    /// Whether the enrage latch has fired.
    #[must_use]
    pub fn enraged(&self) -> bool {
        self.enraged
    }

    /// Health as a fraction of max (0.0-1.0).
    #[must_use]
    pub fn fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Whether health has reached the death threshold.
    #[must_use]
    pub fn is_fatally_wounded(&self) -> bool {
        self.health <= DEATH_THRESHOLD
    }

    /// Applies damage. Returns whether the damage was accepted.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !amount.is_finite() || amount < 0.0 {
            warn!("Ignoring invalid damage amount {amount}");
            return false;
        }
        if self.is_fatally_wounded() {
            return false;
        }
        self.health -= amount;
        true
    }

    /// Latches the enrage flag the first time health is observed at or
    /// below the threshold. Returns `true` only on that first observation.
    pub fn check_enrage(&mut self) -> bool {
        if self.health <= self.enrage_threshold && !self.enraged {
            self.enraged = true;
            return true;
        }
        false
    }
}

/// Passive health bar view model.
///
/// Initialized with `max_value = max_health` and refreshed by the host once
/// per tick; it never feeds back into the agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBar {
    max_value: f32,
    value: f32,
}

impl HealthBar {
    /// Creates a bar mirroring the given model.
    #[must_use]
    pub fn new(model: &HealthModel) -> Self {
        Self {
            max_value: model.max_health(),
            value: model.health(),
        }
    }

    /// Copies the model's current health into the bar.
    pub fn sync(&mut self, model: &HealthModel) {
        self.value = model.health();
    }

    /// Displayed value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Slider maximum.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Fill fraction clamped to the slider range.
    #[must_use]
    pub fn fill(&self) -> f32 {
        (self.value / self.max_value).clamp(0.0, 1.0)
    }
}
