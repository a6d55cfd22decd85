//! Agent tuning parameters.
//!
//! All values can be deserialized from TOML; missing fields fall back to the
//! defaults of the tomb guardian the engine was built for.

use serde::{Deserialize, Serialize};
use warden_common::{ConfigError, ConfigResult};

/// Durations (seconds) of the timed attack sequences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTimings {
    // === Normal attack ===
    /// Delay between the swing starting and the hit landing
    pub normal_windup: f32,
    /// Delay between the hit and the attack animation ending
    pub normal_recovery: f32,
    /// Delay before the agent may move and attack again
    pub normal_cooldown: f32,

    // === Enraged attack ===
    /// Delay between the slam starting and the hit landing
    pub enraged_windup: f32,
    /// How long the target stays stunned
    pub stun_duration: f32,
    /// Delay between the stun ending and the attack animation ending
    pub enraged_release: f32,
    /// Delay before the agent may move and attack again
    pub enraged_cooldown: f32,
}

impl Default for CombatTimings {
    fn default() -> Self {
        Self {
            normal_windup: 0.3,
            normal_recovery: 0.8,
            normal_cooldown: 2.0,

            enraged_windup: 1.5,
            stun_duration: 1.5,
            enraged_release: 0.4,
            enraged_cooldown: 1.5,
        }
    }
}

impl CombatTimings {
    /// Total length of a normal attack sequence.
    #[must_use]
    pub fn normal_total(&self) -> f32 {
        self.normal_windup + self.normal_recovery + self.normal_cooldown
    }

    /// Total length of an enraged attack sequence.
    #[must_use]
    pub fn enraged_total(&self) -> f32 {
        self.enraged_windup + self.stun_duration + self.enraged_release + self.enraged_cooldown
    }

    fn validate(&self) -> ConfigResult<()> {
        let fields = [
            ("combat.normal_windup", self.normal_windup),
            ("combat.normal_recovery", self.normal_recovery),
            ("combat.normal_cooldown", self.normal_cooldown),
            ("combat.enraged_windup", self.enraged_windup),
            ("combat.stun_duration", self.stun_duration),
            ("combat.enraged_release", self.enraged_release),
            ("combat.enraged_cooldown", self.enraged_cooldown),
        ];
        for (field, value) in fields {
            non_negative(field, value)?;
        }
        Ok(())
    }
}

/// Per-agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    // === Health ===
    /// Health the agent spawns with
    pub max_health: f32,
    /// Health at or below which the agent enrages (once)
    pub enrage_threshold: f32,

    // === Combat ===
    /// Damage dealt by every attack
    pub damage: f32,
    /// Attack sequence timings
    pub combat: CombatTimings,

    // === Movement ===
    /// Movement speed restored whenever the agent walks
    pub base_speed: f32,

    // === Behavior timings (seconds) ===
    /// How long the agent stands still between patrol legs
    pub idle_time: f32,
    /// Length of the enrage transformation
    pub enrage_duration: f32,
    /// Time between the death trigger and removal from the world
    pub death_delay: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_health: 300.0,
            enrage_threshold: 180.0,

            damage: 10.0,
            combat: CombatTimings::default(),

            base_speed: 3.5,

            idle_time: 2.0,
            enrage_duration: 3.5,
            death_delay: 4.0,
        }
    }
}

impl AgentConfig {
    /// Set max health.
    #[must_use]
    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Set enrage threshold.
    #[must_use]
    pub fn with_enrage_threshold(mut self, threshold: f32) -> Self {
        self.enrage_threshold = threshold;
        self
    }

    /// Set attack damage.
    #[must_use]
    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    /// Set base movement speed.
    #[must_use]
    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.base_speed = speed;
        self
    }

    /// Set idle time between patrol legs.
    #[must_use]
    pub fn with_idle_time(mut self, seconds: f32) -> Self {
        self.idle_time = seconds;
        self
    }

    /// Checks that every value is usable by the state machine.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(ConfigError::invalid(
                "max_health",
                self.max_health,
                "must be a positive number",
            ));
        }
        non_negative("enrage_threshold", self.enrage_threshold)?;
        non_negative("damage", self.damage)?;
        non_negative("base_speed", self.base_speed)?;
        non_negative("idle_time", self.idle_time)?;
        non_negative("enrage_duration", self.enrage_duration)?;
        non_negative("death_delay", self.death_delay)?;
        self.combat.validate()
    }
}

fn non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, value, "must be a non-negative number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.max_health, 300.0);
        assert_eq!(config.enrage_threshold, 180.0);
        assert_eq!(config.death_delay, 4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_combat_totals() {
        let timings = CombatTimings::default();
        assert!((timings.normal_total() - 3.1).abs() < 1e-5);
        assert!((timings.enraged_total() - 4.9).abs() < 1e-5);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = AgentConfig::default().with_max_health(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "max_health",
                ..
            })
        ));

        let mut config = AgentConfig::default();
        config.combat.stun_duration = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "combat.stun_duration",
                ..
            })
        ));

        let config = AgentConfig::default().with_idle_time(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AgentConfig = toml::from_str(
            r#"
            max_health = 500.0
            damage = 25.0

            [combat]
            stun_duration = 2.0
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.max_health, 500.0);
        assert_eq!(config.damage, 25.0);
        assert_eq!(config.enrage_threshold, 180.0);
        assert_eq!(config.combat.stun_duration, 2.0);
        assert_eq!(config.combat.normal_windup, 0.3);
    }
}
