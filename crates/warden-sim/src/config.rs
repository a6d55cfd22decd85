//! Arena configuration.
//!
//! Describes the guardians, the scripted player and how long to simulate.
//! Configuration can be loaded from and saved to a TOML file.

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use warden_ai::AgentConfig;

/// Configuration file name.
pub const CONFIG_FILE: &str = "warden.toml";

/// Scripted player parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position
    pub start: Vec3,
    /// Waypoints walked in a loop (empty = stand still)
    pub path: Vec<Vec3>,
    /// Movement speed when not stunned
    pub speed: f32,
    /// Starting health
    pub health: f32,
    /// Damage dealt per player attack (0 = never attacks)
    pub attack_damage: f32,
    /// Seconds between player attacks
    pub attack_interval: f32,
    /// Distance at which the player can hit a guardian
    pub attack_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vec3::new(20.0, 0.0, 20.0),
            path: vec![Vec3::new(20.0, 0.0, 20.0), Vec3::new(4.0, 0.0, 4.0)],
            speed: 4.0,
            health: 100.0,
            attack_damage: 25.0,
            attack_interval: 1.2,
            attack_radius: 2.5,
        }
    }
}

/// Arena configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Timing ===
    /// Fixed simulation ticks per second
    pub tick_rate: u32,
    /// Length of one simulated frame in seconds
    pub frame_dt: f32,
    /// Simulated seconds before the run stops
    pub duration: f32,

    // === Guardians ===
    /// Number of guardians to spawn
    pub guardians: u32,
    /// Patrol checkpoints shared by every guardian
    pub checkpoints: Vec<Vec3>,

    // === Perception ===
    /// Distance at which a guardian notices the player
    pub sight_radius: f32,
    /// Distance at which a guardian can hit the player
    pub reach: f32,
    /// Distance at which a navigation destination counts as reached
    pub stopping_distance: f32,

    // === Tables ===
    /// Guardian tuning
    pub agent: AgentConfig,
    /// Scripted player
    pub player: PlayerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_rate: 30,
            frame_dt: 1.0 / 30.0,
            duration: 120.0,

            // Guardians
            guardians: 1,
            checkpoints: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(8.0, 0.0, 0.0),
                Vec3::new(8.0, 0.0, 8.0),
                Vec3::new(0.0, 0.0, 8.0),
            ],

            // Perception
            sight_radius: 10.0,
            reach: 2.0,
            stopping_distance: 0.5,

            // Tables
            agent: AgentConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reads the arena configuration at `path`.
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error, so a typo never silently runs the default arena.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Invalid arena config in {}", path.display()))?;
        info!("Arena config read from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as TOML, creating missing directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to encode arena config")?;
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Arena config written to {}", path.display());
        Ok(())
    }

    /// Validate and clamp host values to sensible ranges.
    ///
    /// Guardian tuning is left alone; agents reject bad values themselves.
    pub fn validate(&mut self) {
        // Timing
        self.tick_rate = self.tick_rate.clamp(1, 240);
        self.frame_dt = finite_or(self.frame_dt, 1.0 / 30.0).clamp(0.001, 0.25);
        self.duration = finite_or(self.duration, 120.0).clamp(0.0, 3600.0);

        // Guardians
        self.guardians = self.guardians.min(64);

        // Perception
        self.sight_radius = finite_or(self.sight_radius, 10.0).max(0.0);
        self.reach = finite_or(self.reach, 2.0).clamp(0.0, self.sight_radius);
        self.stopping_distance = finite_or(self.stopping_distance, 0.5).max(0.0);

        // Player
        let player = &mut self.player;
        player.speed = finite_or(player.speed, 4.0).max(0.0);
        player.health = finite_or(player.health, 100.0).max(1.0);
        player.attack_damage = finite_or(player.attack_damage, 0.0).max(0.0);
        player.attack_interval = finite_or(player.attack_interval, 1.0).max(0.1);
        player.attack_radius = finite_or(player.attack_radius, 2.5).max(0.0);
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.guardians, 1);
        assert_eq!(config.checkpoints.len(), 4);
        assert_eq!(config.agent.max_health, 300.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = SimConfig::default();

        config.tick_rate = 0;
        config.frame_dt = f32::NAN;
        config.reach = 50.0;
        config.player.attack_interval = 0.0;

        config.validate();

        assert_eq!(config.tick_rate, 1);
        assert!((config.frame_dt - 1.0 / 30.0).abs() < 1e-6);
        assert_eq!(config.reach, config.sight_radius);
        assert!((config.player.attack_interval - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("warden.toml");

        let mut config = SimConfig::default();
        config.guardians = 3;
        config.checkpoints = vec![Vec3::new(1.0, 2.0, 3.0)];
        config.agent.damage = 42.0;

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = SimConfig::load_from(&config_path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = SimConfig::load_from("/nonexistent/path/warden.toml")
            .expect("missing file should fall back to defaults");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_config_load_invalid_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "tick_rate = \"fast\"").expect("Failed to write config");

        let error = SimConfig::load_from(&config_path).expect_err("bad config should fail");
        assert!(error.to_string().contains("Invalid arena config"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SimConfig = toml::from_str(
            r#"
            guardians = 2

            [agent]
            max_health = 120.0

            [player]
            attack_damage = 0.0
            "#,
        )
        .expect("Failed to parse");

        assert_eq!(config.guardians, 2);
        assert_eq!(config.agent.max_health, 120.0);
        assert_eq!(config.agent.enrage_threshold, 180.0);
        assert_eq!(config.player.attack_damage, 0.0);
        assert_eq!(config.player.health, 100.0);
    }
}
