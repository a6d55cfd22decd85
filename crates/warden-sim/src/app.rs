//! Arena host loop.
//!
//! Owns the guardian roster and the world, feeds perception into the agents,
//! lets the scripted player fight back and steps everything on a fixed
//! timestep until the arena is cleared or time runs out.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};
use warden_ai::{Agent, AgentEvent, AgentRoster, HealthBar, TargetDirectory};
use warden_common::{distance, EntityId, Vec3};

use crate::animation::LoggingAnimator;
use crate::config::SimConfig;
use crate::navigation::StraightLineNavigator;
use crate::sensor::ProximitySensor;
use crate::timing::FrameTiming;
use crate::world::ArenaWorld;

type GuardianRoster = AgentRoster<StraightLineNavigator, LoggingAnimator>;

/// Outcome of an arena run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSummary {
    /// Simulated seconds
    pub elapsed: f32,
    /// Fixed updates performed
    pub ticks: u64,
    /// Guardians spawned at the start
    pub guardians_spawned: u32,
    /// Guardians that died and were removed
    pub guardians_defeated: u32,
    /// Guardians still in the arena
    pub guardians_remaining: usize,
    /// Health shown on the remaining guardians' bars
    pub guardian_health: Vec<f32>,
    /// Player health at the end
    pub player_health: f32,
    /// Whether the player survived
    pub player_alive: bool,
    /// How often the player was stunned
    pub stuns: u32,
    /// Agent events observed
    pub events: usize,
}

/// The running arena.
pub struct Arena {
    config: SimConfig,
    roster: GuardianRoster,
    world: ArenaWorld,
    sensors: HashMap<EntityId, ProximitySensor>,
    health_bars: HashMap<EntityId, HealthBar>,
    timing: FrameTiming,
    elapsed: f32,
    player_cooldown: f32,
    events_seen: usize,
}

impl Arena {
    /// Spawns the guardians and the player.
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut roster = GuardianRoster::new();
        let mut sensors = HashMap::new();
        let mut health_bars = HashMap::new();

        for index in 0..config.guardians as usize {
            let start = config
                .checkpoints
                .get(index % config.checkpoints.len().max(1))
                .copied()
                .unwrap_or(Vec3::ZERO);
            let id = EntityId::new();
            let agent = Agent::new(
                id,
                config.agent.clone(),
                config.checkpoints.clone(),
                StraightLineNavigator::new(start, config.stopping_distance),
                LoggingAnimator::new(id),
            )
            .with_context(|| format!("Failed to spawn guardian {index}"))?;

            health_bars.insert(id, HealthBar::new(agent.health_model()));
            sensors.insert(id, ProximitySensor::new(config.sight_radius, config.reach));
            roster.register(agent)?;
        }

        let world = ArenaWorld::new(&config.player);
        let timing = FrameTiming::new(config.tick_rate);
        info!(
            "Arena ready: {} guardian(s), player {} at {}",
            roster.len(),
            world.player.id(),
            world.player.position()
        );

        Ok(Self {
            config,
            roster,
            world,
            sensors,
            health_bars,
            timing,
            elapsed: 0.0,
            player_cooldown: 0.0,
            events_seen: 0,
        })
    }

    /// Runs frames until the arena is decided or the duration is reached.
    pub fn run(&mut self) -> SimSummary {
        let frame_dt = self.config.frame_dt;
        while self.elapsed < self.config.duration {
            let updates = self.timing.accumulate(frame_dt);
            for _ in 0..updates {
                self.step(self.timing.fixed_dt());
            }
            self.elapsed += frame_dt;

            if self.roster.is_empty() {
                info!("All guardians defeated after {:.1}s", self.elapsed);
                break;
            }
            if !self.world.player.is_alive() {
                info!("Player defeated after {:.1}s", self.elapsed);
                break;
            }
        }
        self.summary()
    }

    /// One fixed update.
    fn step(&mut self, dt: f32) {
        self.world.player.step(dt);
        self.sense(dt);
        self.player_attack(dt);

        let events = self.roster.update(dt, &mut self.world);
        for event in &events {
            log_event(event);
        }
        self.events_seen += events.len();

        let roster = &self.roster;
        self.health_bars.retain(|id, bar| match roster.get(*id) {
            Some(agent) => {
                bar.sync(agent.health_model());
                true
            },
            None => false,
        });
        self.sensors.retain(|id, _| roster.get(*id).is_some());
    }

    /// Moves guardian bodies and reports sight/reach edges to them.
    fn sense(&mut self, dt: f32) {
        let player_id = self.world.player.id();
        let player_position = self.world.target_position(player_id);

        for id in self.roster.ids() {
            let (Some(agent), Some(sensor)) = (self.roster.get_mut(id), self.sensors.get_mut(&id))
            else {
                continue;
            };
            agent.navigation_mut().step(dt);

            let change = sensor.update(agent.navigation().position(), player_position);
            match change.sight {
                Some(true) => agent.on_target_seen(player_id),
                Some(false) => agent.on_target_lost(),
                None => {},
            }
            if let Some(in_reach) = change.reach {
                agent.set_target_in_range(in_reach);
            }
        }
    }

    /// The player swings at the closest living guardian in reach.
    fn player_attack(&mut self, dt: f32) {
        self.player_cooldown = (self.player_cooldown - dt).max(0.0);

        let player = &self.world.player;
        let settings = &self.config.player;
        if settings.attack_damage <= 0.0
            || self.player_cooldown > 0.0
            || !player.is_alive()
            || player.is_stunned()
        {
            return;
        }

        let origin = player.position();
        let nearest = self
            .roster
            .iter()
            .filter(|agent| !agent.health_model().is_fatally_wounded())
            .map(|agent| (agent.id(), distance(origin, agent.navigation().position())))
            .filter(|(_, gap)| *gap <= settings.attack_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((id, _)) = nearest {
            match self.roster.apply_damage(id, settings.attack_damage) {
                Ok(true) => {
                    debug!("Player hit agent {} for {}", id, settings.attack_damage);
                    self.player_cooldown = settings.attack_interval;
                },
                Ok(false) => {},
                Err(e) => warn!("Player attack failed: {e}"),
            }
        }
    }

    /// Snapshot of the run so far.
    #[must_use]
    pub fn summary(&self) -> SimSummary {
        let mut bars: Vec<_> = self.health_bars.iter().collect();
        bars.sort_by_key(|(id, _)| **id);

        SimSummary {
            elapsed: self.elapsed,
            ticks: self.timing.total_updates(),
            guardians_spawned: self.config.guardians,
            guardians_defeated: self.world.quest.progress(),
            guardians_remaining: self.roster.len(),
            guardian_health: bars.into_iter().map(|(_, bar)| bar.value()).collect(),
            player_health: self.world.player.health(),
            player_alive: self.world.player.is_alive(),
            stuns: self.world.hud.stun_shown(),
            events: self.events_seen,
        }
    }
}

fn log_event(event: &AgentEvent) {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize event: {e}");
            return;
        },
    };
    match event {
        AgentEvent::StateChanged { .. } | AgentEvent::StunReleased { .. } => debug!("{json}"),
        _ => info!("{json}"),
    }
}

/// Loads the configuration at `config_path` and runs the arena.
pub fn run(config_path: &Path) -> Result<SimSummary> {
    let mut config = SimConfig::load_from(config_path)?;
    config.validate();

    info!("Configuration loaded:");
    info!("  Tick rate: {} Hz", config.tick_rate);
    info!("  Duration: {}s", config.duration);
    info!("  Guardians: {}", config.guardians);

    let mut arena = Arena::new(config)?;
    let summary = arena.run();

    let report = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
    info!("Run summary:\n{report}");
    Ok(summary)
}
