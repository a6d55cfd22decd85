//! The arena the guardians live in.
//!
//! Holds the scripted player plus the quest and HUD state, and exposes them
//! to agents through the `warden_ai` ports.

use tracing::{debug, info};
use warden_ai::{QuestNotifier, TargetDirectory, UiNotifier};
use warden_common::{move_towards, EntityId, Position};

use crate::config::PlayerConfig;

/// The player the guardians hunt.
#[derive(Debug, Clone)]
pub struct PlayerTarget {
    id: EntityId,
    position: Position,
    health: f32,
    /// Current speed; zero while stunned
    speed: f32,
    /// Speed restored after a stun
    stored_speed: f32,
    path: Vec<Position>,
    waypoint: usize,
}

impl PlayerTarget {
    /// Creates a player from its configuration.
    #[must_use]
    pub fn new(id: EntityId, config: &PlayerConfig) -> Self {
        Self {
            id,
            position: config.start,
            health: config.health,
            speed: config.speed,
            stored_speed: config.speed,
            path: config.path.clone(),
            waypoint: 0,
        }
    }

    /// Player ID.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Current movement speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Checks if the player is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Checks if a guardian froze the player in place.
    #[must_use]
    pub fn is_stunned(&self) -> bool {
        self.speed <= 0.0 && self.stored_speed > 0.0
    }

    /// Walks the scripted path.
    pub fn step(&mut self, dt: f32) {
        if !self.is_alive() || self.path.is_empty() {
            return;
        }
        let goal = self.path[self.waypoint];
        self.position = move_towards(self.position, goal, self.speed * dt);
        if self.position == goal {
            self.waypoint = (self.waypoint + 1) % self.path.len();
        }
    }
}

/// Counts defeated guardians.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestTracker {
    progress: u32,
}

impl QuestTracker {
    /// Objectives completed so far.
    #[must_use]
    pub fn progress(&self) -> u32 {
        self.progress
    }
}

/// HUD elements agents can toggle.
#[derive(Debug, Clone, Default)]
pub struct HudState {
    stun_visible: bool,
    stun_shown: u32,
}

impl HudState {
    /// Whether the stun indicator is on screen.
    #[must_use]
    pub fn stun_visible(&self) -> bool {
        self.stun_visible
    }

    /// How many times the stun indicator appeared.
    #[must_use]
    pub fn stun_shown(&self) -> u32 {
        self.stun_shown
    }
}

/// Everything outside the guardians' own bodies.
#[derive(Debug, Clone)]
pub struct ArenaWorld {
    /// The hunted player
    pub player: PlayerTarget,
    /// Quest progress
    pub quest: QuestTracker,
    /// HUD state
    pub hud: HudState,
}

impl ArenaWorld {
    /// Creates an arena with a fresh player.
    #[must_use]
    pub fn new(player: &PlayerConfig) -> Self {
        Self {
            player: PlayerTarget::new(EntityId::new(), player),
            quest: QuestTracker::default(),
            hud: HudState::default(),
        }
    }

    /// Resolves an ID to the player while it is still alive.
    fn live_player(&self, target: EntityId) -> Option<&PlayerTarget> {
        (target == self.player.id && self.player.is_alive()).then_some(&self.player)
    }

    fn live_player_mut(&mut self, target: EntityId) -> Option<&mut PlayerTarget> {
        (target == self.player.id && self.player.is_alive()).then_some(&mut self.player)
    }
}

impl TargetDirectory for ArenaWorld {
    fn target_position(&self, target: EntityId) -> Option<Position> {
        self.live_player(target).map(PlayerTarget::position)
    }

    fn damage_target(&mut self, target: EntityId, amount: f32) -> bool {
        let Some(player) = self.live_player_mut(target) else {
            return false;
        };
        player.health -= amount;
        debug!("Player took {amount} damage, {} left", player.health);
        if !player.is_alive() {
            info!("Player was defeated");
        }
        true
    }

    fn set_target_speed(&mut self, target: EntityId, speed: f32) -> bool {
        match self.live_player_mut(target) {
            Some(player) => {
                player.speed = speed;
                true
            },
            None => false,
        }
    }

    fn target_stored_speed(&self, target: EntityId) -> Option<f32> {
        self.live_player(target).map(|player| player.stored_speed)
    }
}

impl QuestNotifier for ArenaWorld {
    fn on_objective_progress(&mut self) {
        self.quest.progress += 1;
        info!("Quest progress: {} guardian(s) defeated", self.quest.progress);
    }
}

impl UiNotifier for ArenaWorld {
    fn set_stun_indicator_visible(&mut self, visible: bool) {
        if visible && !self.hud.stun_visible {
            self.hud.stun_shown += 1;
        }
        self.hud.stun_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn player_config() -> PlayerConfig {
        PlayerConfig {
            start: Vec3::ZERO,
            path: vec![Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO],
            speed: 1.0,
            ..PlayerConfig::default()
        }
    }

    #[test]
    fn test_player_walks_path_in_loop() {
        let mut player = PlayerTarget::new(EntityId::new(), &player_config());
        player.step(1.0);
        assert_eq!(player.position(), Vec3::new(1.0, 0.0, 0.0));
        player.step(1.0);
        assert_eq!(player.position(), Vec3::new(2.0, 0.0, 0.0));
        player.step(0.5);
        assert_eq!(player.position(), Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_stunned_player_stays_put() {
        let mut world = ArenaWorld::new(&player_config());
        let id = world.player.id();

        assert!(world.set_target_speed(id, 0.0));
        assert!(world.player.is_stunned());
        world.player.step(1.0);
        assert_eq!(world.player.position(), Vec3::ZERO);

        let stored = world.target_stored_speed(id);
        assert_eq!(stored, Some(1.0));
    }

    #[test]
    fn test_dead_player_is_gone() {
        let mut world = ArenaWorld::new(&player_config());
        let id = world.player.id();

        assert!(world.damage_target(id, 100.0));
        assert!(!world.player.is_alive());
        assert!(world.target_position(id).is_none());
        assert!(!world.damage_target(id, 1.0));
        assert!(!world.is_alive(id));
    }

    #[test]
    fn test_unknown_target() {
        let mut world = ArenaWorld::new(&player_config());
        let stranger = EntityId::new();
        assert!(world.target_position(stranger).is_none());
        assert!(!world.set_target_speed(stranger, 2.0));
    }

    #[test]
    fn test_quest_and_hud() {
        let mut world = ArenaWorld::new(&player_config());
        world.on_objective_progress();
        world.set_stun_indicator_visible(true);
        world.set_stun_indicator_visible(false);
        world.set_stun_indicator_visible(true);

        assert_eq!(world.quest.progress(), 1);
        assert!(world.hud.stun_visible());
        assert_eq!(world.hud.stun_shown(), 2);
    }
}
