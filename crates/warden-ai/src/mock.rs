//! In-memory implementations of the host ports.
//!
//! Used by the crate's own tests and handy for hosts that want to drive an
//! agent headless.

use ahash::AHashMap;
use warden_common::{EntityId, Position};

use crate::ports::{
    AnimFlag, AnimTrigger, AnimationSink, NavigationAgent, QuestNotifier, TargetDirectory,
    UiNotifier,
};

/// Mock navigation agent that never moves on its own.
#[derive(Debug, Clone)]
pub struct MockNavigation {
    /// Last destination set
    destination: Option<Position>,
    /// Every destination set, in order
    destinations: Vec<Position>,
    /// Reported remaining distance
    remaining_distance: f32,
    /// Reported stopping distance
    stopping_distance: f32,
    /// Last speed set
    speed: f32,
}

impl Default for MockNavigation {
    fn default() -> Self {
        Self {
            destination: None,
            destinations: Vec::new(),
            remaining_distance: 10.0,
            stopping_distance: 0.5,
            speed: 0.0,
        }
    }
}

impl MockNavigation {
    /// Creates a mock that reports being 10 units away from everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the remaining distance reported from now on.
    pub fn set_remaining_distance(&mut self, distance: f32) {
        self.remaining_distance = distance;
    }

    /// Sets the stopping distance.
    pub fn set_stopping_distance(&mut self, distance: f32) {
        self.stopping_distance = distance;
    }

    /// Last destination set.
    #[must_use]
    pub fn destination(&self) -> Option<Position> {
        self.destination
    }

    /// All destinations set so far.
    #[must_use]
    pub fn destinations(&self) -> &[Position] {
        &self.destinations
    }

    /// Last speed set.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl NavigationAgent for MockNavigation {
    fn set_destination(&mut self, destination: Position) {
        self.destination = Some(destination);
        self.destinations.push(destination);
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Animation sink that remembers what it was told.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimator {
    flags: AHashMap<AnimFlag, bool>,
    triggers: Vec<AnimTrigger>,
}

impl RecordingAnimator {
    /// Current value of a flag (false if never set).
    #[must_use]
    pub fn flag(&self, flag: AnimFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    /// How often a trigger fired.
    #[must_use]
    pub fn trigger_count(&self, trigger: AnimTrigger) -> usize {
        self.triggers.iter().filter(|&&t| t == trigger).count()
    }
}

impl AnimationSink for RecordingAnimator {
    fn set_flag(&mut self, flag: AnimFlag, value: bool) {
        self.flags.insert(flag, value);
    }

    fn fire_trigger(&mut self, trigger: AnimTrigger) {
        self.triggers.push(trigger);
    }
}

/// A target entity in a [`MockWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockTarget {
    /// World position
    pub position: Position,
    /// Current health
    pub health: f32,
    /// Current movement speed
    pub speed: f32,
    /// Speed the target normally moves at
    pub stored_speed: f32,
}

impl MockTarget {
    /// Creates a target moving at its stored speed.
    #[must_use]
    pub fn new(position: Position, health: f32, speed: f32) -> Self {
        Self {
            position,
            health,
            speed,
            stored_speed: speed,
        }
    }
}

/// Mock world holding targets and recording quest/UI notifications.
#[derive(Debug, Clone, Default)]
pub struct MockWorld {
    targets: AHashMap<EntityId, MockTarget>,
    objective_progress: u32,
    stun_visible: bool,
    stun_history: Vec<bool>,
    damage_log: Vec<(EntityId, f32)>,
}

impl MockWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a target.
    pub fn add_target(&mut self, id: EntityId, target: MockTarget) {
        self.targets.insert(id, target);
    }

    /// Removes a target, as if it despawned.
    pub fn remove_target(&mut self, id: EntityId) -> Option<MockTarget> {
        self.targets.remove(&id)
    }

    /// Looks up a target.
    #[must_use]
    pub fn target(&self, id: EntityId) -> Option<&MockTarget> {
        self.targets.get(&id)
    }

    /// How many objective progress notifications arrived.
    #[must_use]
    pub fn objective_progress(&self) -> u32 {
        self.objective_progress
    }

    /// Whether the stun indicator is shown.
    #[must_use]
    pub fn stun_indicator_visible(&self) -> bool {
        self.stun_visible
    }

    /// Every visibility change of the stun indicator.
    #[must_use]
    pub fn stun_history(&self) -> &[bool] {
        &self.stun_history
    }

    /// Every hit that landed.
    #[must_use]
    pub fn damage_log(&self) -> &[(EntityId, f32)] {
        &self.damage_log
    }
}

impl TargetDirectory for MockWorld {
    fn target_position(&self, target: EntityId) -> Option<Position> {
        self.targets.get(&target).map(|t| t.position)
    }

    fn damage_target(&mut self, target: EntityId, amount: f32) -> bool {
        let Some(entry) = self.targets.get_mut(&target) else {
            return false;
        };
        entry.health -= amount;
        self.damage_log.push((target, amount));
        true
    }

    fn set_target_speed(&mut self, target: EntityId, speed: f32) -> bool {
        match self.targets.get_mut(&target) {
            Some(entry) => {
                entry.speed = speed;
                true
            },
            None => false,
        }
    }

    fn target_stored_speed(&self, target: EntityId) -> Option<f32> {
        self.targets.get(&target).map(|t| t.stored_speed)
    }
}

impl QuestNotifier for MockWorld {
    fn on_objective_progress(&mut self) {
        self.objective_progress += 1;
    }
}

impl UiNotifier for MockWorld {
    fn set_stun_indicator_visible(&mut self, visible: bool) {
        self.stun_visible = visible;
        self.stun_history.push(visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_world_damage_and_despawn() {
        let mut world = MockWorld::new();
        let id = EntityId::from_raw(3);
        world.add_target(id, MockTarget::new(Position::ZERO, 20.0, 4.0));

        assert!(world.damage_target(id, 5.0));
        assert_eq!(world.target(id).map(|t| t.health), Some(15.0));
        assert!(world.is_alive(id));

        world.remove_target(id);
        assert!(!world.damage_target(id, 5.0));
        assert!(!world.is_alive(id));
        assert_eq!(world.damage_log(), &[(id, 5.0)]);
    }

    #[test]
    fn test_mock_world_speed_keeps_stored_value() {
        let mut world = MockWorld::new();
        let id = EntityId::from_raw(4);
        world.add_target(id, MockTarget::new(Position::ZERO, 20.0, 4.0));

        assert!(world.set_target_speed(id, 0.0));
        assert_eq!(world.target(id).map(|t| t.speed), Some(0.0));
        assert_eq!(world.target_stored_speed(id), Some(4.0));
    }

    #[test]
    fn test_recording_animator() {
        let mut animator = RecordingAnimator::default();
        assert!(!animator.flag(AnimFlag::Walking));
        animator.set_flag(AnimFlag::Walking, true);
        animator.fire_trigger(AnimTrigger::Dead);
        animator.fire_trigger(AnimTrigger::Dead);
        assert!(animator.flag(AnimFlag::Walking));
        assert_eq!(animator.trigger_count(AnimTrigger::Dead), 2);
        assert_eq!(animator.trigger_count(AnimTrigger::Activated), 0);
    }
}
