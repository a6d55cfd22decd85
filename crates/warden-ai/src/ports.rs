//! Capabilities the engine consumes from its host.
//!
//! The agent never owns the world it lives in. Movement, animation, the
//! entity it attacks and the quest/UI layers are reached through these
//! traits, the same way NPC code elsewhere talks to pathfinding and storage.

use serde::{Deserialize, Serialize};
use warden_common::{EntityId, Position};

/// Named boolean animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimFlag {
    /// `isWalking`
    Walking,
    /// `isAttacking`
    Attacking,
    /// `isEnraged`
    Enraged,
}

impl AnimFlag {
    /// Animator parameter name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walking => "isWalking",
            Self::Attacking => "isAttacking",
            Self::Enraged => "isEnraged",
        }
    }
}

/// Named one-shot animation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimTrigger {
    /// `isActivated`, fired when the agent enrages
    Activated,
    /// `isDead`, fired when the agent starts dying
    Dead,
}

impl AnimTrigger {
    /// Animator parameter name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Activated => "isActivated",
            Self::Dead => "isDead",
        }
    }
}

/// Navigation capability attached to the agent's body.
pub trait NavigationAgent {
    /// Starts moving toward a destination.
    fn set_destination(&mut self, destination: Position);
    /// Distance left to the current destination.
    fn remaining_distance(&self) -> f32;
    /// Distance at which the destination counts as reached.
    fn stopping_distance(&self) -> f32;
    /// Sets the movement speed.
    fn set_speed(&mut self, speed: f32);
}

/// Sink for the agent's visible behavior.
pub trait AnimationSink {
    /// Sets a boolean animation parameter.
    fn set_flag(&mut self, flag: AnimFlag, value: bool);
    /// Fires a one-shot trigger.
    fn fire_trigger(&mut self, trigger: AnimTrigger);
}

/// Access to the entities an agent may target.
///
/// Every method resolves the ID first; `None`/`false` means the entity no
/// longer exists and the call had no effect.
pub trait TargetDirectory {
    /// Current position of a target.
    fn target_position(&self, target: EntityId) -> Option<Position>;
    /// Applies damage to a target.
    fn damage_target(&mut self, target: EntityId, amount: f32) -> bool;
    /// Overwrites a target's movement speed.
    fn set_target_speed(&mut self, target: EntityId, speed: f32) -> bool;
    /// The speed the target normally moves at.
    fn target_stored_speed(&self, target: EntityId) -> Option<f32>;

    /// Checks if a target still exists.
    fn is_alive(&self, target: EntityId) -> bool {
        self.target_position(target).is_some()
    }
}

/// Receives quest progress when an agent is defeated.
pub trait QuestNotifier {
    /// Called once per agent, right before it is removed.
    fn on_objective_progress(&mut self);
}

/// Receives UI state changes caused by agents.
pub trait UiNotifier {
    /// Shows or hides the "stunned" indicator.
    fn set_stun_indicator_visible(&mut self, visible: bool);
}

/// Everything an agent needs from the world outside its own body.
pub trait AgentWorld: TargetDirectory + QuestNotifier + UiNotifier {}

impl<T: TargetDirectory + QuestNotifier + UiNotifier> AgentWorld for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animator_parameter_names() {
        assert_eq!(AnimFlag::Walking.name(), "isWalking");
        assert_eq!(AnimFlag::Attacking.name(), "isAttacking");
        assert_eq!(AnimFlag::Enraged.name(), "isEnraged");
        assert_eq!(AnimTrigger::Activated.name(), "isActivated");
        assert_eq!(AnimTrigger::Dead.name(), "isDead");
    }
}
