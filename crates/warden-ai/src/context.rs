//! Shared agent fields and the view a running task gets of its agent.

use tracing::debug;
use warden_common::{EntityId, Position};

use crate::config::AgentConfig;
use crate::events::{AgentEvent, EventBus};
use crate::health::HealthModel;
use crate::ports::{AgentWorld, AnimFlag, AnimTrigger, AnimationSink, NavigationAgent};
use crate::state::BehaviorState;

/// Scratch fields shared by every behavior.
///
/// These outlive individual tasks on purpose: a task that is cancelled
/// leaves `speed` and `attack_ready` exactly as it last set them, and the
/// next behavior starts from those values.
#[derive(Debug, Clone)]
pub(crate) struct Blackboard {
    pub requested: BehaviorState,
    pub speed: f32,
    pub base_speed: f32,
    pub attack_ready: bool,
    pub checkpoints: Vec<Position>,
    pub checkpoint_index: usize,
    pub target: Option<EntityId>,
    pub target_in_range: bool,
    pub damage: f32,
    pub destroyed: bool,
}

impl Blackboard {
    pub fn new(config: &AgentConfig, checkpoints: Vec<Position>) -> Self {
        Self {
            requested: BehaviorState::Idle,
            speed: config.base_speed,
            base_speed: config.base_speed,
            attack_ready: true,
            checkpoints,
            checkpoint_index: 0,
            target: None,
            target_in_range: false,
            damage: config.damage,
            destroyed: false,
        }
    }

    /// The checkpoint the next patrol leg heads for.
    pub fn current_checkpoint(&self) -> Position {
        self.checkpoints[self.checkpoint_index]
    }

    /// Moves to the next checkpoint, wrapping to the first.
    pub fn advance_checkpoint(&mut self) {
        self.checkpoint_index = (self.checkpoint_index + 1) % self.checkpoints.len();
    }

    pub fn restore_speed(&mut self) {
        self.speed = self.base_speed;
    }
}

/// Everything a behavior task may touch while it runs.
pub(crate) struct TaskContext<'a> {
    pub agent: EntityId,
    pub config: &'a AgentConfig,
    pub health: &'a HealthModel,
    pub board: &'a mut Blackboard,
    pub navigation: &'a mut dyn NavigationAgent,
    pub animation: &'a mut dyn AnimationSink,
    pub world: &'a mut dyn AgentWorld,
    pub events: &'a EventBus,
}

impl TaskContext<'_> {
    /// Asks the machine to switch behavior on its next tick.
    pub fn request(&mut self, state: BehaviorState) {
        self.board.requested = state;
    }

    pub fn publish(&self, event: AgentEvent) {
        self.events.publish(event);
    }

    pub fn set_flag(&mut self, flag: AnimFlag, value: bool) {
        self.animation.set_flag(flag, value);
    }

    pub fn fire(&mut self, trigger: AnimTrigger) {
        self.animation.fire_trigger(trigger);
    }

    /// Looks up the chased target, dropping the reference if it is gone.
    pub fn resolve_target(&mut self) -> Option<Position> {
        let target = self.board.target?;
        let position = self.world.target_position(target);
        if position.is_none() {
            debug!("Agent {} lost track of despawned target {}", self.agent, target);
            self.board.target = None;
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_index_wraps() {
        let checkpoints = vec![Position::ZERO, Position::X, Position::Z];
        let mut board = Blackboard::new(&AgentConfig::default(), checkpoints);
        assert_eq!(board.current_checkpoint(), Position::ZERO);

        board.advance_checkpoint();
        board.advance_checkpoint();
        assert_eq!(board.current_checkpoint(), Position::Z);

        board.advance_checkpoint();
        assert_eq!(board.checkpoint_index, 0);
    }

    #[test]
    fn test_blackboard_starts_ready_at_base_speed() {
        let config = AgentConfig::default().with_base_speed(4.0).with_damage(12.0);
        let board = Blackboard::new(&config, vec![Position::ZERO]);
        assert_eq!(board.requested, BehaviorState::Idle);
        assert_eq!(board.speed, 4.0);
        assert!(board.attack_ready);
        assert_eq!(board.damage, 12.0);
        assert!(board.target.is_none());
    }
}
