//! # Warden AI
//!
//! Behavior engine for hostile guardian NPCs.
//!
//! An agent is a timed, cooperative state machine:
//! - Idle and Patrolling between fixed checkpoints
//! - ChasingPlayer and Attacking once a target is seen
//! - A one-way Enraged transformation when health drops below a threshold
//! - Die, followed by quest progress and removal from the world
//!
//! Each behavior runs as a resumable task on a single-slot scheduler. The
//! host ticks the agent once per frame and supplies navigation, animation
//! and world access through the traits in [`ports`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod agent;
mod behavior;
pub mod combat;
pub mod config;
mod context;
pub mod error;
pub mod events;
pub mod health;
pub mod mock;
pub mod ports;
pub mod roster;
pub mod scheduler;
pub mod state;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::agent::*;
    pub use crate::combat::AttackKind;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::events::*;
    pub use crate::health::*;
    pub use crate::ports::*;
    pub use crate::roster::*;
    pub use crate::scheduler::*;
    pub use crate::state::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockNavigation, MockWorld, RecordingAnimator};
    use warden_common::{EntityId, Position};

    #[test]
    fn test_prelude_builds_and_ticks_agent() {
        let mut agent = Agent::new(
            EntityId::from_raw(9),
            AgentConfig::default(),
            vec![Position::ZERO],
            MockNavigation::new(),
            RecordingAnimator::default(),
        )
        .expect("agent should build");
        let mut world = MockWorld::new();

        assert_eq!(agent.tick(0.016, &mut world), TickOutcome::Active);
        assert_eq!(agent.current_state(), Some(BehaviorState::Idle));
    }

    #[test]
    fn test_default_health_bar_tracks_agent() {
        let mut agent = Agent::new(
            EntityId::from_raw(10),
            AgentConfig::default(),
            vec![Position::ZERO],
            MockNavigation::new(),
            RecordingAnimator::default(),
        )
        .expect("agent should build");
        let mut bar = HealthBar::new(agent.health_model());
        assert_eq!(bar.max_value(), 300.0);

        agent.take_damage(75.0);
        bar.sync(agent.health_model());
        assert_eq!(bar.value(), 225.0);
        assert!((bar.fill() - 0.75).abs() < 1e-6);
    }
}
