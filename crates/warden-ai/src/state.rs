//! Behavioral states of a guardian agent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six behaviors an agent can be in.
///
/// The machine only transitions when the requested state differs from the
/// current one, so the derived `PartialEq` is the whole transition test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Standing still before the next patrol leg
    #[default]
    Idle,
    /// Walking toward the current checkpoint
    Patrolling,
    /// Following a seen target
    ChasingPlayer,
    /// Playing the one-time enrage transformation
    Enraged,
    /// Running attack sequences against the target
    Attacking,
    /// Dying; the agent is destroyed when this finishes
    Die,
}

impl BehaviorState {
    /// Get display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Patrolling => "Patrolling",
            Self::ChasingPlayer => "ChasingPlayer",
            Self::Enraged => "Enraged",
            Self::Attacking => "Attacking",
            Self::Die => "Die",
        }
    }

    /// Whether no other state can follow this one.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Die)
    }

    /// Get all states.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Idle,
            Self::Patrolling,
            Self::ChasingPlayer,
            Self::Enraged,
            Self::Attacking,
            Self::Die,
        ]
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(BehaviorState::default(), BehaviorState::Idle);
    }

    #[test]
    fn test_only_die_is_terminal() {
        let terminal: Vec<_> = BehaviorState::all()
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![BehaviorState::Die]);
    }

    #[test]
    fn test_display_matches_name() {
        for state in BehaviorState::all() {
            assert_eq!(state.to_string(), state.name());
        }
    }
}
