//! Headless animator that logs parameter changes.

use std::collections::HashMap;

use tracing::debug;
use warden_ai::{AnimFlag, AnimTrigger, AnimationSink};
use warden_common::EntityId;

/// Animator stand-in for a guardian body.
///
/// Keeps the current flag values so the summary can report them and logs
/// every change under the owning agent's ID.
#[derive(Debug, Clone, Default)]
pub struct LoggingAnimator {
    owner: EntityId,
    flags: HashMap<AnimFlag, bool>,
    triggers_fired: u32,
}

impl LoggingAnimator {
    /// Creates an animator for the given agent.
    #[must_use]
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Current value of a flag.
    #[must_use]
    pub fn flag(&self, flag: AnimFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    /// Number of triggers fired so far.
    #[must_use]
    pub fn triggers_fired(&self) -> u32 {
        self.triggers_fired
    }
}

impl AnimationSink for LoggingAnimator {
    fn set_flag(&mut self, flag: AnimFlag, value: bool) {
        let previous = self.flags.insert(flag, value);
        if previous != Some(value) {
            debug!("Agent {} animator {} = {}", self.owner, flag.name(), value);
        }
    }

    fn fire_trigger(&mut self, trigger: AnimTrigger) {
        self.triggers_fired += 1;
        debug!("Agent {} animator trigger {}", self.owner, trigger.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_animator_tracks_flags() {
        let mut animator = LoggingAnimator::new(EntityId::from_raw(5));
        assert!(!animator.flag(AnimFlag::Enraged));

        animator.set_flag(AnimFlag::Enraged, true);
        animator.fire_trigger(AnimTrigger::Activated);

        assert!(animator.flag(AnimFlag::Enraged));
        assert_eq!(animator.triggers_fired(), 1);
    }
}
