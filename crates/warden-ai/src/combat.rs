//! Timed attack sequences.
//!
//! An attack is a small resumable program run inside the Attacking
//! behavior. Once started it runs to completion across its waits; range
//! changes are only looked at again after it finishes. If the behavior is
//! cancelled halfway, whatever the sequence had not done yet is dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;
use warden_common::EntityId;

use crate::context::TaskContext;
use crate::events::AgentEvent;
use crate::ports::AnimFlag;
use crate::scheduler::{Resumable, Suspend};

/// Attack profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Quick strike
    Normal,
    /// Slow slam that also stuns the target
    Enraged,
}

impl AttackKind {
    /// Picks the attack to start, if any.
    ///
    /// Both profiles need the attack gate open and the target in range;
    /// the enrage latch decides which one runs.
    #[must_use]
    pub const fn select(enraged: bool, attack_ready: bool, target_in_range: bool) -> Option<Self> {
        if !attack_ready || !target_in_range {
            return None;
        }
        if enraged {
            Some(Self::Enraged)
        } else {
            Some(Self::Normal)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Strike,
    Release,
    Recover,
    Rearm,
}

/// One attack in progress.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AttackSequence {
    kind: AttackKind,
    target: Option<EntityId>,
    phase: Phase,
    stunned: bool,
}

impl AttackSequence {
    /// Latches the target the attack is aimed at.
    pub fn new(kind: AttackKind, target: Option<EntityId>) -> Self {
        Self {
            kind,
            target,
            phase: Phase::Start,
            stunned: false,
        }
    }

    pub fn kind(&self) -> AttackKind {
        self.kind
    }

    fn strike(&mut self, ctx: &mut TaskContext<'_>) {
        let damage = ctx.board.damage;
        let Some(target) = self.target else {
            debug!("Agent {} swung with no target", ctx.agent);
            return;
        };
        if !ctx.world.damage_target(target, damage) {
            debug!("Agent {} hit skipped, target {} is gone", ctx.agent, target);
            return;
        }
        ctx.publish(AgentEvent::TargetDamaged {
            agent: ctx.agent,
            target,
            damage,
        });

        if self.kind == AttackKind::Enraged && ctx.world.set_target_speed(target, 0.0) {
            ctx.world.set_stun_indicator_visible(true);
            self.stunned = true;
            ctx.publish(AgentEvent::TargetStunned {
                agent: ctx.agent,
                target,
            });
        }
    }

    fn release(&mut self, ctx: &mut TaskContext<'_>) {
        if !self.stunned {
            return;
        }
        self.stunned = false;
        ctx.world.set_stun_indicator_visible(false);

        let Some(target) = self.target else {
            return;
        };
        match ctx.world.target_stored_speed(target) {
            Some(stored) => {
                ctx.world.set_target_speed(target, stored);
                ctx.publish(AgentEvent::StunReleased {
                    agent: ctx.agent,
                    target,
                });
            },
            None => debug!("Agent {} stun target {} vanished", ctx.agent, target),
        }
    }
}

impl Resumable<TaskContext<'_>> for AttackSequence {
    fn resume(&mut self, ctx: &mut TaskContext<'_>) -> Suspend {
        let timings = ctx.config.combat;
        match self.phase {
            Phase::Start => {
                ctx.set_flag(AnimFlag::Walking, false);
                ctx.set_flag(AnimFlag::Attacking, true);
                ctx.board.speed = 0.0;
                ctx.board.attack_ready = false;
                self.phase = Phase::Strike;
                Suspend::After(match self.kind {
                    AttackKind::Normal => timings.normal_windup,
                    AttackKind::Enraged => timings.enraged_windup,
                })
            },
            Phase::Strike => {
                let (next, wait) = match self.kind {
                    AttackKind::Normal => (Phase::Recover, timings.normal_recovery),
                    AttackKind::Enraged => (Phase::Release, timings.stun_duration),
                };
                self.strike(ctx);
                self.phase = next;
                Suspend::After(wait)
            },
            Phase::Release => {
                let wait = timings.enraged_release;
                self.release(ctx);
                self.phase = Phase::Recover;
                Suspend::After(wait)
            },
            Phase::Recover => {
                let wait = match self.kind {
                    AttackKind::Normal => timings.normal_cooldown,
                    AttackKind::Enraged => timings.enraged_cooldown,
                };
                ctx.set_flag(AnimFlag::Attacking, false);
                self.phase = Phase::Rearm;
                Suspend::After(wait)
            },
            Phase::Rearm => {
                ctx.board.restore_speed();
                ctx.board.attack_ready = true;
                Suspend::Done
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_requires_gate_and_range() {
        assert_eq!(AttackKind::select(false, true, true), Some(AttackKind::Normal));
        assert_eq!(AttackKind::select(true, true, true), Some(AttackKind::Enraged));
        assert_eq!(AttackKind::select(false, false, true), None);
        assert_eq!(AttackKind::select(true, true, false), None);
    }

    #[test]
    fn test_new_sequence_latches_target() {
        let target = EntityId::from_raw(7);
        let sequence = AttackSequence::new(AttackKind::Enraged, Some(target));
        assert_eq!(sequence.kind(), AttackKind::Enraged);
        assert_eq!(sequence.target, Some(target));
        assert_eq!(sequence.phase, Phase::Start);
    }
}
