//! The six behavior tasks.
//!
//! Each behavior is a loop that keeps running for as long as it is the
//! current state; the scheduler ends it by dropping the task. The loops are
//! written as explicit step machines: every `return` is a suspension point
//! and the enum variant records where to pick up again.

use tracing::{debug, info};

use crate::combat::{AttackKind, AttackSequence};
use crate::context::TaskContext;
use crate::events::AgentEvent;
use crate::ports::{AnimFlag, AnimTrigger};
use crate::scheduler::{Resumable, Suspend};
use crate::state::BehaviorState;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum IdleStep {
    Rest,
    Rested,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PatrolStep {
    Depart,
    Walking { reached: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ChaseStep {
    Enter,
    Yield,
    Pursue,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EnrageStep {
    Yield,
    Roar,
    Calmed,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AttackStep {
    Yield,
    Decide,
    Swing(AttackSequence),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DieStep {
    Collapse,
    Expired,
}

/// The running task behind the current behavior.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StateTask {
    Idle(IdleStep),
    Patrolling(PatrolStep),
    ChasingPlayer(ChaseStep),
    Enraged(EnrageStep),
    Attacking(AttackStep),
    Die(DieStep),
}

impl StateTask {
    /// A fresh task for the given behavior.
    pub fn for_state(state: BehaviorState) -> Self {
        match state {
            BehaviorState::Idle => Self::Idle(IdleStep::Rest),
            BehaviorState::Patrolling => Self::Patrolling(PatrolStep::Depart),
            BehaviorState::ChasingPlayer => Self::ChasingPlayer(ChaseStep::Enter),
            BehaviorState::Enraged => Self::Enraged(EnrageStep::Yield),
            BehaviorState::Attacking => Self::Attacking(AttackStep::Yield),
            BehaviorState::Die => Self::Die(DieStep::Collapse),
        }
    }

    /// The behavior this task implements.
    pub fn state(&self) -> BehaviorState {
        match self {
            Self::Idle(_) => BehaviorState::Idle,
            Self::Patrolling(_) => BehaviorState::Patrolling,
            Self::ChasingPlayer(_) => BehaviorState::ChasingPlayer,
            Self::Enraged(_) => BehaviorState::Enraged,
            Self::Attacking(_) => BehaviorState::Attacking,
            Self::Die(_) => BehaviorState::Die,
        }
    }

    /// The attack currently being played, if any.
    pub fn active_attack(&self) -> Option<AttackKind> {
        match self {
            Self::Attacking(AttackStep::Swing(sequence)) => Some(sequence.kind()),
            _ => None,
        }
    }
}

impl Resumable<TaskContext<'_>> for StateTask {
    fn resume(&mut self, ctx: &mut TaskContext<'_>) -> Suspend {
        match self {
            Self::Idle(step) => idle(step, ctx),
            Self::Patrolling(step) => patrol(step, ctx),
            Self::ChasingPlayer(step) => chase(step, ctx),
            Self::Enraged(step) => enrage(step, ctx),
            Self::Attacking(step) => attack(step, ctx),
            Self::Die(step) => die(step, ctx),
        }
    }
}

fn idle(step: &mut IdleStep, ctx: &mut TaskContext<'_>) -> Suspend {
    loop {
        match step {
            IdleStep::Rest => {
                ctx.set_flag(AnimFlag::Walking, false);
                ctx.set_flag(AnimFlag::Attacking, false);
                // Leftover speed from an interrupted attack must not move us.
                ctx.board.speed = 0.0;
                *step = IdleStep::Rested;
                return Suspend::After(ctx.config.idle_time);
            },
            IdleStep::Rested => {
                ctx.request(BehaviorState::Patrolling);
                *step = IdleStep::Rest;
            },
        }
    }
}

fn patrol(step: &mut PatrolStep, ctx: &mut TaskContext<'_>) -> Suspend {
    match step {
        PatrolStep::Depart => {
            ctx.board.restore_speed();
            let checkpoint = ctx.board.current_checkpoint();
            ctx.navigation.set_destination(checkpoint);
            *step = PatrolStep::Walking { reached: false };
        },
        PatrolStep::Walking { reached } => {
            if !*reached {
                ctx.set_flag(AnimFlag::Walking, true);
                if ctx.navigation.remaining_distance() <= ctx.navigation.stopping_distance() {
                    *reached = true;
                    ctx.request(BehaviorState::Idle);
                    ctx.board.advance_checkpoint();
                    debug!(
                        "Agent {} reached checkpoint, next is {}",
                        ctx.agent, ctx.board.checkpoint_index
                    );
                }
            }
        },
    }
    Suspend::NextTick
}

fn chase(step: &mut ChaseStep, ctx: &mut TaskContext<'_>) -> Suspend {
    loop {
        match step {
            ChaseStep::Enter => {
                ctx.board.restore_speed();
                *step = ChaseStep::Yield;
            },
            ChaseStep::Yield => {
                ctx.set_flag(AnimFlag::Attacking, false);
                *step = ChaseStep::Pursue;
                return Suspend::NextTick;
            },
            ChaseStep::Pursue => {
                if let Some(position) = ctx.resolve_target() {
                    ctx.navigation.set_destination(position);
                    if ctx.board.target_in_range {
                        ctx.request(BehaviorState::Attacking);
                    } else {
                        ctx.set_flag(AnimFlag::Walking, true);
                        ctx.board.restore_speed();
                    }
                } else {
                    ctx.request(BehaviorState::Idle);
                }
                *step = ChaseStep::Yield;
            },
        }
    }
}

fn enrage(step: &mut EnrageStep, ctx: &mut TaskContext<'_>) -> Suspend {
    loop {
        match step {
            EnrageStep::Yield => {
                *step = EnrageStep::Roar;
                return Suspend::NextTick;
            },
            EnrageStep::Roar => {
                ctx.set_flag(AnimFlag::Walking, false);
                ctx.set_flag(AnimFlag::Attacking, false);
                ctx.set_flag(AnimFlag::Enraged, true);
                ctx.fire(AnimTrigger::Activated);
                *step = EnrageStep::Calmed;
                return Suspend::After(ctx.config.enrage_duration);
            },
            EnrageStep::Calmed => {
                ctx.board.attack_ready = true;
                ctx.request(BehaviorState::ChasingPlayer);
                *step = EnrageStep::Yield;
            },
        }
    }
}

fn attack(step: &mut AttackStep, ctx: &mut TaskContext<'_>) -> Suspend {
    loop {
        match step {
            AttackStep::Yield => {
                *step = AttackStep::Decide;
                return Suspend::NextTick;
            },
            AttackStep::Decide => {
                if ctx.resolve_target().is_none() {
                    // Chasing drops back to Idle on its own without a target.
                    ctx.request(BehaviorState::ChasingPlayer);
                    *step = AttackStep::Yield;
                    continue;
                }
                let kind = AttackKind::select(
                    ctx.health.enraged(),
                    ctx.board.attack_ready,
                    ctx.board.target_in_range,
                );
                match kind {
                    Some(kind) => {
                        debug!("Agent {} starts {:?} attack", ctx.agent, kind);
                        *step = AttackStep::Swing(AttackSequence::new(kind, ctx.board.target));
                    },
                    None => {
                        ctx.request(BehaviorState::ChasingPlayer);
                        *step = AttackStep::Yield;
                    },
                }
            },
            AttackStep::Swing(sequence) => match sequence.resume(ctx) {
                Suspend::Done => *step = AttackStep::Yield,
                suspend => return suspend,
            },
        }
    }
}

fn die(step: &mut DieStep, ctx: &mut TaskContext<'_>) -> Suspend {
    match step {
        DieStep::Collapse => {
            ctx.set_flag(AnimFlag::Walking, false);
            ctx.set_flag(AnimFlag::Attacking, false);
            ctx.fire(AnimTrigger::Dead);
            ctx.publish(AgentEvent::Died { agent: ctx.agent });
            info!("Agent {} is dying", ctx.agent);
            *step = DieStep::Expired;
            Suspend::After(ctx.config.death_delay)
        },
        DieStep::Expired => {
            ctx.world.on_objective_progress();
            ctx.board.destroyed = true;
            ctx.publish(AgentEvent::Destroyed { agent: ctx.agent });
            info!("Agent {} destroyed", ctx.agent);
            Suspend::Done
        },
    }
}
