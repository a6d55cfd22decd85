//! The guardian agent and its per-tick state machine.

use tracing::{debug, info, warn};
use warden_common::{EntityId, Position};

use crate::behavior::StateTask;
use crate::combat::AttackKind;
use crate::config::AgentConfig;
use crate::context::{Blackboard, TaskContext};
use crate::error::{AgentError, AgentResult};
use crate::events::{AgentEvent, EventBus};
use crate::health::HealthModel;
use crate::ports::{AgentWorld, AnimationSink, NavigationAgent};
use crate::scheduler::Scheduler;
use crate::state::BehaviorState;

/// Result of ticking an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The agent is still in the world.
    Active,
    /// The agent finished dying; the host must remove it.
    Destroyed,
}

/// A hostile guardian driven by a timed state machine.
///
/// The host calls [`Agent::tick`] once per frame. Perception and damage
/// arrive in between ticks through the `on_target_*`, `set_target_in_range`
/// and `take_damage` methods.
#[derive(Debug)]
pub struct Agent<N, A> {
    id: EntityId,
    config: AgentConfig,
    health: HealthModel,
    board: Blackboard,
    current: Option<BehaviorState>,
    scheduler: Scheduler<StateTask>,
    navigation: N,
    animation: A,
    events: EventBus,
}

impl<N: NavigationAgent, A: AnimationSink> Agent<N, A> {
    /// Creates an agent at full health that will start idling on its
    /// first tick.
    pub fn new(
        id: EntityId,
        config: AgentConfig,
        checkpoints: Vec<Position>,
        navigation: N,
        animation: A,
    ) -> AgentResult<Self> {
        config.validate()?;
        if checkpoints.is_empty() {
            return Err(AgentError::NoCheckpoints);
        }

        let health = HealthModel::new(config.max_health, config.enrage_threshold);
        let board = Blackboard::new(&config, checkpoints);
        Ok(Self {
            id,
            config,
            health,
            board,
            current: None,
            scheduler: Scheduler::new(),
            navigation,
            animation,
            events: EventBus::default(),
        })
    }

    /// Advances the agent by `dt` seconds.
    pub fn tick<W: AgentWorld>(&mut self, dt: f32, world: &mut W) -> TickOutcome {
        if self.board.destroyed {
            return TickOutcome::Destroyed;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        // Both checks run every tick, in this order. A hit that is lethal and
        // crosses the enrage threshold at once ends up requesting Enraged.
        if self.health.is_fatally_wounded() {
            self.board.requested = BehaviorState::Die;
        }
        if self.health.check_enrage() {
            info!("Agent {} enraged at {} health", self.id, self.health.health());
            self.board.requested = BehaviorState::Enraged;
            self.events.publish(AgentEvent::Enraged {
                agent: self.id,
                health: self.health.health(),
            });
        }

        self.navigation.set_speed(self.board.speed);

        let requested = self.board.requested;
        let transition = self.current != Some(requested);
        let previous = self.current;
        if transition {
            self.current = Some(requested);
            debug!("Agent {} state {:?} -> {}", self.id, previous, requested);
            self.events.publish(AgentEvent::StateChanged {
                agent: self.id,
                from: previous,
                to: requested,
            });
        }

        let mut ctx = TaskContext {
            agent: self.id,
            config: &self.config,
            health: &self.health,
            board: &mut self.board,
            navigation: &mut self.navigation,
            animation: &mut self.animation,
            world,
            events: &self.events,
        };
        if transition {
            self.scheduler.start(StateTask::for_state(requested), &mut ctx);
        } else {
            self.scheduler.advance(dt, &mut ctx);
        }

        if self.board.destroyed {
            self.scheduler.cancel();
            TickOutcome::Destroyed
        } else {
            TickOutcome::Active
        }
    }

    // === Perception port ===

    /// A target entered the agent's view.
    pub fn on_target_seen(&mut self, target: EntityId) {
        if self.board.destroyed {
            return;
        }
        debug!("Agent {} saw {}", self.id, target);
        self.board.target = Some(target);
        self.board.requested = BehaviorState::ChasingPlayer;
    }

    /// The target left the agent's view. Only the reference is cleared; the
    /// chase notices on its own.
    pub fn on_target_lost(&mut self) {
        if self.board.destroyed {
            return;
        }
        if self.board.target.take().is_some() {
            debug!("Agent {} lost its target", self.id);
        }
    }

    /// Updates whether the target is within attack reach.
    pub fn set_target_in_range(&mut self, in_range: bool) {
        if self.board.destroyed {
            return;
        }
        self.board.target_in_range = in_range;
    }

    /// Applies external damage. Returns whether it was accepted.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.board.destroyed {
            warn!("Damage sent to destroyed agent {}", self.id);
            return false;
        }
        self.health.take_damage(amount)
    }

    // === Accessors ===

    /// Agent ID.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Agent configuration.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Health model.
    #[must_use]
    pub fn health_model(&self) -> &HealthModel {
        &self.health
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health.health()
    }

    /// Maximum health.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.health.max_health()
    }

    /// Whether the agent has enraged.
    #[must_use]
    pub fn enraged(&self) -> bool {
        self.health.enraged()
    }

    /// Whether a new attack may start.
    #[must_use]
    pub fn attack_ready(&self) -> bool {
        self.board.attack_ready
    }

    /// Behavior that is running, `None` before the first tick.
    #[must_use]
    pub fn current_state(&self) -> Option<BehaviorState> {
        self.current
    }

    /// Behavior that will run after the next tick.
    #[must_use]
    pub fn requested_state(&self) -> BehaviorState {
        self.board.requested
    }

    /// Speed pushed to navigation on the next tick.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.board.speed
    }

    /// Speed restored whenever the agent walks.
    #[must_use]
    pub fn base_speed(&self) -> f32 {
        self.board.base_speed
    }

    /// Patrol checkpoints.
    #[must_use]
    pub fn checkpoints(&self) -> &[Position] {
        &self.board.checkpoints
    }

    /// Index of the checkpoint the next patrol leg heads for.
    #[must_use]
    pub fn checkpoint_index(&self) -> usize {
        self.board.checkpoint_index
    }

    /// Target being chased.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        self.board.target
    }

    /// Whether the target is within attack reach.
    #[must_use]
    pub fn target_in_range(&self) -> bool {
        self.board.target_in_range
    }

    /// Damage dealt per attack.
    #[must_use]
    pub fn damage(&self) -> f32 {
        self.board.damage
    }

    /// Attack sequence currently playing.
    #[must_use]
    pub fn active_attack(&self) -> Option<AttackKind> {
        self.scheduler.task().and_then(StateTask::active_attack)
    }

    /// Whether the agent finished dying.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.board.destroyed
    }

    /// Navigation capability.
    #[must_use]
    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    /// Mutable navigation capability, for hosts that step movement.
    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    /// Animation sink.
    #[must_use]
    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Drains events published since the last call.
    pub fn drain_events(&self) -> Vec<AgentEvent> {
        self.events.drain()
    }
}
