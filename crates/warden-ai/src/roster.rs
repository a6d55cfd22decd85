//! Registry of live agents.
//!
//! The roster owns every agent in a level, ticks them in a stable order and
//! removes the ones that finished dying.

use ahash::AHashMap;
use tracing::{debug, info};
use warden_common::{EntityId, Position};

use crate::agent::{Agent, TickOutcome};
use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::events::AgentEvent;
use crate::ports::{AgentWorld, AnimationSink, NavigationAgent};

/// Owns and updates a set of agents.
#[derive(Debug)]
pub struct AgentRoster<N, A> {
    agents: AHashMap<EntityId, Agent<N, A>>,
}

impl<N, A> Default for AgentRoster<N, A> {
    fn default() -> Self {
        Self {
            agents: AHashMap::new(),
        }
    }
}

impl<N: NavigationAgent, A: AnimationSink> AgentRoster<N, A> {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns whether there are no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Gets an agent.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Agent<N, A>> {
        self.agents.get(&id)
    }

    /// Gets a mutable agent.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Agent<N, A>> {
        self.agents.get_mut(&id)
    }

    /// Agent IDs in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.agents.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterates over all agents in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent<N, A>> {
        self.agents.values()
    }

    /// Builds a new agent with a fresh ID and registers it.
    pub fn spawn(
        &mut self,
        config: AgentConfig,
        checkpoints: Vec<Position>,
        navigation: N,
        animation: A,
    ) -> AgentResult<EntityId> {
        let agent = Agent::new(EntityId::new(), config, checkpoints, navigation, animation)?;
        self.register(agent)
    }

    /// Registers an already built agent.
    pub fn register(&mut self, agent: Agent<N, A>) -> AgentResult<EntityId> {
        let id = agent.id();
        if self.agents.contains_key(&id) {
            return Err(AgentError::AlreadyRegistered(id));
        }
        info!("Registered agent {}", id);
        self.agents.insert(id, agent);
        Ok(id)
    }

    /// Removes an agent from the roster.
    pub fn despawn(&mut self, id: EntityId) -> AgentResult<Agent<N, A>> {
        self.agents.remove(&id).ok_or(AgentError::NotFound(id))
    }

    /// Reports that an agent saw a target.
    pub fn on_target_seen(&mut self, id: EntityId, target: EntityId) -> AgentResult<()> {
        self.agent_mut(id)?.on_target_seen(target);
        Ok(())
    }

    /// Reports that an agent lost its target.
    pub fn on_target_lost(&mut self, id: EntityId) -> AgentResult<()> {
        self.agent_mut(id)?.on_target_lost();
        Ok(())
    }

    /// Reports whether an agent's target is within reach.
    pub fn set_target_in_range(&mut self, id: EntityId, in_range: bool) -> AgentResult<()> {
        self.agent_mut(id)?.set_target_in_range(in_range);
        Ok(())
    }

    /// Damages an agent. Returns whether the damage was accepted.
    pub fn apply_damage(&mut self, id: EntityId, amount: f32) -> AgentResult<bool> {
        Ok(self.agent_mut(id)?.take_damage(amount))
    }

    /// Ticks every agent in ID order and removes destroyed ones.
    ///
    /// Returns the events published during this update.
    pub fn update<W: AgentWorld>(&mut self, dt: f32, world: &mut W) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        let mut destroyed = Vec::new();

        for id in self.ids() {
            let Some(agent) = self.agents.get_mut(&id) else {
                continue;
            };
            if agent.tick(dt, world) == TickOutcome::Destroyed {
                destroyed.push(id);
            }
            events.extend(agent.drain_events());
        }

        for id in destroyed {
            self.agents.remove(&id);
            debug!("Removed destroyed agent {}", id);
        }

        events
    }

    fn agent_mut(&mut self, id: EntityId) -> AgentResult<&mut Agent<N, A>> {
        self.agents.get_mut(&id).ok_or(AgentError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockNavigation, MockWorld, RecordingAnimator};
    use crate::state::BehaviorState;

    type TestRoster = AgentRoster<MockNavigation, RecordingAnimator>;

    fn spawn(roster: &mut TestRoster, config: AgentConfig) -> EntityId {
        roster
            .spawn(
                config,
                vec![Position::ZERO, Position::X],
                MockNavigation::new(),
                RecordingAnimator::default(),
            )
            .expect("spawn should succeed")
    }

    #[test]
    fn test_roster_new() {
        let roster = TestRoster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn test_roster_spawn_and_despawn() {
        let mut roster = TestRoster::new();
        let id = spawn(&mut roster, AgentConfig::default());
        assert_eq!(roster.len(), 1);
        assert!(roster.get(id).is_some());

        let agent = roster.despawn(id).expect("despawn should succeed");
        assert_eq!(agent.id(), id);
        assert!(roster.is_empty());
        assert!(matches!(roster.despawn(id), Err(AgentError::NotFound(_))));
    }

    #[test]
    fn test_roster_spawn_rejects_bad_agent() {
        let mut roster = TestRoster::new();
        let result = roster.spawn(
            AgentConfig::default(),
            Vec::new(),
            MockNavigation::new(),
            RecordingAnimator::default(),
        );
        assert!(matches!(result, Err(AgentError::NoCheckpoints)));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_roster_register_duplicate() {
        let mut roster = TestRoster::new();
        let id = EntityId::new();
        let build = || {
            Agent::new(
                id,
                AgentConfig::default(),
                vec![Position::ZERO],
                MockNavigation::new(),
                RecordingAnimator::default(),
            )
            .expect("agent should build")
        };

        roster.register(build()).expect("first register should succeed");
        assert!(matches!(
            roster.register(build()),
            Err(AgentError::AlreadyRegistered(_))
        ));
    }

    #[test]
    fn test_roster_unknown_agent() {
        let mut roster = TestRoster::new();
        let missing = EntityId::new();
        assert!(matches!(
            roster.apply_damage(missing, 5.0),
            Err(AgentError::NotFound(_))
        ));
        assert!(roster.on_target_seen(missing, EntityId::new()).is_err());
        assert!(roster.on_target_lost(missing).is_err());
        assert!(roster.set_target_in_range(missing, true).is_err());
    }

    #[test]
    fn test_roster_update_collects_events() {
        let mut roster = TestRoster::new();
        let mut world = MockWorld::new();
        let a = spawn(&mut roster, AgentConfig::default());
        let b = spawn(&mut roster, AgentConfig::default());

        let events = roster.update(0.1, &mut world);
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.agent() == a));
        assert!(events.iter().any(|e| e.agent() == b));
        assert_eq!(
            roster.get(a).and_then(|agent| agent.current_state()),
            Some(BehaviorState::Idle)
        );
    }

    #[test]
    fn test_roster_removes_destroyed_agents() {
        let mut roster = TestRoster::new();
        let mut world = MockWorld::new();
        let config = AgentConfig {
            enrage_threshold: 0.0,
            death_delay: 1.0,
            ..AgentConfig::default()
        };
        let doomed = spawn(&mut roster, config.clone());
        let survivor = spawn(&mut roster, config);

        roster.update(0.1, &mut world);
        assert_eq!(roster.apply_damage(doomed, 1000.0).ok(), Some(true));

        // One tick to enrage (threshold 0 is crossed by the lethal hit), one
        // to start dying, then the death delay.
        for _ in 0..13 {
            roster.update(0.1, &mut world);
        }

        assert!(roster.get(doomed).is_none());
        assert!(roster.get(survivor).is_some());
        assert_eq!(world.objective_progress(), 1);
    }
}
