//! Agent event bus.
//!
//! Agents publish what they did during a tick so hosts can drive audio,
//! logs or replays without polling every field.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use warden_common::EntityId;

use crate::state::BehaviorState;

/// Default capacity of an agent's event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Something observable an agent did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentEvent {
    /// The active behavior was replaced
    StateChanged {
        /// Agent ID
        agent: EntityId,
        /// Previous behavior (`None` on the first tick)
        from: Option<BehaviorState>,
        /// New behavior
        to: BehaviorState,
    },
    /// The enrage latch fired
    Enraged {
        /// Agent ID
        agent: EntityId,
        /// Health when the latch fired
        health: f32,
    },
    /// An attack landed on the target
    TargetDamaged {
        /// Agent ID
        agent: EntityId,
        /// Target hit
        target: EntityId,
        /// Damage applied
        damage: f32,
    },
    /// The target was stunned by an enraged attack
    TargetStunned {
        /// Agent ID
        agent: EntityId,
        /// Stunned target
        target: EntityId,
    },
    /// The stun on the target ended
    StunReleased {
        /// Agent ID
        agent: EntityId,
        /// Released target
        target: EntityId,
    },
    /// The death animation started
    Died {
        /// Agent ID
        agent: EntityId,
    },
    /// The agent finished dying and must be removed from the world
    Destroyed {
        /// Agent ID
        agent: EntityId,
    },
}

impl AgentEvent {
    /// The agent that produced this event.
    #[must_use]
    pub fn agent(&self) -> EntityId {
        match self {
            Self::StateChanged { agent, .. }
            | Self::Enraged { agent, .. }
            | Self::TargetDamaged { agent, .. }
            | Self::TargetStunned { agent, .. }
            | Self::StunReleased { agent, .. }
            | Self::Died { agent }
            | Self::Destroyed { agent } => *agent,
        }
    }
}

/// Event bus for agent events.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for publishing events
    sender: Sender<AgentEvent>,
    /// Receiver for collecting events
    receiver: Receiver<AgentEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: AgentEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<AgentEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(8);
        let agent = EntityId::from_raw(3);
        bus.publish(AgentEvent::Died { agent });
        bus.publish(AgentEvent::Destroyed { agent });
        assert_eq!(bus.pending_count(), 2);

        let events = bus.drain();
        assert_eq!(
            events,
            vec![AgentEvent::Died { agent }, AgentEvent::Destroyed { agent }]
        );
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops_events() {
        let bus = EventBus::new(1);
        let agent = EntityId::from_raw(1);
        bus.publish(AgentEvent::Died { agent });
        bus.publish(AgentEvent::Destroyed { agent });
        assert_eq!(bus.drain(), vec![AgentEvent::Died { agent }]);
    }

    #[test]
    fn test_zero_capacity_still_holds_one_event() {
        let bus = EventBus::new(0);
        let agent = EntityId::from_raw(2);
        bus.publish(AgentEvent::Died { agent });
        assert_eq!(bus.pending_count(), 1);
    }

    #[test]
    fn test_event_agent_accessor() {
        let agent = EntityId::from_raw(9);
        let event = AgentEvent::TargetDamaged {
            agent,
            target: EntityId::from_raw(10),
            damage: 10.0,
        };
        assert_eq!(event.agent(), agent);
    }
}
