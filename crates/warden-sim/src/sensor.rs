//! Distance-based perception.
//!
//! Works like a pair of trigger volumes around the guardian: a wide sight
//! sphere and a small reach sphere. Only enter and exit edges are reported.

use warden_common::{distance, Position};

/// Perception edges produced by one sensor update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorChange {
    /// `Some(true)` when the target entered sight, `Some(false)` when it left
    pub sight: Option<bool>,
    /// `Some(true)` when the target entered reach, `Some(false)` when it left
    pub reach: Option<bool>,
}

impl SensorChange {
    /// Checks if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sight.is_none() && self.reach.is_none()
    }
}

/// Edge-triggered sight and reach sensor.
#[derive(Debug, Clone)]
pub struct ProximitySensor {
    sight_radius: f32,
    reach_radius: f32,
    in_sight: bool,
    in_reach: bool,
}

impl ProximitySensor {
    /// Creates a sensor with nothing inside it.
    #[must_use]
    pub fn new(sight_radius: f32, reach_radius: f32) -> Self {
        Self {
            sight_radius,
            reach_radius,
            in_sight: false,
            in_reach: false,
        }
    }

    /// Whether the target is currently in sight.
    #[must_use]
    pub fn in_sight(&self) -> bool {
        self.in_sight
    }

    /// Whether the target is currently in reach.
    #[must_use]
    pub fn in_reach(&self) -> bool {
        self.in_reach
    }

    /// Re-evaluates the volumes. A missing target counts as outside both.
    pub fn update(&mut self, observer: Position, target: Option<Position>) -> SensorChange {
        let gap = target.map(|target| distance(observer, target));
        let in_sight = gap.is_some_and(|gap| gap <= self.sight_radius);
        let in_reach = gap.is_some_and(|gap| gap <= self.reach_radius);

        let change = SensorChange {
            sight: (in_sight != self.in_sight).then_some(in_sight),
            reach: (in_reach != self.in_reach).then_some(in_reach),
        };
        self.in_sight = in_sight;
        self.in_reach = in_reach;
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_exit_edges() {
        let mut sensor = ProximitySensor::new(10.0, 2.0);
        let observer = Position::ZERO;

        let change = sensor.update(observer, Some(Position::new(5.0, 0.0, 0.0)));
        assert_eq!(change.sight, Some(true));
        assert_eq!(change.reach, None);

        // Staying inside reports nothing
        assert!(sensor
            .update(observer, Some(Position::new(6.0, 0.0, 0.0)))
            .is_empty());

        let change = sensor.update(observer, Some(Position::new(1.0, 0.0, 0.0)));
        assert_eq!(change.reach, Some(true));
        assert_eq!(change.sight, None);

        let change = sensor.update(observer, Some(Position::new(20.0, 0.0, 0.0)));
        assert_eq!(change.sight, Some(false));
        assert_eq!(change.reach, Some(false));
    }

    #[test]
    fn test_missing_target_exits_volumes() {
        let mut sensor = ProximitySensor::new(10.0, 2.0);
        sensor.update(Position::ZERO, Some(Position::X));
        assert!(sensor.in_sight());
        assert!(sensor.in_reach());

        let change = sensor.update(Position::ZERO, None);
        assert_eq!(change.sight, Some(false));
        assert_eq!(change.reach, Some(false));
        assert!(!sensor.in_sight());
    }
}
