//! Straight-line movement for guardians.

use warden_ai::NavigationAgent;
use warden_common::{distance, move_towards, Position};

/// How far inside the stopping distance a body comes to rest.
const ARRIVAL_SLACK: f32 = 1e-3;

/// Moves its body straight toward the destination at the pushed speed.
///
/// There are no obstacles in the arena, so the path is always the segment
/// between the body and the destination.
#[derive(Debug, Clone)]
pub struct StraightLineNavigator {
    position: Position,
    destination: Option<Position>,
    speed: f32,
    stopping_distance: f32,
}

impl StraightLineNavigator {
    /// Creates a navigator standing still at `position`.
    #[must_use]
    pub fn new(position: Position, stopping_distance: f32) -> Self {
        Self {
            position,
            destination: None,
            speed: 0.0,
            stopping_distance,
        }
    }

    /// Current body position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current destination, if any.
    #[must_use]
    pub fn destination(&self) -> Option<Position> {
        self.destination
    }

    /// Current speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Moves the body for one step.
    pub fn step(&mut self, dt: f32) {
        let Some(destination) = self.destination else {
            return;
        };
        let remaining = distance(self.position, destination);
        if remaining <= self.stopping_distance {
            return;
        }
        let travel = (self.speed * dt).min(remaining - self.stopping_distance + ARRIVAL_SLACK);
        self.position = move_towards(self.position, destination, travel);
    }
}

impl NavigationAgent for StraightLineNavigator {
    fn set_destination(&mut self, destination: Position) {
        self.destination = Some(destination);
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map_or(0.0, |destination| distance(self.position, destination))
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stands_still_without_destination() {
        let mut nav = StraightLineNavigator::new(Position::ZERO, 0.5);
        nav.set_speed(5.0);
        nav.step(1.0);
        assert_eq!(nav.position(), Position::ZERO);
        assert_eq!(nav.remaining_distance(), 0.0);
    }

    #[test]
    fn test_moves_at_speed() {
        let mut nav = StraightLineNavigator::new(Position::ZERO, 0.5);
        nav.set_destination(Position::new(10.0, 0.0, 0.0));
        nav.set_speed(2.0);
        nav.step(1.0);
        assert!((nav.position().x - 2.0).abs() < 1e-5);
        assert!((nav.remaining_distance() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_stops_at_stopping_distance() {
        let mut nav = StraightLineNavigator::new(Position::ZERO, 0.5);
        nav.set_destination(Position::new(3.0, 0.0, 0.0));
        nav.set_speed(10.0);
        nav.step(1.0);
        assert!((nav.remaining_distance() - 0.5).abs() < 1e-2);
        assert!(nav.remaining_distance() <= nav.stopping_distance());
    }

    #[test]
    fn test_zero_speed_holds_position() {
        let mut nav = StraightLineNavigator::new(Position::ZERO, 0.5);
        nav.set_destination(Position::new(3.0, 0.0, 0.0));
        nav.set_speed(0.0);
        nav.step(1.0);
        assert_eq!(nav.position(), Position::ZERO);
    }
}
