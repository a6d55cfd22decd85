//! World positions.
//!
//! Positions are plain `glam::Vec3` values in world units. The behavior
//! engine itself only passes them through to navigation; the helpers here
//! exist for hosts that move entities around.

pub use glam::Vec3;

/// A point in world space.
pub type Position = Vec3;

/// Euclidean distance between two positions.
#[must_use]
pub fn distance(a: Position, b: Position) -> f32 {
    a.distance(b)
}

/// Moves `from` toward `to` by at most `max_step` units without overshooting.
#[must_use]
pub fn move_towards(from: Position, to: Position, max_step: f32) -> Position {
    let offset = to - from;
    let length = offset.length();
    if length <= max_step || length <= f32::EPSILON {
        to
    } else {
        from + offset / length * max_step.max(0.0)
    }
}
