//! # Warden Common
//!
//! Shared building blocks for the Warden crates:
//! - Entity identifiers used to reference agents and their targets
//! - World positions and the small amount of vector math hosts need
//! - Configuration error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod position;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::position::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert!(id1.is_valid());
    }

    #[test]
    fn test_prelude_position_math() {
        let from = Position::ZERO;
        let to = Position::new(3.0, 0.0, 4.0);
        assert!((distance(from, to) - 5.0).abs() < 1e-5);
    }
}
