//! Error types for agent construction and roster operations.

use thiserror::Error;
use warden_common::{ConfigError, EntityId};

/// Error types for agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Agent was created without any patrol checkpoints
    #[error("Agent requires at least one patrol checkpoint")]
    NoCheckpoints,
    /// Agent configuration failed validation
    #[error("Invalid agent configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// Agent not found in the roster
    #[error("Agent not found: {0}")]
    NotFound(EntityId),
    /// Agent already registered in the roster
    #[error("Agent already registered: {0}")]
    AlreadyRegistered(EntityId),
}

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;
