//! Framework error types.
//!
//! Two very different failures exist in a journey.  An application-level
//! failure is not an error at all: a behavior routes the agent to
//! `Mode::Failed` and it parks like any other journey.  An
//! [`InvariantViolation`] means the itinerary was wired wrong; it is fatal
//! unless the relay runs under `ViolationPolicy::Propagate`.

use thiserror::Error;

use crate::{AgentId, MovementType, StopId};

/// A broken relay invariant.  Always a programming error in the behavior or
/// stop wiring, never a transient condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("agent {agent} was asked to execute stop work with no movement type")]
    UnsetMovement { agent: AgentId },

    #[error("agent {agent} has no destination for a {movement} relay")]
    MissingDestination {
        agent:    AgentId,
        movement: MovementType,
    },

    #[error("agent {agent} has no destination and is not parking (movement {movement})")]
    StrandedWithoutDestination {
        agent:    AgentId,
        movement: MovementType,
    },

    #[error("agent {agent} was routed to {stop}, which is not registered")]
    UnregisteredStop { agent: AgentId, stop: StopId },
}

impl InvariantViolation {
    /// The agent whose journey broke.
    pub fn agent(&self) -> AgentId {
        match *self {
            InvariantViolation::UnsetMovement { agent }
            | InvariantViolation::MissingDestination { agent, .. }
            | InvariantViolation::StrandedWithoutDestination { agent, .. }
            | InvariantViolation::UnregisteredStop { agent, .. } => agent,
        }
    }
}

/// The top-level error type for the `ma-*` crates.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// The violation carried by this error, if it is one.
    pub fn violation(&self) -> Option<InvariantViolation> {
        match self {
            RelayError::Invariant(v) => Some(*v),
            RelayError::Config(_) => None,
        }
    }
}

/// Shorthand result type for all `ma-*` crates.
pub type RelayResult<T> = Result<T, RelayError>;
