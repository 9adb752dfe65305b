//! Engine errors.

use thiserror::Error;

/// Errors raised by [`Machine`](crate::Machine) operations.
///
/// The first five variants are setup or configuration failures and should
/// abort initialization. `UndefinedEvent` and `InvalidTransition` are
/// recoverable: the machine is left in its pre-call state and may keep
/// being driven.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum MachineError {
    #[error("machine has no begin state")]
    NoBeginState,

    #[error("machine has {0} begin states, expected exactly one")]
    MultipleBeginStates(usize),

    #[error("machine has no end state")]
    NoEndState,

    #[error("machine has {0} end states, expected exactly one")]
    MultipleEndStates(usize),

    #[error("state `{0}` is already registered with a different definition")]
    ConflictingState(String),

    #[error("state `{state}` already maps event `{event}` to a different target")]
    AmbiguousTransition { state: String, event: String },

    #[error("event `{event}` is not defined for the current state `{state}`")]
    UndefinedEvent { state: String, event: String },

    #[error("invalid transition for state `{state}` and event `{event}`")]
    InvalidTransition { state: String, event: String },
}
