//! Build errors for the declarative builder.

use crate::engine::MachineError;
use thiserror::Error;

/// Errors that abort a declarative build.
///
/// All of these are configuration errors: they are raised before any
/// machine escapes the builder, so nothing partial ever reaches the caller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("specification tree is malformed: {0}")]
    MalformedSpec(#[from] serde_json::Error),

    #[error("cannot parse version `{0}` (expected major.minor.patch)")]
    MalformedVersion(String),

    #[error("specification version {spec} is newer than supported version {supported}")]
    UnsupportedVersion { spec: String, supported: String },

    #[error("event `{0}` is already defined")]
    DuplicateEvent(String),

    #[error("state `{0}` is already defined")]
    DuplicateState(String),

    #[error("unknown type `{kind}` for state `{state}` (expected begin or end)")]
    UnknownStateKind { state: String, kind: String },

    #[error("cannot find event `{0}` in the list of defined events")]
    UnknownEvent(String),

    #[error("cannot find state `{0}` in the list of defined states")]
    UnknownState(String),

    #[error("state `{state}` names action `{label}` which is not in the action set")]
    UnknownAction { state: String, label: String },

    #[error(transparent)]
    Machine(#[from] MachineError),
}
