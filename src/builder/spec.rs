//! Serde data model of the specification tree.
//!
//! This is the shape the builder requires; the concrete serialization
//! syntax and how it is read from storage belong to the caller. Top-level
//! member names are capitalized, matching the on-disk convention of the
//! definition files this format descends from.

use serde::{Deserialize, Serialize};

/// The four top-level members of a machine specification.
///
/// # Example
///
/// ```rust
/// use flowstate::MachineSpec;
/// use serde_json::json;
///
/// let spec: MachineSpec = serde_json::from_value(json!({
///     "Version": "1.0.0",
///     "Events": ["ON", "OFF"],
///     "States": [
///         { "name": "OFF", "type": "begin" },
///         { "name": "ON" },
///     ],
///     "Transitions": [
///         { "event": "ON", "begin": "OFF", "end": "ON" },
///     ],
/// })).unwrap();
///
/// assert_eq!(spec.events.len(), 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineSpec {
    /// Schema version of this specification, `major.minor.patch`.
    #[serde(rename = "Version")]
    pub version: String,

    /// Declared event names, in order.
    #[serde(rename = "Events")]
    pub events: Vec<String>,

    /// Declared states.
    #[serde(rename = "States")]
    pub states: Vec<StateSpec>,

    /// Declared transitions.
    #[serde(rename = "Transitions")]
    pub transitions: Vec<TransitionSpec>,
}

/// One state descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateSpec {
    /// Unique state name.
    pub name: String,

    /// `begin`, `end` (case-insensitive) or absent for a normal state.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Label of the action enqueued on entering the state.
    #[serde(default)]
    pub enter: Option<String>,

    /// Label of the action enqueued on leaving the state.
    #[serde(default)]
    pub exit: Option<String>,
}

/// One transition descriptor; all three fields are name references.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub event: String,
    pub begin: String,
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_state_fields_default_to_absent() {
        let state: StateSpec = serde_json::from_value(json!({ "name": "IDLE" })).unwrap();
        assert_eq!(state.name, "IDLE");
        assert!(state.kind.is_none());
        assert!(state.enter.is_none());
        assert!(state.exit.is_none());
    }

    #[test]
    fn missing_top_level_member_fails_deserialization() {
        let result: Result<MachineSpec, _> = serde_json::from_value(json!({
            "Version": "1.0.0",
            "Events": [],
            "States": [],
        }));
        assert!(result.is_err());
    }

    #[test]
    fn state_without_a_name_fails_deserialization() {
        let result: Result<StateSpec, _> =
            serde_json::from_value(json!({ "type": "begin" }));
        assert!(result.is_err());
    }
}
