//! The builder: validates a specification into a ready-to-start machine.

use crate::builder::error::BuildError;
use crate::builder::spec::MachineSpec;
use crate::builder::version::{pack, SCHEMA_VERSION};
use crate::core::{Action, Event, State, StateKind, Transition};
use crate::engine::Machine;
use std::collections::HashMap;
use tracing::debug;

/// What a successful build produces.
///
/// The machine is fully populated and unstarted. `events` lists the
/// declared events in declaration order, for convenient reference by the
/// driving loop; the machine itself does not need it.
#[derive(Debug)]
pub struct BuildOutput<A: Action> {
    pub machine: Machine<A>,
    pub events: Vec<Event>,
}

/// Builds a [`Machine`] from a [`MachineSpec`].
///
/// Validation runs in a fixed order (version gate, events, states,
/// transitions) and the first failure aborts the whole build. The type
/// parameter `A` is the application's closed action enumeration; every
/// non-empty `enter`/`exit` label in the specification must resolve into
/// it.
///
/// # Example
///
/// ```rust
/// use flowstate::{action_enum, ActionQueue, Builder};
/// use serde_json::json;
///
/// action_enum! {
///     enum RadioAction {
///         PowerOn,
///     }
/// }
///
/// let output = Builder::<RadioAction>::from_value(json!({
///     "Version": "1.0.0",
///     "Events": ["ON"],
///     "States": [
///         { "name": "OFF", "type": "begin" },
///         { "name": "ON", "enter": "power_on" },
///     ],
///     "Transitions": [
///         { "event": "ON", "begin": "OFF", "end": "ON" },
///     ],
/// }))?
/// .build()?;
///
/// let mut machine = output.machine;
/// machine.start()?;
/// machine.update(&output.events[0])?;
/// assert_eq!(machine.current_name(), "ON");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Builder<A: Action> {
    spec: MachineSpec,
    events: HashMap<String, Event>,
    order: Vec<Event>,
    states: HashMap<String, State<A>>,
    transitions: Vec<Transition<A>>,
}

impl<A: Action> Builder<A> {
    /// Create a builder over an already-typed specification.
    pub fn new(spec: MachineSpec) -> Self {
        Builder {
            spec,
            events: HashMap::new(),
            order: Vec::new(),
            states: HashMap::new(),
            transitions: Vec::new(),
        }
    }

    /// Create a builder from a generic tree of mappings and lists.
    pub fn from_value(tree: serde_json::Value) -> Result<Self, BuildError> {
        Ok(Self::new(serde_json::from_value(tree)?))
    }

    /// Validate the specification and produce the machine.
    pub fn build(mut self) -> Result<BuildOutput<A>, BuildError> {
        self.check_version()?;
        self.build_events()?;
        self.build_states()?;
        self.build_transitions()?;

        let mut machine = Machine::new();
        machine.add(std::mem::take(&mut self.transitions))?;

        debug!(
            events = self.order.len(),
            states = machine.state_count(),
            transitions = self.spec.transitions.len(),
            "machine built"
        );
        Ok(BuildOutput {
            machine,
            events: self.order,
        })
    }

    /// Reject specifications newer than this builder.
    fn check_version(&self) -> Result<(), BuildError> {
        if pack(&self.spec.version)? > pack(SCHEMA_VERSION)? {
            return Err(BuildError::UnsupportedVersion {
                spec: self.spec.version.clone(),
                supported: SCHEMA_VERSION.to_string(),
            });
        }
        Ok(())
    }

    fn build_events(&mut self) -> Result<(), BuildError> {
        for name in &self.spec.events {
            if self.events.contains_key(name) {
                return Err(BuildError::DuplicateEvent(name.clone()));
            }
            let event = Event::new(name.clone());
            self.events.insert(name.clone(), event.clone());
            self.order.push(event);
        }
        Ok(())
    }

    fn build_states(&mut self) -> Result<(), BuildError> {
        for descriptor in &self.spec.states {
            if self.states.contains_key(&descriptor.name) {
                return Err(BuildError::DuplicateState(descriptor.name.clone()));
            }

            let kind = match descriptor.kind.as_deref() {
                None => StateKind::Normal,
                Some(label) => match label.to_ascii_lowercase().as_str() {
                    "begin" => StateKind::Begin,
                    "end" => StateKind::End,
                    _ => {
                        return Err(BuildError::UnknownStateKind {
                            state: descriptor.name.clone(),
                            kind: label.to_string(),
                        })
                    }
                },
            };

            let mut state = State::new(descriptor.name.clone(), kind);
            if let Some(action) = resolve_action::<A>(&descriptor.name, descriptor.enter.as_deref())? {
                state = state.on_enter(action);
            }
            if let Some(action) = resolve_action::<A>(&descriptor.name, descriptor.exit.as_deref())? {
                state = state.on_exit(action);
            }
            self.states.insert(descriptor.name.clone(), state);
        }
        Ok(())
    }

    fn build_transitions(&mut self) -> Result<(), BuildError> {
        for descriptor in &self.spec.transitions {
            let event = self
                .events
                .get(&descriptor.event)
                .ok_or_else(|| BuildError::UnknownEvent(descriptor.event.clone()))?;
            let begin = self
                .states
                .get(&descriptor.begin)
                .ok_or_else(|| BuildError::UnknownState(descriptor.begin.clone()))?;
            let end = self
                .states
                .get(&descriptor.end)
                .ok_or_else(|| BuildError::UnknownState(descriptor.end.clone()))?;

            self.transitions
                .push(Transition::new(event.clone(), begin.clone(), end.clone()));
        }
        Ok(())
    }
}

/// Resolve a textual label into the action set, treating empty and absent
/// labels as "no action".
fn resolve_action<A: Action>(state: &str, label: Option<&str>) -> Result<Option<A>, BuildError> {
    match label {
        None | Some("") => Ok(None),
        Some(label) => serde_json::from_value(serde_json::Value::String(label.to_string()))
            .map(Some)
            .map_err(|_| BuildError::UnknownAction {
                state: state.to_string(),
                label: label.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::action_enum! {
        enum RadioAction {
            PowerOn,
            PowerOff,
            Retune,
        }
    }

    fn radio_tree() -> serde_json::Value {
        json!({
            "Version": "1.0.0",
            "Events": ["ON", "READY", "OFF"],
            "States": [
                { "name": "OFF", "type": "begin", "enter": "power_off" },
                { "name": "ON", "enter": "power_on", "exit": "retune" },
                { "name": "READY" },
            ],
            "Transitions": [
                { "event": "ON", "begin": "OFF", "end": "ON" },
                { "event": "READY", "begin": "ON", "end": "READY" },
                { "event": "OFF", "begin": "READY", "end": "OFF" },
            ],
        })
    }

    #[test]
    fn builds_a_runnable_machine() {
        let output = Builder::<RadioAction>::from_value(radio_tree())
            .unwrap()
            .build()
            .unwrap();

        let mut machine = output.machine;
        assert_eq!(machine.state_count(), 3);
        machine.start().unwrap();
        assert_eq!(machine.current_name(), "OFF");

        machine.update(&output.events[0]).unwrap();
        assert_eq!(machine.current_name(), "ON");
    }

    #[test]
    fn build_results_are_debuggable() {
        // Both sides of the build Result render, so asserting on either
        // variant works in tests.
        let output = Builder::<RadioAction>::from_value(radio_tree())
            .unwrap()
            .build()
            .unwrap();
        let rendered = format!("{output:?}");
        assert!(rendered.contains("BuildOutput"));
        assert!(rendered.contains("ON"));

        let builder = Builder::<RadioAction>::from_value(radio_tree()).unwrap();
        assert!(format!("{builder:?}").contains("Builder"));
    }

    #[test]
    fn event_order_follows_declaration_order() {
        let output = Builder::<RadioAction>::from_value(radio_tree())
            .unwrap()
            .build()
            .unwrap();

        let names: Vec<&str> = output.events.iter().map(Event::name).collect();
        assert_eq!(names, ["ON", "READY", "OFF"]);
    }

    #[test]
    fn version_gate_rejects_newer_specifications() {
        let mut tree = radio_tree();
        tree["Version"] = json!("99.0.0");

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedVersion { .. }));
    }

    #[test]
    fn older_specifications_are_accepted() {
        let mut tree = radio_tree();
        tree["Version"] = json!("0.9.7");

        assert!(Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .is_ok());
    }

    #[test]
    fn malformed_version_is_rejected() {
        let mut tree = radio_tree();
        tree["Version"] = json!("1.0");

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedVersion(_)));
    }

    #[test]
    fn oversized_version_components_are_rejected() {
        let mut tree = radio_tree();
        tree["Version"] = json!("281474976710656.0.0");

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedVersion(_)));
    }

    #[test]
    fn duplicate_event_aborts_the_build() {
        let mut tree = radio_tree();
        tree["Events"] = json!(["ON", "ON"]);

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateEvent(name) if name == "ON"));
    }

    #[test]
    fn duplicate_state_aborts_the_build() {
        let mut tree = radio_tree();
        tree["States"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "name": "OFF" }));

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateState(name) if name == "OFF"));
    }

    #[test]
    fn unknown_state_type_aborts_the_build() {
        let mut tree = radio_tree();
        tree["States"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "name": "LIMBO", "type": "middle" }));

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownStateKind { kind, .. } if kind == "middle"));
    }

    #[test]
    fn state_type_labels_are_case_insensitive() {
        let mut tree = radio_tree();
        tree["States"][0]["type"] = json!("Begin");

        let output = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap();
        let mut machine = output.machine;
        machine.start().unwrap();
        assert_eq!(machine.current_name(), "OFF");
    }

    #[test]
    fn unresolved_event_reference_aborts_the_build() {
        let mut tree = radio_tree();
        tree["Transitions"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "event": "BOOM", "begin": "OFF", "end": "ON" }));

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownEvent(name) if name == "BOOM"));
    }

    #[test]
    fn unresolved_state_reference_aborts_the_build() {
        let mut tree = radio_tree();
        tree["Transitions"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "event": "ON", "begin": "OFF", "end": "NOWHERE" }));

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownState(name) if name == "NOWHERE"));
    }

    #[test]
    fn unknown_action_label_aborts_the_build() {
        let mut tree = radio_tree();
        tree["States"][1]["enter"] = json!("explode");

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(
            matches!(err, BuildError::UnknownAction { state, label }
                if state == "ON" && label == "explode")
        );
    }

    #[test]
    fn empty_action_label_means_no_action() {
        let mut tree = radio_tree();
        tree["States"][1]["enter"] = json!("");

        let output = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap();
        // READY has no actions either way; the build simply succeeds with
        // ON's enter action gone.
        assert_eq!(output.events.len(), 3);
    }

    #[test]
    fn missing_top_level_member_is_a_malformed_spec() {
        let err = Builder::<RadioAction>::from_value(json!({
            "Version": "1.0.0",
            "Events": ["ON"],
            "Transitions": [],
        }))
        .unwrap_err();
        assert!(matches!(err, BuildError::MalformedSpec(_)));
    }

    #[test]
    fn conflicting_spec_transitions_surface_as_machine_errors() {
        let mut tree = radio_tree();
        tree["Transitions"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "event": "ON", "begin": "OFF", "end": "READY" }));

        let err = Builder::<RadioAction>::from_value(tree)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::Machine(_)));
    }
}
