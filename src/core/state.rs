//! States and their classification.

use crate::core::action::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification controlling where a machine may start and terminate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum StateKind {
    /// The machine's starting position. Exactly one per machine.
    Begin,
    /// An ordinary intermediate state.
    Normal,
    /// A terminal state; reaching it (or forcing it via `stop()`) freezes
    /// the machine.
    End,
}

/// A named position in the state graph.
///
/// A state may carry an enter action and an exit action, enqueued for
/// deferred execution when the cursor arrives at or leaves the state. States
/// are immutable once registered with an engine.
///
/// # Example
///
/// ```rust
/// use flowstate::{action_enum, State, StateKind};
///
/// action_enum! {
///     enum Effect {
///         WarmUp,
///         CoolDown,
///     }
/// }
///
/// let state = State::new("ON", StateKind::Normal)
///     .on_enter(Effect::WarmUp)
///     .on_exit(Effect::CoolDown);
///
/// assert_eq!(state.name(), "ON");
/// assert_eq!(state.enter(), Some(&Effect::WarmUp));
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct State<A: Action> {
    name: String,
    kind: StateKind,
    enter: Option<A>,
    exit: Option<A>,
}

impl<A: Action> State<A> {
    /// Create a state with no actions attached.
    pub fn new(name: impl Into<String>, kind: StateKind) -> Self {
        State {
            name: name.into(),
            kind,
            enter: None,
            exit: None,
        }
    }

    /// Attach the action enqueued when the cursor enters this state.
    pub fn on_enter(mut self, action: A) -> Self {
        self.enter = Some(action);
        self
    }

    /// Attach the action enqueued when the cursor leaves this state.
    pub fn on_exit(mut self, action: A) -> Self {
        self.exit = Some(action);
        self
    }

    /// The state's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The state's classification.
    pub fn kind(&self) -> StateKind {
        self.kind
    }

    /// The enter action, if any.
    pub fn enter(&self) -> Option<&A> {
        self.enter.as_ref()
    }

    /// The exit action, if any.
    pub fn exit(&self) -> Option<&A> {
        self.exit.as_ref()
    }
}

impl<A: Action> fmt::Display for State<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
