//! The state machine: transition table, cursor and dispatch points.

use crate::core::{Action, Event, State, StateKind, Target, Transition};
use crate::engine::error::MachineError;
use crate::engine::queue::{ActionQueue, DeferredAction, Handler};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A row of the transition table for one `(state, event)` pair.
enum Edge<A: Action> {
    /// The event moves the cursor to this state.
    To(Arc<State<A>>),
    /// The event is recognized but the move is forbidden.
    Forbidden,
}

/// Per-state table entry: the state itself plus its outgoing edges.
///
/// Keeping the state on a dedicated field (instead of a reserved key in the
/// edge map) means no event name can collide with bookkeeping.
struct StateEntry<A: Action> {
    state: Arc<State<A>>,
    edges: HashMap<String, Edge<A>>,
}

struct Dispatch<A: Action> {
    handler: Handler<A>,
    queue: ActionQueue<A>,
}

/// A finite state machine driven by named events.
///
/// The machine owns a transition table built through [`add`](Self::add) and
/// a cursor over it. The cursor is undefined until [`start`](Self::start)
/// and frozen once an `End`-kind state is reached or [`stop`](Self::stop)
/// is called. All operations are synchronous and must be serialized by the
/// caller; the only concurrency boundary is the [`ActionQueue`].
///
/// # Example
///
/// ```rust
/// use flowstate::{Event, Machine, State, StateKind, Transition};
///
/// let off: State<()> = State::new("OFF", StateKind::Begin);
/// let on: State<()> = State::new("ON", StateKind::Normal);
/// let power_on = Event::new("ON");
///
/// let mut machine = Machine::new();
/// machine.add([Transition::new(power_on.clone(), off, on)])?;
/// machine.start()?;
///
/// assert_eq!(machine.current_name(), "OFF");
/// machine.update(&power_on)?;
/// assert_eq!(machine.current_name(), "ON");
/// # Ok::<(), flowstate::MachineError>(())
/// ```
pub struct Machine<A: Action> {
    states: HashMap<String, StateEntry<A>>,
    current: Option<Arc<State<A>>>,
    has_ended: bool,
    dispatch: Option<Dispatch<A>>,
}

impl<A: Action> Machine<A> {
    /// Create an empty, unstarted machine.
    pub fn new() -> Self {
        Machine {
            states: HashMap::new(),
            current: None,
            // The cursor is undefined until start(); update() is a no-op
            // until then.
            has_ended: true,
            dispatch: None,
        }
    }

    /// Install the action handler and the queue the machine will enqueue to.
    ///
    /// The caller keeps a clone of `queue` and drains it from a consumer
    /// loop. Without this call the machine still transitions, but actions
    /// are dropped with a warning.
    pub fn setup<F>(&mut self, handler: F, queue: ActionQueue<A>)
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.dispatch = Some(Dispatch {
            handler: Arc::new(handler),
            queue,
        });
    }

    /// Register one or more transitions.
    ///
    /// States are registered implicitly the first time they appear.
    /// Re-registering a known state with an identical definition is
    /// idempotent; a differing definition fails with `ConflictingState`,
    /// and mapping a `(state, event)` pair to a second target fails with
    /// `AmbiguousTransition`. On error the table keeps every row added
    /// before the offending transition.
    pub fn add<I>(&mut self, transitions: I) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = Transition<A>>,
    {
        for transition in transitions {
            self.add_transition(transition)?;
        }
        Ok(())
    }

    /// Register a single transition. See [`add`](Self::add).
    pub fn add_transition(&mut self, transition: Transition<A>) -> Result<(), MachineError> {
        let (event, begin, target) = transition.into_parts();

        let edge = match target {
            Target::State(end) => Edge::To(self.register(end)?),
            Target::Forbidden => Edge::Forbidden,
        };
        self.register(begin.clone())?;

        let entry = self
            .states
            .get_mut(begin.name())
            .ok_or_else(|| MachineError::ConflictingState(begin.name().to_string()))?;

        match entry.edges.get(event.name()) {
            Some(existing) if edges_agree(existing, &edge) => {}
            Some(_) => {
                return Err(MachineError::AmbiguousTransition {
                    state: begin.name().to_string(),
                    event: event.name().to_string(),
                })
            }
            None => {
                entry.edges.insert(event.name().to_string(), edge);
            }
        }
        Ok(())
    }

    /// Place the cursor on the unique `Begin`-kind state.
    ///
    /// Fails if zero or more than one `Begin` state is registered; the
    /// cursor is untouched on failure.
    pub fn start(&mut self) -> Result<(), MachineError> {
        let begin = self.unique_state(StateKind::Begin)?;
        debug!(state = begin.name(), "machine started");
        self.current = Some(begin);
        self.has_ended = false;
        Ok(())
    }

    /// Force the cursor onto the unique `End`-kind state.
    ///
    /// This is the abort primitive: it bypasses transition validation,
    /// dispatches no actions and does not drain already-enqueued ones.
    /// Fails if zero or more than one `End` state is registered.
    pub fn stop(&mut self) -> Result<(), MachineError> {
        let end = self.unique_state(StateKind::End)?;
        debug!(state = end.name(), "machine stopped");
        self.current = Some(end);
        self.has_ended = true;
        Ok(())
    }

    /// Drive the machine with an event.
    ///
    /// A no-op once the machine has ended (or before `start()`). Otherwise
    /// the event must appear in the current state's outgoing edges:
    /// absent fails with `UndefinedEvent`, forbidden with
    /// `InvalidTransition`, and either way the cursor and queue are left
    /// untouched. On success the current state's exit action is enqueued,
    /// the cursor moves, the target's enter action is enqueued, and
    /// reaching an `End`-kind state freezes the machine.
    pub fn update(&mut self, event: &Event) -> Result<(), MachineError> {
        if self.has_ended {
            trace!(event = event.name(), "machine has ended, event ignored");
            return Ok(());
        }
        let Some(current) = self.current.clone() else {
            return Ok(());
        };

        let edge = self
            .states
            .get(current.name())
            .and_then(|entry| entry.edges.get(event.name()));
        let next = match edge {
            None => {
                return Err(MachineError::UndefinedEvent {
                    state: current.name().to_string(),
                    event: event.name().to_string(),
                })
            }
            Some(Edge::Forbidden) => {
                return Err(MachineError::InvalidTransition {
                    state: current.name().to_string(),
                    event: event.name().to_string(),
                })
            }
            Some(Edge::To(next)) => Arc::clone(next),
        };

        // Validation passed; the move is committed from here on.
        if let Some(action) = current.exit() {
            self.enqueue(action);
        }
        debug!(
            from = current.name(),
            to = next.name(),
            event = event.name(),
            "transition"
        );
        if let Some(action) = next.enter() {
            self.enqueue(action);
        }
        if next.kind() == StateKind::End {
            self.has_ended = true;
        }
        self.current = Some(next);
        Ok(())
    }

    /// The current state's name, or `""` before `start()`.
    pub fn current_name(&self) -> &str {
        self.current.as_deref().map(State::name).unwrap_or("")
    }

    /// The current state, if the machine has been started.
    pub fn current(&self) -> Option<&State<A>> {
        self.current.as_deref()
    }

    /// Whether the machine has ended (or was never started).
    pub fn has_ended(&self) -> bool {
        self.has_ended
    }

    /// Whether some event moves the cursor from the current state to the
    /// named target. Always `false` before `start()`.
    pub fn can(&self, target: &str) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        self.states
            .get(current.name())
            .is_some_and(|entry| {
                entry
                    .edges
                    .values()
                    .any(|edge| matches!(edge, Edge::To(next) if next.name() == target))
            })
    }

    /// The exact negation of [`can`](Self::can).
    pub fn cannot(&self, target: &str) -> bool {
        !self.can(target)
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Register a state, returning the canonical shared copy.
    fn register(&mut self, state: State<A>) -> Result<Arc<State<A>>, MachineError> {
        match self.states.get(state.name()) {
            Some(entry) if *entry.state == state => Ok(Arc::clone(&entry.state)),
            Some(_) => Err(MachineError::ConflictingState(state.name().to_string())),
            None => {
                let state = Arc::new(state);
                self.states.insert(
                    state.name().to_string(),
                    StateEntry {
                        state: Arc::clone(&state),
                        edges: HashMap::new(),
                    },
                );
                Ok(state)
            }
        }
    }

    /// The single registered state of the given kind, or a setup error.
    fn unique_state(&self, kind: StateKind) -> Result<Arc<State<A>>, MachineError> {
        let mut found: Vec<&Arc<State<A>>> = self
            .states
            .values()
            .filter(|entry| entry.state.kind() == kind)
            .map(|entry| &entry.state)
            .collect();

        match (found.len(), kind) {
            (1, _) => Ok(Arc::clone(found.remove(0))),
            (0, StateKind::Begin) => Err(MachineError::NoBeginState),
            (n, StateKind::Begin) => Err(MachineError::MultipleBeginStates(n)),
            (0, _) => Err(MachineError::NoEndState),
            (n, _) => Err(MachineError::MultipleEndStates(n)),
        }
    }

    fn enqueue(&self, action: &A) {
        match &self.dispatch {
            Some(dispatch) => {
                trace!(?action, "action enqueued");
                dispatch.queue.push(DeferredAction::new(
                    action.clone(),
                    Arc::clone(&dispatch.handler),
                ));
            }
            None => warn!(?action, "no handler configured, action dropped"),
        }
    }
}

impl<A: Action> Default for Machine<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> fmt::Debug for Machine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current_name())
            .field("has_ended", &self.has_ended)
            .field("states", &self.states.len())
            .finish_non_exhaustive()
    }
}

fn edges_agree<A: Action>(a: &Edge<A>, b: &Edge<A>) -> bool {
    match (a, b) {
        (Edge::Forbidden, Edge::Forbidden) => true,
        (Edge::To(left), Edge::To(right)) => left.name() == right.name(),
        _ => false,
    }
}
