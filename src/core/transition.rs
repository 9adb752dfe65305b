//! Transitions: one event moving the cursor between two states.

use crate::core::action::Action;
use crate::core::event::Event;
use crate::core::state::State;

/// Where a transition leads.
#[derive(Clone, PartialEq, Debug)]
pub enum Target<A: Action> {
    /// The transition moves the cursor to this state.
    State(State<A>),
    /// The event is recognized in the source state but the move is
    /// forbidden. Distinct from the event being unknown there.
    Forbidden,
}

/// An `(event, begin state, end state)` triple.
///
/// Transitions are consumed by [`Machine::add`](crate::Machine::add); after
/// registration their information lives on as rows in the engine's
/// transition table.
///
/// # Example
///
/// ```rust
/// use flowstate::{Event, State, StateKind, Transition};
///
/// let off: State<()> = State::new("OFF", StateKind::Begin);
/// let on: State<()> = State::new("ON", StateKind::Normal);
///
/// let transition = Transition::new(Event::new("ON"), off, on);
/// assert_eq!(transition.event().name(), "ON");
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Transition<A: Action> {
    event: Event,
    begin: State<A>,
    target: Target<A>,
}

impl<A: Action> Transition<A> {
    /// A transition from `begin` to `end`, triggered by `event`.
    pub fn new(event: Event, begin: State<A>, end: State<A>) -> Self {
        Transition {
            event,
            begin,
            target: Target::State(end),
        }
    }

    /// Mark `event` as recognized but forbidden in `begin`.
    ///
    /// Updating the machine with such an event fails with
    /// `InvalidTransition` instead of `UndefinedEvent`.
    pub fn forbidden(event: Event, begin: State<A>) -> Self {
        Transition {
            event,
            begin,
            target: Target::Forbidden,
        }
    }

    /// The triggering event.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// The source state.
    pub fn begin(&self) -> &State<A> {
        &self.begin
    }

    /// The destination.
    pub fn target(&self) -> &Target<A> {
        &self.target
    }

    pub(crate) fn into_parts(self) -> (Event, State<A>, Target<A>) {
        (self.event, self.begin, self.target)
    }
}
