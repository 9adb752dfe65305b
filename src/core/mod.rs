//! Core domain values: states, events, transitions and the action contract.
//!
//! Everything in this module is an immutable value. States and events are
//! identified by name; a transition ties one event to a pair of states and
//! is consumed by the engine when registered.

pub mod action;
pub mod event;
pub mod state;
pub mod transition;

pub use action::Action;
pub use event::Event;
pub use state::{State, StateKind};
pub use transition::{Target, Transition};
