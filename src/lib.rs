//! Flowstate: a declarative finite state machine engine
//!
//! Flowstate drives a single active state forward in response to named
//! events, and decouples *what changed* (the transition) from *what effect
//! that has* (application-defined actions) through a deferred-action queue.
//! Machines are either assembled by hand from transitions or validated out
//! of a declarative specification tree by the [`Builder`].
//!
//! # Core Concepts
//!
//! - **States** carry a kind (`Begin`/`Normal`/`End`) plus optional enter
//!   and exit actions from a closed, application-defined [`Action`] set
//! - **Events** are named stimuli fed into [`Machine::update`]
//! - **Deferred actions** are enqueued during a transition and executed
//!   later by a consumer loop, which may feed a continuation event back
//!
//! # Example
//!
//! ```rust
//! use flowstate::{action_enum, ActionQueue, Builder};
//! use serde_json::json;
//!
//! action_enum! {
//!     enum RadioAction {
//!         PowerOn,
//!         PowerOff,
//!     }
//! }
//!
//! let output = Builder::<RadioAction>::from_value(json!({
//!     "Version": "1.0.0",
//!     "Events": ["ON", "OFF"],
//!     "States": [
//!         { "name": "OFF", "type": "begin", "enter": "power_off" },
//!         { "name": "ON", "enter": "power_on" },
//!         { "name": "HALT", "type": "end" },
//!     ],
//!     "Transitions": [
//!         { "event": "ON", "begin": "OFF", "end": "ON" },
//!         { "event": "OFF", "begin": "ON", "end": "HALT" },
//!     ],
//! }))?
//! .build()?;
//!
//! let mut machine = output.machine;
//! let queue = ActionQueue::new();
//! machine.setup(|action: &RadioAction| *action == RadioAction::PowerOn, queue.clone());
//!
//! machine.start()?;
//! machine.update(&output.events[0])?; // OFF -> ON
//! assert_eq!(machine.current_name(), "ON");
//!
//! // Consumer loop: execute deferred actions, honoring continuation
//! // requests.
//! while let Some(work) = queue.pop() {
//!     let _wants_continuation = work.run();
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, BuildOutput, Builder, MachineSpec, StateSpec, TransitionSpec,
    SCHEMA_VERSION};
pub use core::{Action, Event, State, StateKind, Target, Transition};
pub use engine::{ActionQueue, DeferredAction, Machine, MachineError};
