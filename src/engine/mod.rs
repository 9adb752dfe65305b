//! The transition engine: table, cursor and deferred-action dispatch.
//!
//! The engine is synchronous and single-threaded; `update()` validates,
//! moves the cursor and enqueues actions, but never executes them. The
//! [`ActionQueue`] is the one concurrency boundary: the engine is its sole
//! producer, consumers drain it at their own pace.

pub mod error;
pub mod machine;
pub mod queue;

pub use error::MachineError;
pub use machine::Machine;
pub use queue::{ActionQueue, DeferredAction};
