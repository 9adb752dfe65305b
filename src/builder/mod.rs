//! Declarative construction of machines from a specification tree.
//!
//! The builder validates an in-memory tree of mappings and lists, with
//! four top-level members (a version string, event names, state
//! descriptors and transition descriptors), into domain values, and
//! returns a populated,
//! unstarted [`Machine`](crate::Machine) together with the declared event
//! list. How that tree is read from storage, and in which concrete syntax,
//! is the caller's business; any format serde can turn into a
//! [`serde_json::Value`] (or directly into a [`MachineSpec`]) works.
//!
//! Validation is all-or-nothing: the first failure aborts the build and no
//! partially-constructed machine is ever returned.

pub mod build;
pub mod error;
pub mod macros;
pub mod spec;
mod version;

pub use build::{BuildOutput, Builder};
pub use error::BuildError;
pub use spec::{MachineSpec, StateSpec, TransitionSpec};
pub use version::SCHEMA_VERSION;
