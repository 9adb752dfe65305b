//! The action contract shared by the engine and the builder.
//!
//! Actions are not executable code: they are values describing a side effect
//! the owning application will perform later, after the transition that
//! produced them has already completed. Modelling them as a closed
//! enumeration (rather than free-form strings) means the declarative builder
//! can reject a specification that names an action the application does not
//! implement.

use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Marker trait for application-defined action enumerations.
///
/// The builder resolves the textual labels found in a specification tree
/// into this type through serde, so any enum deriving `Deserialize` (plus
/// the usual value traits) qualifies. The [`action_enum!`](crate::action_enum)
/// macro declares a conforming enum with snake_case label renaming.
///
/// # Example
///
/// ```rust
/// use flowstate::action_enum;
///
/// action_enum! {
///     pub enum RadioAction {
///         PowerOn,
///         PowerOff,
///     }
/// }
///
/// // Specification label "power_on" resolves to RadioAction::PowerOn.
/// let action: RadioAction = serde_json::from_value("power_on".into()).unwrap();
/// assert_eq!(action, RadioAction::PowerOn);
/// ```
pub trait Action:
    Clone + Debug + PartialEq + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> Action for T where
    T: Clone + Debug + PartialEq + DeserializeOwned + Send + Sync + 'static
{
}
