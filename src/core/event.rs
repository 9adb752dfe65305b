//! Named events that drive the machine forward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable, named stimulus.
///
/// Events carry no payload; their name is their identity, compared
/// case-sensitively. The same event value may appear in any number of
/// transitions.
///
/// # Example
///
/// ```rust
/// use flowstate::Event;
///
/// let power_on = Event::new("ON");
/// assert_eq!(power_on.name(), "ON");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Event {
    name: String,
}

impl Event {
    /// Create an event with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Event { name: name.into() }
    }

    /// The event's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_name_is_stable() {
        let event = Event::new("READY");
        assert_eq!(event.name(), "READY");
        assert_eq!(event.to_string(), "READY");
    }

    #[test]
    fn events_compare_by_name_case_sensitively() {
        assert_eq!(Event::new("ON"), Event::new("ON"));
        assert_ne!(Event::new("ON"), Event::new("on"));
    }
}
