//! Macros for declaring action sets.

/// Declare an application action enumeration.
///
/// Expands to an enum with the derives the builder relies on (`Clone`,
/// `PartialEq`, `Eq`, `Debug`, serde's `Serialize`/`Deserialize`) and
/// snake_case label renaming, so a specification label `warm_up` resolves
/// to a variant `WarmUp`.
///
/// # Example
///
/// ```
/// use flowstate::action_enum;
///
/// action_enum! {
///     pub enum RadioAction {
///         PowerOn,
///         PowerOff,
///         Swap,
///     }
/// }
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }
    };
}
