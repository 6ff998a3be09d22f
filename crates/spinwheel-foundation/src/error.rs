//! Contract violations raised by the picker engine.

use std::fmt;

/// Misconfiguration detected while driving a picker.
///
/// These describe a broken setup rather than a runtime condition, so the
/// engine panics with the message unless the caller used a `try_` entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerError {
    /// A cell was dequeued before any identifier was registered.
    NoIdentifiersRegistered,
    /// A cell was dequeued under an identifier nobody registered.
    UnknownIdentifier(String),
    /// The data source produced no cell for a visible row.
    MissingCell { row: usize, component: usize },
    /// A component index past the number of reloaded components.
    ComponentOutOfRange { component: usize, count: usize },
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::NoIdentifiersRegistered => {
                write!(f, "no identifier is registered for reusable cells")
            }
            PickerError::UnknownIdentifier(id) => {
                write!(f, "reusable identifier {id:?} is not registered")
            }
            PickerError::MissingCell { row, component } => write!(
                f,
                "data source returned no cell for row {row} in component {component}"
            ),
            PickerError::ComponentOutOfRange { component, count } => write!(
                f,
                "component {component} out of range ({count} components loaded)"
            ),
        }
    }
}

impl std::error::Error for PickerError {}
