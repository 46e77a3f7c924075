/// Precondition failures inside page components.
///
/// These never reach the user: they are logged, recorded on the document
/// console and the triggering action is dropped.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("Element not found: {0}")]
    MissingElement(String),
    #[error("Invalid flight data: {0}")]
    InvalidFlightData(String),
    #[error("No flight selected for saving")]
    NoPendingSave,
}
