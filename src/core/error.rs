use thiserror::Error;

/// Recoverable conditions raised by the parameter bridge.
///
/// None of these are fatal to the page: writes are queued or dropped,
/// controls with missing elements are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("parameter store not ready")]
    NotReady,
    #[error("engine already attached")]
    AlreadyReady,
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("event stream already subscribed")]
    AlreadySubscribed,
}
