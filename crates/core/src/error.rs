#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed or missing request fields.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The notification text is empty or starts with a space.
    #[error("Invalid notification format")]
    InvalidNotificationFormat,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A storage operation failed. The message is safe to show to callers;
    /// driver details are logged where the failure happens.
    #[error("Persistence error: {0}")]
    Persistence(String),
}
