use thiserror::Error;

/// Failures surfaced by the booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("The selected time overlaps a confirmed reservation{}", owner_suffix(.owner))]
    Conflict { owner: Option<String> },

    #[error("Invalid booking: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Booking in the past was not confirmed")]
    PastStartDeclined,

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

fn owner_suffix(owner: &Option<String>) -> String {
    owner
        .as_deref()
        .map(|owner| format!(" held by {}", owner))
        .unwrap_or_default()
}

impl BookingError {
    /// Errors after which the form stays open for another attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BookingError::Conflict { .. }
                | BookingError::Validation(_)
                | BookingError::PastStartDeclined
        )
    }
}

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BookingError::InvalidResponse(err.to_string())
        } else {
            BookingError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::InvalidResponse(err.to_string())
    }
}
