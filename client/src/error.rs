//! Error types for the view controller.

use eventdesk_core::gateway::{GatewayError, Operation};
use thiserror::Error;

/// Why an operation did not change local state.
///
/// None of these are fatal. They are logged at the operation boundary and the view
/// settles back to `Idle`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The gateway call failed or the response could not be used
    #[error("{operation} failed: {source}")]
    TransportFailure {
        /// Operation that failed
        operation: Operation,
        /// Underlying gateway error
        #[source]
        source: GatewayError,
    },

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    ValidationFailure(String),

    /// The operation needs a signed-in session and there is none
    #[error("{0} requires a signed-in session")]
    AuthorizationGap(Operation),
}

impl ControllerError {
    /// Wrap a gateway error raised by `operation`
    #[must_use]
    pub const fn transport(operation: Operation, source: GatewayError) -> Self {
        Self::TransportFailure { operation, source }
    }
}

/// Errors raised while reading [`ClientConfig`](crate::config::ClientConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Endpoint is not an http(s) URL
    #[error("EVENTDESK_ENDPOINT must be an http:// or https:// URL, got '{0}'")]
    InvalidEndpoint(String),

    /// Unknown value for `EVENTDESK_VIEW`
    #[error("EVENTDESK_VIEW must be one of events, bookings, both; got '{0}'")]
    InvalidView(String),

    /// A token without a user id, or the reverse
    #[error("EVENTDESK_TOKEN and EVENTDESK_USER_ID must be set together")]
    PartialSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_names_operation() {
        let error = ControllerError::transport(Operation::BookEvent, GatewayError::Status(500));
        assert_eq!(
            error.to_string(),
            "bookEvent failed: Unexpected response status: 500"
        );
    }

    #[test]
    fn authorization_gap_names_operation() {
        let error = ControllerError::AuthorizationGap(Operation::CancelBooking);
        assert_eq!(error.to_string(), "cancelBooking requires a signed-in session");
    }
}
