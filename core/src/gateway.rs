//! Remote gateway contract.
//!
//! The view controller never builds HTTP requests itself. Every query or mutation goes
//! through a [`RemoteGateway`], which sends one GraphQL document and resolves with the
//! parsed response body or a [`GatewayError`].
//!
//! Request documents are static text; every caller-supplied value travels in
//! [`GraphQlRequest::variables`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Named operations issued by the view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// `query { events { ... } }`
    ListEvents,
    /// `query { bookings { ... } }`
    ListBookings,
    /// `mutation { createEvent(eventInput: ...) { ... } }`
    CreateEvent,
    /// `mutation { bookEvent(eventId: ...) { ... } }`
    BookEvent,
    /// `mutation { cancelBooking(bookingId: ...) { ... } }`
    CancelBooking,
}

impl Operation {
    /// GraphQL operation name, also the root field of the response payload.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ListEvents => "events",
            Self::ListBookings => "bookings",
            Self::CreateEvent => "createEvent",
            Self::BookEvent => "bookEvent",
            Self::CancelBooking => "cancelBooking",
        }
    }

    /// Whether the server rejects this operation without a bearer token.
    ///
    /// Events are publicly listable; everything else belongs to a signed-in user.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::ListEvents)
    }

    /// Whether the operation changes server state.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::CreateEvent | Self::BookEvent | Self::CancelBooking)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single GraphQL request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    /// Which operation this document performs
    #[serde(skip)]
    pub operation: Operation,
    /// Static GraphQL document
    pub query: &'static str,
    /// Variables bound to the document's `$` parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQlRequest {
    /// Request without variables
    #[must_use]
    pub const fn new(operation: Operation, query: &'static str) -> Self {
        Self {
            operation,
            query,
            variables: None,
        }
    }

    /// Bind a variable value
    #[must_use]
    pub fn with_variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.to_string(), value.into());
        self
    }

    /// Look up a bound variable
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.as_ref().and_then(|vars| vars.get(name))
    }
}

/// Parsed GraphQL response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// `data` member
    #[serde(default)]
    pub data: Option<Value>,
    /// `errors` member
    #[serde(default)]
    pub errors: Option<Value>,
}

impl GatewayResponse {
    /// Successful response with the given `data` object
    #[must_use]
    pub const fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// Decode `data.<field>` into `T`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Rejected`] if the server reported GraphQL errors
    /// - [`GatewayError::MissingData`] if `data.<field>` is absent or null
    /// - [`GatewayError::Decode`] if the payload does not match `T`
    pub fn into_field<T: DeserializeOwned>(self, field: &str) -> Result<T, GatewayError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_null()) {
            return Err(GatewayError::Rejected(errors.to_string()));
        }

        let value = self
            .data
            .and_then(|mut data| data.get_mut(field).map(Value::take))
            .filter(|value| !value.is_null())
            .ok_or_else(|| GatewayError::MissingData(field.to_string()))?;

        serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Errors that can occur while talking to the remote API.
///
/// Cloneable so a failed outcome can travel inside a feedback action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The server answered with a status outside the success range
    #[error("Unexpected response status: {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered but reported GraphQL errors
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The response did not contain the expected root field
    #[error("Response is missing data for '{0}'")]
    MissingData(String),

    /// The response payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Boxed future returned by [`RemoteGateway::send`].
pub type GatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GatewayResponse, GatewayError>> + Send + 'a>>;

/// Capability to issue one query or mutation against the remote API.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// so it can be shared as `Arc<dyn RemoteGateway>` and moved into effect futures.
pub trait RemoteGateway: Send + Sync {
    /// Send `request`, attaching `token` as a bearer credential when present.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Status`] or [`GatewayError::Network`] on transport failure.
    fn send(&self, request: GraphQlRequest, token: Option<String>) -> GatewayFuture<'_>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn variables_are_collected_in_order_of_binding() {
        let request = GraphQlRequest::new(Operation::CancelBooking, "mutation { x }")
            .with_variable("id", "b-1");

        assert_eq!(request.variable("id"), Some(&json!("b-1")));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "mutation { x }", "variables": { "id": "b-1" } })
        );
    }

    #[test]
    fn request_without_variables_omits_the_member() {
        let request = GraphQlRequest::new(Operation::ListEvents, "query { events { _id } }");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "query { events { _id } }" })
        );
    }

    #[test]
    fn into_field_decodes_payload() {
        let response = GatewayResponse::with_data(json!({ "bookEvent": { "n": 3 } }));

        #[derive(Deserialize)]
        struct Payload {
            n: u8,
        }

        let payload: Payload = response.into_field("bookEvent").unwrap();
        assert_eq!(payload.n, 3);
    }

    #[test]
    fn graphql_errors_win_over_data() {
        let response = GatewayResponse {
            data: Some(json!({ "events": [] })),
            errors: Some(json!([{ "message": "Unauthenticated!" }])),
        };

        let result: Result<Vec<Value>, _> = response.into_field("events");
        assert!(matches!(result, Err(GatewayError::Rejected(msg)) if msg.contains("Unauthenticated")));
    }

    #[test]
    fn null_field_is_missing_data() {
        let response = GatewayResponse::with_data(json!({ "createEvent": null }));
        let result: Result<Value, _> = response.into_field("createEvent");
        assert_eq!(result, Err(GatewayError::MissingData("createEvent".to_string())));
    }

    #[test]
    fn only_event_listing_is_public() {
        assert!(!Operation::ListEvents.requires_auth());
        assert!(Operation::ListBookings.requires_auth());
        assert!(Operation::CancelBooking.requires_auth());
        assert!(Operation::BookEvent.is_mutation());
        assert!(!Operation::ListBookings.is_mutation());
    }
}
