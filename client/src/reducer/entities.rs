//! Collections, loading flag and every gateway round trip.
//!
//! Each command that talks to the server issues an [`OperationTicket`], and the
//! matching feedback action writes only if the guard still admits that ticket. Local
//! collections change only after a successful response.

use super::report;
use crate::actions::{CollectionKind, ViewAction};
use crate::environment::ViewEnvironment;
use crate::error::ControllerError;
use crate::lifecycle::OperationTicket;
use crate::operations;
use crate::state::{LoadState, ViewState};
use eventdesk_core::gateway::{GatewayError, GraphQlRequest, Operation};
use eventdesk_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Reducer for the entity collections
#[derive(Clone, Debug, Default)]
pub struct EntityReducer;

impl EntityReducer {
    /// Creates a new `EntityReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Bearer token for `operation`, `None` for public operations.
    fn authorize(
        env: &ViewEnvironment,
        operation: Operation,
    ) -> Result<Option<String>, ControllerError> {
        if !operation.requires_auth() {
            return Ok(None);
        }
        env.session()
            .token
            .map(Some)
            .ok_or(ControllerError::AuthorizationGap(operation))
    }

    fn issue(state: &mut ViewState, operation: Operation) -> Option<OperationTicket> {
        let ticket = state.lifecycle.issue(operation);
        if ticket.is_none() {
            tracing::debug!(%operation, "View torn down, not starting operation");
        }
        ticket
    }

    fn admit(state: &mut ViewState, ticket: OperationTicket) -> bool {
        let admitted = state.lifecycle.admit(ticket);
        if !admitted {
            tracing::debug!(
                operation = %ticket.operation(),
                ticket = ticket.id(),
                "Discarding response for torn-down view"
            );
        }
        admitted
    }

    /// Gateway round trip decoding `data.<operation name>` into the feedback action.
    fn call<T, F>(
        env: &ViewEnvironment,
        request: GraphQlRequest,
        token: Option<String>,
        into_action: F,
    ) -> Effect<ViewAction>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, GatewayError>) -> ViewAction + Send + 'static,
    {
        let gateway = Arc::clone(&env.gateway);
        let field = request.operation.name();

        Effect::future(async move {
            let result = gateway
                .send(request, token)
                .await
                .and_then(|response| response.into_field::<T>(field));
            Some(into_action(result))
        })
    }

    /// Settle the loading flag and log a failed response
    fn settle<T>(
        state: &mut ViewState,
        ticket: OperationTicket,
        result: Result<T, GatewayError>,
    ) -> Option<T> {
        state.entities.load = LoadState::Idle;
        Self::resolve(ticket, result)
    }

    /// Log a failed response. Leaves the loading flag to the operations that raised it.
    fn resolve<T>(ticket: OperationTicket, result: Result<T, GatewayError>) -> Option<T> {
        result
            .map_err(|error| report(&ControllerError::transport(ticket.operation(), error)))
            .ok()
    }
}

impl Reducer for EntityReducer {
    type State = ViewState;
    type Action = ViewAction;
    type Environment = ViewEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per command and response
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            ViewAction::Load { kind } => {
                let operation = kind.operation();
                let token = match Self::authorize(env, operation) {
                    Ok(token) => token,
                    Err(error) => {
                        report(&error);
                        return SmallVec::new();
                    },
                };
                let Some(ticket) = Self::issue(state, operation) else {
                    return SmallVec::new();
                };

                state.entities.load = LoadState::Loading;
                let request = operations::list(kind);
                let effect = match kind {
                    CollectionKind::Events => Self::call(env, request, token, move |result| {
                        ViewAction::EventsLoaded { ticket, result }
                    }),
                    CollectionKind::Bookings => Self::call(env, request, token, move |result| {
                        ViewAction::BookingsLoaded { ticket, result }
                    }),
                };
                smallvec![effect]
            },

            ViewAction::ConfirmCreate { input } => {
                if let Err(error) = input.validate() {
                    report(&error);
                    return SmallVec::new();
                }
                let token = match Self::authorize(env, Operation::CreateEvent) {
                    Ok(token) => token,
                    Err(error) => {
                        report(&error);
                        return SmallVec::new();
                    },
                };
                let Some(ticket) = Self::issue(state, Operation::CreateEvent) else {
                    return SmallVec::new();
                };

                let request = operations::create_event(&input);
                smallvec![Self::call(env, request, token, move |result| {
                    ViewAction::EventCreated { ticket, result }
                })]
            },

            ViewAction::BookEvent { event } => {
                let token = match Self::authorize(env, Operation::BookEvent) {
                    Ok(token) => token,
                    Err(error) => {
                        report(&error);
                        return SmallVec::new();
                    },
                };
                let Some(ticket) = Self::issue(state, Operation::BookEvent) else {
                    return SmallVec::new();
                };

                state.entities.load = LoadState::Loading;
                let request = operations::book_event(&event.id);
                let event_id = event.id;
                smallvec![Self::call(env, request, token, move |result| {
                    ViewAction::EventBooked {
                        ticket,
                        event_id,
                        result,
                    }
                })]
            },

            ViewAction::CancelBooking { booking_id } => {
                if !state.entities.has_booking(&booking_id) {
                    tracing::debug!(%booking_id, "Not cancelling unknown booking");
                    return SmallVec::new();
                }
                let token = match Self::authorize(env, Operation::CancelBooking) {
                    Ok(token) => token,
                    Err(error) => {
                        report(&error);
                        return SmallVec::new();
                    },
                };
                let Some(ticket) = Self::issue(state, Operation::CancelBooking) else {
                    return SmallVec::new();
                };

                state.entities.load = LoadState::Loading;
                let request = operations::cancel_booking(&booking_id);
                smallvec![Self::call(env, request, token, move |result| {
                    ViewAction::BookingCancelled {
                        ticket,
                        booking_id,
                        result,
                    }
                })]
            },

            ViewAction::Teardown => {
                let outstanding = state.lifecycle.teardown();
                tracing::info!(outstanding, "View torn down");
                SmallVec::new()
            },

            // ========== Feedback ==========
            ViewAction::EventsLoaded { ticket, result } => {
                if !Self::admit(state, ticket) {
                    return SmallVec::new();
                }
                if let Some(events) = Self::settle(state, ticket, result) {
                    tracing::debug!(count = events.len(), "Events loaded");
                    state.entities.replace_events(events);
                }
                SmallVec::new()
            },

            ViewAction::BookingsLoaded { ticket, result } => {
                if !Self::admit(state, ticket) {
                    return SmallVec::new();
                }
                if let Some(bookings) = Self::settle(state, ticket, result) {
                    tracing::debug!(count = bookings.len(), "Bookings loaded");
                    state.entities.replace_bookings(bookings);
                }
                SmallVec::new()
            },

            ViewAction::EventCreated { ticket, result } => {
                if !Self::admit(state, ticket) {
                    return SmallVec::new();
                }
                if let Some(created) = Self::resolve(ticket, result) {
                    let creator = env.session().user_id.unwrap_or_default();
                    tracing::info!(event_id = %created.id, "Event created");
                    state.entities.upsert_event(created.into_event(creator));
                }
                SmallVec::new()
            },

            ViewAction::EventBooked {
                ticket,
                event_id,
                result,
            } => {
                if !Self::admit(state, ticket) {
                    return SmallVec::new();
                }
                if let Some(receipt) = Self::settle(state, ticket, result) {
                    tracing::info!(%event_id, booking_id = %receipt.id, "Event booked");
                }
                SmallVec::new()
            },

            ViewAction::BookingCancelled {
                ticket,
                booking_id,
                result,
            } => {
                if !Self::admit(state, ticket) {
                    return SmallVec::new();
                }
                if Self::settle(state, ticket, result).is_some() {
                    state.entities.remove_booking(&booking_id);
                    tracing::info!(%booking_id, "Booking cancelled");
                }
                SmallVec::new()
            },

            ViewAction::StartCreate
            | ViewAction::CancelModal
            | ViewAction::ViewDetail { .. }
            | ViewAction::SetDisplayMode { .. } => SmallVec::new(),
        }
    }
}
