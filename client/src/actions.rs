//! Actions processed by the view reducer.
//!
//! Commands come from the user (or the mounting code). Feedback actions are produced
//! by gateway effects and carry the [`OperationTicket`] the command was issued with.

use crate::error::ControllerError;
use crate::lifecycle::OperationTicket;
use eventdesk_core::gateway::{GatewayError, Operation};
use eventdesk_core::model::{
    Booking, BookingId, BookingReceipt, CancelledBooking, CreatedEvent, Event, EventId,
};
use serde::{Deserialize, Serialize};

/// A server-owned collection the view can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Public event listing
    Events,
    /// The signed-in viewer's bookings
    Bookings,
}

impl CollectionKind {
    /// Query that loads the collection
    #[must_use]
    pub const fn operation(self) -> Operation {
        match self {
            Self::Events => Operation::ListEvents,
            Self::Bookings => Operation::ListBookings,
        }
    }
}

/// Fields of the event creation form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    /// Title
    pub title: String,
    /// Ticket price
    pub price: f64,
    /// Start, as typed (`datetime-local` format)
    pub date: String,
    /// Description
    pub description: String,
}

impl EventInput {
    /// Form contents
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        price: f64,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            date: date.into(),
            description: description.into(),
        }
    }

    /// Presence checks applied before anything is sent.
    ///
    /// Title, date and description must be non-blank and the price strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::ValidationFailure`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ControllerError> {
        if self.title.trim().is_empty() {
            return Err(ControllerError::ValidationFailure("title is empty".into()));
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(ControllerError::ValidationFailure(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        if self.date.trim().is_empty() {
            return Err(ControllerError::ValidationFailure("date is empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ControllerError::ValidationFailure(
                "description is empty".into(),
            ));
        }
        Ok(())
    }
}

/// Everything the view reducer reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    // ========== Commands ==========
    /// Fetch a collection, replacing the local copy on success
    Load {
        /// Collection to fetch
        kind: CollectionKind,
    },

    /// Open the creation form
    StartCreate,

    /// Submit the creation form; the form closes whatever the outcome
    ConfirmCreate {
        /// Form contents
        input: EventInput,
    },

    /// Close whichever modal is open
    CancelModal,

    /// Open the detail modal of a listed event
    ViewDetail {
        /// Event to show
        event_id: EventId,
    },

    /// Book `event` for the signed-in viewer
    BookEvent {
        /// Event to book
        event: Event,
    },

    /// Cancel one of the viewer's bookings
    CancelBooking {
        /// Booking to cancel
        booking_id: BookingId,
    },

    /// Switch the bookings presentation
    SetDisplayMode {
        /// `"list"`, or anything else for the chart
        mode: String,
    },

    /// Unmount the view
    Teardown,

    // ========== Feedback ==========
    /// Response to [`ViewAction::Load`] for events
    EventsLoaded {
        /// Ticket the load was issued with
        ticket: OperationTicket,
        /// Outcome
        result: Result<Vec<Event>, GatewayError>,
    },

    /// Response to [`ViewAction::Load`] for bookings
    BookingsLoaded {
        /// Ticket the load was issued with
        ticket: OperationTicket,
        /// Outcome
        result: Result<Vec<Booking>, GatewayError>,
    },

    /// Response to [`ViewAction::ConfirmCreate`]
    EventCreated {
        /// Ticket the mutation was issued with
        ticket: OperationTicket,
        /// Outcome
        result: Result<CreatedEvent, GatewayError>,
    },

    /// Response to [`ViewAction::BookEvent`]
    EventBooked {
        /// Ticket the mutation was issued with
        ticket: OperationTicket,
        /// Booked event
        event_id: EventId,
        /// Outcome
        result: Result<BookingReceipt, GatewayError>,
    },

    /// Response to [`ViewAction::CancelBooking`]
    BookingCancelled {
        /// Ticket the mutation was issued with
        ticket: OperationTicket,
        /// Cancelled booking
        booking_id: BookingId,
        /// Outcome
        result: Result<CancelledBooking, GatewayError>,
    },
}

impl ViewAction {
    /// Ticket carried by a feedback action
    #[must_use]
    pub const fn ticket(&self) -> Option<&OperationTicket> {
        match self {
            Self::EventsLoaded { ticket, .. }
            | Self::BookingsLoaded { ticket, .. }
            | Self::EventCreated { ticket, .. }
            | Self::EventBooked { ticket, .. }
            | Self::BookingCancelled { ticket, .. } => Some(ticket),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_input_passes() {
        let input = EventInput::new("Talk", 10.0, "2024-01-01T10:00", "desc");
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn each_missing_field_fails() {
        let base = EventInput::new("Talk", 10.0, "2024-01-01T10:00", "desc");
        let cases = [
            EventInput {
                title: "  ".into(),
                ..base.clone()
            },
            EventInput {
                price: 0.0,
                ..base.clone()
            },
            EventInput {
                price: -5.0,
                ..base.clone()
            },
            EventInput {
                price: f64::NAN,
                ..base.clone()
            },
            EventInput {
                date: String::new(),
                ..base.clone()
            },
            EventInput {
                description: "\n".into(),
                ..base
            },
        ];

        for input in cases {
            assert!(
                matches!(input.validate(), Err(ControllerError::ValidationFailure(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn commands_carry_no_ticket() {
        assert!(ViewAction::StartCreate.ticket().is_none());
    }
}
