//! GraphQL documents and request builders.
//!
//! Documents are static; caller-supplied values are bound as variables only.

use crate::actions::{CollectionKind, EventInput};
use eventdesk_core::gateway::{GraphQlRequest, Operation};
use eventdesk_core::model::{BookingId, EventId};

const LIST_EVENTS: &str = r"
query ListEvents {
  events {
    _id
    title
    price
    description
    date
    creator {
      _id
      email
    }
  }
}";

const LIST_BOOKINGS: &str = r"
query ListBookings {
  bookings {
    _id
    createdAt
    event {
      _id
      title
      date
      price
    }
  }
}";

const CREATE_EVENT: &str = r"
mutation CreateEvent($title: String!, $description: String!, $price: Float!, $date: String!) {
  createEvent(eventInput: { title: $title, description: $description, price: $price, date: $date }) {
    _id
    title
    price
    description
    date
  }
}";

const BOOK_EVENT: &str = r"
mutation BookEvent($id: ID!) {
  bookEvent(eventId: $id) {
    _id
    createdAt
    updatedAt
  }
}";

const CANCEL_BOOKING: &str = r"
mutation CancelBooking($id: ID!) {
  cancelBooking(bookingId: $id) {
    _id
  }
}";

/// Query loading `kind`
#[must_use]
pub const fn list(kind: CollectionKind) -> GraphQlRequest {
    match kind {
        CollectionKind::Events => GraphQlRequest::new(Operation::ListEvents, LIST_EVENTS),
        CollectionKind::Bookings => GraphQlRequest::new(Operation::ListBookings, LIST_BOOKINGS),
    }
}

/// `createEvent` mutation for a validated form
#[must_use]
pub fn create_event(input: &EventInput) -> GraphQlRequest {
    GraphQlRequest::new(Operation::CreateEvent, CREATE_EVENT)
        .with_variable("title", input.title.as_str())
        .with_variable("description", input.description.as_str())
        .with_variable("price", input.price)
        .with_variable("date", input.date.as_str())
}

/// `bookEvent` mutation
#[must_use]
pub fn book_event(event_id: &EventId) -> GraphQlRequest {
    GraphQlRequest::new(Operation::BookEvent, BOOK_EVENT).with_variable("id", event_id.as_str())
}

/// `cancelBooking` mutation
#[must_use]
pub fn cancel_booking(booking_id: &BookingId) -> GraphQlRequest {
    GraphQlRequest::new(Operation::CancelBooking, CANCEL_BOOKING)
        .with_variable("id", booking_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hostile_values_stay_out_of_the_document() {
        let id = BookingId::from(r#"b1") { _id } mutation { x("#);
        let request = cancel_booking(&id);

        assert_eq!(request.query, CANCEL_BOOKING);
        assert_eq!(request.variable("id"), Some(&json!(id.as_str())));
    }

    #[test]
    fn create_binds_every_field() {
        let input = EventInput::new("Talk", 10.0, "2024-01-01T10:00", "desc");
        let request = create_event(&input);

        assert_eq!(request.operation, Operation::CreateEvent);
        assert_eq!(request.variable("title"), Some(&json!("Talk")));
        assert_eq!(request.variable("price"), Some(&json!(10.0)));
        assert_eq!(request.variable("date"), Some(&json!("2024-01-01T10:00")));
        assert_eq!(request.variable("description"), Some(&json!("desc")));
    }

    #[test]
    fn listings_have_no_variables() {
        for kind in [CollectionKind::Events, CollectionKind::Bookings] {
            let request = list(kind);
            assert_eq!(request.operation, kind.operation());
            assert!(request.variables.is_none());
            assert!(request.query.contains(kind.operation().name()));
        }
    }
}
