//! Builders for domain values and the response payloads that carry them.

use eventdesk_core::auth::{Session, SessionCell};
use eventdesk_core::model::{BookedEvent, Booking, BookingId, Creator, Event, EventId, UserId};
use serde_json::{Value, json};

/// Token used by [`signed_in`]
pub const TEST_TOKEN: &str = "test-token";

/// User id used by [`signed_in`]
pub const TEST_USER: &str = "user-1";

/// Fixed date used by every built event
pub const TEST_DATE: &str = "2025-01-01T18:00:00.000Z";

/// Session cell signed in as [`TEST_USER`]
#[must_use]
pub fn signed_in() -> SessionCell {
    SessionCell::new(Session::signed_in(TEST_TOKEN, TEST_USER))
}

/// Anonymous session cell
#[must_use]
pub fn anonymous() -> SessionCell {
    SessionCell::default()
}

/// Event created by [`TEST_USER`]
#[must_use]
pub fn event(id: &str, title: &str, price: f64) -> Event {
    event_by(id, title, price, TEST_USER)
}

/// Event created by `creator`
#[must_use]
pub fn event_by(id: &str, title: &str, price: f64, creator: &str) -> Event {
    Event {
        id: EventId::from(id),
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        date: TEST_DATE.to_string(),
        creator: Creator {
            id: UserId::from(creator),
            email: Some(format!("{creator}@example.com")),
        },
    }
}

/// Booking of an event with the given price
#[must_use]
pub fn booking(id: &str, event_id: &str, price: f64) -> Booking {
    Booking {
        id: BookingId::from(id),
        created_at: "2024-12-01T09:30:00.000Z".to_string(),
        event: BookedEvent {
            id: EventId::from(event_id),
            title: format!("Event {event_id}"),
            date: TEST_DATE.to_string(),
            price,
        },
    }
}

/// `data` object of an events listing
#[must_use]
pub fn events_payload(events: &[Event]) -> Value {
    json!({ "events": events })
}

/// `data` object of a bookings listing
#[must_use]
pub fn bookings_payload(bookings: &[Booking]) -> Value {
    json!({ "bookings": bookings })
}

/// `data` object of a `createEvent` mutation echoing `event`
#[must_use]
pub fn created_event_payload(event: &Event) -> Value {
    json!({
        "createEvent": {
            "_id": event.id,
            "title": event.title,
            "description": event.description,
            "date": event.date,
            "price": event.price,
        }
    })
}

/// `data` object of a `bookEvent` mutation
#[must_use]
pub fn booking_receipt_payload(booking_id: &str) -> Value {
    json!({
        "bookEvent": {
            "_id": booking_id,
            "createdAt": "2025-01-01T10:00:00.000Z",
            "updatedAt": "2025-01-01T10:00:00.000Z",
        }
    })
}

/// `data` object of a `cancelBooking` mutation
#[must_use]
pub fn cancelled_payload(event_id: &str) -> Value {
    json!({ "cancelBooking": { "_id": event_id, "title": "cancelled" } })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use eventdesk_core::gateway::GatewayResponse;

    #[test]
    fn events_payload_decodes_back() {
        let events = vec![event("e1", "Talk", 10.0), event_by("e2", "Gig", 150.0, "u2")];

        let decoded: Vec<Event> = GatewayResponse::with_data(events_payload(&events))
            .into_field("events")
            .unwrap();

        assert_eq!(decoded, events);
    }

    #[test]
    fn bookings_payload_uses_schema_names() {
        let payload = bookings_payload(&[booking("b1", "e1", 99.0)]);
        assert_eq!(payload["bookings"][0]["_id"], "b1");
        assert_eq!(payload["bookings"][0]["createdAt"], "2024-12-01T09:30:00.000Z");
    }
}
