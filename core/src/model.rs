//! Domain types shared by the controller, the gateway adapters and the test fixtures.
//!
//! Wire names follow the GraphQL schema (`_id`, `createdAt`); plain `id` is accepted
//! on input as well.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from any string-like value
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Server-assigned event id
    EventId
);
string_id!(
    /// Server-assigned booking id
    BookingId
);
string_id!(
    /// Server-assigned user id
    UserId
);

/// Author of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    /// User id
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Email, only present on fetched events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Creator {
    /// Creator known only by id
    #[must_use]
    pub const fn stub(id: UserId) -> Self {
        Self { id, email: None }
    }
}

/// A listed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event id
    #[serde(rename = "_id", alias = "id")]
    pub id: EventId,
    /// Title
    pub title: String,
    /// Ticket price, always positive
    pub price: f64,
    /// Free-form description
    pub description: String,
    /// ISO datetime string as sent by the server
    pub date: String,
    /// Author
    pub creator: Creator,
}

impl Event {
    /// Parsed start time, see [`parse_datetime`]
    #[must_use]
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        parse_datetime(&self.date)
    }
}

/// The event side of a booking, as embedded in the bookings listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedEvent {
    /// Event id
    #[serde(rename = "_id", alias = "id")]
    pub id: EventId,
    /// Title
    pub title: String,
    /// ISO datetime string
    pub date: String,
    /// Ticket price
    pub price: f64,
}

/// A booking held by the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking id
    #[serde(rename = "_id", alias = "id")]
    pub id: BookingId,
    /// ISO datetime string
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Booked event
    pub event: BookedEvent,
}

impl Booking {
    /// Parsed creation time, see [`parse_datetime`]
    #[must_use]
    pub fn created_at_time(&self) -> Option<NaiveDateTime> {
        parse_datetime(&self.created_at)
    }
}

/// Fields the server echoes back from `createEvent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEvent {
    /// Assigned id
    #[serde(rename = "_id", alias = "id")]
    pub id: EventId,
    /// Title
    pub title: String,
    /// Price
    pub price: f64,
    /// Description
    pub description: String,
    /// Date
    pub date: String,
}

impl CreatedEvent {
    /// Complete the echo into a listable [`Event`] owned by `creator`.
    #[must_use]
    pub fn into_event(self, creator: UserId) -> Event {
        Event {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            date: self.date,
            creator: Creator::stub(creator),
        }
    }
}

/// Receipt returned by `bookEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    /// New booking id
    #[serde(rename = "_id", alias = "id")]
    pub id: BookingId,
    /// Creation time
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Last update time
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Entity returned by `cancelBooking`; only the id is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledBooking {
    /// Id of the entity the server reports back
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}

/// Parse an RFC 3339 timestamp or an HTML `datetime-local` value (`2024-01-01T10:00`).
///
/// RFC 3339 values are normalised to UTC.
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn event_decodes_schema_names() {
        let event: Event = serde_json::from_value(json!({
            "_id": "e1",
            "title": "Talk",
            "price": 9.5,
            "description": "desc",
            "date": "2024-01-01T10:00:00.000Z",
            "creator": { "_id": "u1", "email": "a@b.c" }
        }))
        .unwrap();

        assert_eq!(event.id, EventId::from("e1"));
        assert_eq!(event.creator.email.as_deref(), Some("a@b.c"));
        assert_eq!(
            event.starts_at().map(|t| t.to_string()),
            Some("2024-01-01 10:00:00".to_string())
        );
    }

    #[test]
    fn booking_accepts_plain_id() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "b1",
            "createdAt": "2024-02-03T04:05:06Z",
            "event": { "id": "e1", "title": "Talk", "date": "2024-01-01T10:00", "price": 120.0 }
        }))
        .unwrap();

        assert_eq!(booking.id.as_str(), "b1");
        assert!(booking.created_at_time().is_some());
    }

    #[test]
    fn datetime_local_values_parse() {
        assert!(parse_datetime("2024-01-01T10:00").is_some());
        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn created_event_gets_stub_creator() {
        let created = CreatedEvent {
            id: EventId::from("e9"),
            title: "t".into(),
            price: 1.0,
            description: "d".into(),
            date: "2024-01-01T10:00".into(),
        };

        let event = created.into_event(UserId::from("u7"));
        assert_eq!(event.creator, Creator::stub(UserId::from("u7")));
        assert!(event.creator.email.is_none());
    }

    proptest::proptest! {
        #[test]
        fn any_datetime_local_value_parses(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
        ) {
            let raw = format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}");
            let parsed = parse_datetime(&raw).unwrap();
            proptest::prop_assert_eq!(parsed.format("%Y-%m-%dT%H:%M").to_string(), raw);
        }
    }
}
