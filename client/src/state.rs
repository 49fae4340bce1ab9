//! View state owned by the store.

use crate::lifecycle::LifecycleGuard;
use eventdesk_core::model::{Booking, BookingId, Event, EventId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shared loading flag for both collections.
///
/// Not coordinated between concurrent operations: whichever response arrives last
/// decides the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Nothing in flight (as far as the flag knows)
    #[default]
    Idle,
    /// A fetch or mutation is waiting for its response
    Loading,
}

/// Which modal, if any, is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    /// No modal
    #[default]
    Closed,
    /// Event creation form
    Creating,
    /// Detail view of one event
    Viewing(Event),
}

impl Selection {
    /// Event whose detail modal is open
    #[must_use]
    pub const fn viewed_event(&self) -> Option<&Event> {
        match self {
            Self::Viewing(event) => Some(event),
            Self::Closed | Self::Creating => None,
        }
    }

    /// True when any modal is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// How bookings are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Plain list
    #[default]
    List,
    /// Price-bucket chart
    Chart,
}

impl DisplayMode {
    /// `"list"` selects [`DisplayMode::List`]; every other token selects
    /// [`DisplayMode::Chart`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token == "list" { Self::List } else { Self::Chart }
    }

    /// Canonical token
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Chart => "chart",
        }
    }
}

/// Local copies of the server-owned collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityState {
    /// Listed events, unique by id
    pub events: Vec<Event>,
    /// The viewer's bookings, unique by id
    pub bookings: Vec<Booking>,
    /// Shared loading flag
    pub load: LoadState,
}

impl EntityState {
    /// Replace the events, dropping later duplicates of an id
    pub fn replace_events(&mut self, events: Vec<Event>) {
        let mut seen = HashSet::new();
        self.events = events
            .into_iter()
            .filter(|event| seen.insert(event.id.clone()))
            .collect();
    }

    /// Replace the bookings, dropping later duplicates of an id
    pub fn replace_bookings(&mut self, bookings: Vec<Booking>) {
        let mut seen = HashSet::new();
        self.bookings = bookings
            .into_iter()
            .filter(|booking| seen.insert(booking.id.clone()))
            .collect();
    }

    /// Append `event`, or replace the entry that already has its id
    pub fn upsert_event(&mut self, event: Event) {
        match self.events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    /// Remove the booking with `id`; true if one was removed
    pub fn remove_booking(&mut self, id: &BookingId) -> bool {
        let before = self.bookings.len();
        self.bookings.retain(|booking| &booking.id != id);
        self.bookings.len() != before
    }

    /// Event by id
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Whether a booking with `id` is held locally
    #[must_use]
    pub fn has_booking(&self, id: &BookingId) -> bool {
        self.bookings.iter().any(|booking| &booking.id == id)
    }
}

/// Complete state of one view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Collections and loading flag
    pub entities: EntityState,
    /// Open modal
    pub selection: Selection,
    /// Bookings presentation
    pub display_mode: DisplayMode,
    /// Mount-lifetime guard
    pub lifecycle: LifecycleGuard,
}

impl ViewState {
    /// Fresh mounted state with the given display mode
    #[must_use]
    pub fn with_display_mode(display_mode: DisplayMode) -> Self {
        Self {
            display_mode,
            ..Self::default()
        }
    }

    /// True while the loading flag is set
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.entities.load == LoadState::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_testing::fixtures;

    #[test]
    fn loads_keep_first_occurrence() {
        let mut entities = EntityState::default();
        entities.replace_events(vec![
            fixtures::event("e1", "First", 10.0),
            fixtures::event("e2", "Other", 20.0),
            fixtures::event("e1", "Duplicate", 30.0),
        ]);

        assert_eq!(entities.events.len(), 2);
        assert_eq!(entities.events[0].title, "First");
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut entities = EntityState::default();
        entities.replace_events(vec![
            fixtures::event("e1", "Old", 10.0),
            fixtures::event("e2", "Other", 20.0),
        ]);

        entities.upsert_event(fixtures::event("e1", "New", 15.0));
        entities.upsert_event(fixtures::event("e3", "Third", 5.0));

        let titles: Vec<_> = entities.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Other", "Third"]);
    }

    #[test]
    fn remove_booking_reports_whether_found() {
        let mut entities = EntityState::default();
        entities.replace_bookings(vec![fixtures::booking("b1", "e1", 10.0)]);

        assert!(!entities.remove_booking(&BookingId::from("b9")));
        assert!(entities.remove_booking(&BookingId::from("b1")));
        assert!(entities.bookings.is_empty());
    }

    #[test]
    fn display_token_is_exact() {
        assert_eq!(DisplayMode::from_token("list"), DisplayMode::List);
        assert_eq!(DisplayMode::from_token("List"), DisplayMode::Chart);
        assert_eq!(DisplayMode::from_token(""), DisplayMode::Chart);
        assert_eq!(DisplayMode::Chart.as_token(), "chart");
    }
}
