//! Render-ready description of a view.
//!
//! A [`ViewSnapshot`] is derived from the store state and the current session after
//! every reduction. Renderers consume snapshots only; they never see the guard or the
//! raw actions.

use crate::chart::BookingChart;
use crate::state::{DisplayMode, Selection, ViewState};
use eventdesk_core::auth::{AuthContext, Session};
use eventdesk_core::model::{Booking, Event, UserId};
use std::sync::Arc;
use tokio::sync::watch;

/// Who is looking at the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    /// Signed-in user, if any
    pub user_id: Option<UserId>,
    /// True when a bearer token is available
    pub authenticated: bool,
}

impl Viewer {
    /// Viewer described by `session`
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            authenticated: session.is_authenticated(),
        }
    }

    /// Whether the create control is offered
    #[must_use]
    pub const fn can_create_events(&self) -> bool {
        self.authenticated
    }

    /// Whether `event` was created by this viewer
    #[must_use]
    pub fn is_own_event(&self, event: &Event) -> bool {
        self.user_id.as_ref() == Some(&event.creator.id)
    }
}

/// What the open modal contains.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalKind {
    /// Event creation form
    CreateEvent,
    /// Detail of one event with a booking action
    EventDetail(Event),
}

/// Modal dialog to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    /// Heading
    pub title: String,
    /// Text of the confirm button
    pub confirm_label: &'static str,
    /// Body
    pub kind: ModalKind,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Spinner instead of lists
    pub is_loading: bool,
    /// Listed events
    pub events: Vec<Event>,
    /// The viewer's bookings
    pub bookings: Vec<Booking>,
    /// Bookings presentation
    pub display_mode: DisplayMode,
    /// Open modal
    pub selection: Selection,
    /// Current viewer
    pub viewer: Viewer,
}

impl ViewSnapshot {
    /// Derive a snapshot from store state and the session at this moment
    #[must_use]
    pub fn new(state: &ViewState, session: &Session) -> Self {
        Self {
            is_loading: state.is_loading(),
            events: state.entities.events.clone(),
            bookings: state.entities.bookings.clone(),
            display_mode: state.display_mode,
            selection: state.selection.clone(),
            viewer: Viewer::from_session(session),
        }
    }

    /// Modal to show, if any
    #[must_use]
    pub fn modal(&self) -> Option<Modal> {
        match &self.selection {
            Selection::Closed => None,
            Selection::Creating => Some(Modal {
                title: "Add Event".to_string(),
                confirm_label: "Confirm",
                kind: ModalKind::CreateEvent,
            }),
            Selection::Viewing(event) => Some(Modal {
                title: event.title.clone(),
                confirm_label: if self.viewer.authenticated {
                    "Book"
                } else {
                    "Confirm"
                },
                kind: ModalKind::EventDetail(event.clone()),
            }),
        }
    }

    /// Dim the page behind an open modal
    #[must_use]
    pub const fn show_backdrop(&self) -> bool {
        self.selection.is_open()
    }

    /// Price-bucket chart of the bookings, in chart mode only
    #[must_use]
    pub fn chart(&self) -> Option<BookingChart> {
        match self.display_mode {
            DisplayMode::Chart => Some(BookingChart::from_bookings(&self.bookings)),
            DisplayMode::List => None,
        }
    }
}

/// Stream of snapshots, one per reduction.
pub struct SnapshotReceiver {
    state: watch::Receiver<ViewState>,
    auth: Arc<dyn AuthContext>,
}

impl SnapshotReceiver {
    pub(crate) fn new(state: watch::Receiver<ViewState>, auth: Arc<dyn AuthContext>) -> Self {
        Self { state, auth }
    }

    /// Latest snapshot, marking it seen
    pub fn current(&mut self) -> ViewSnapshot {
        let session = self.auth.session();
        ViewSnapshot::new(&self.state.borrow_and_update(), &session)
    }

    /// Wait for the next reduction; `None` once the controller is gone.
    pub async fn changed(&mut self) -> Option<ViewSnapshot> {
        self.state.changed().await.ok()?;
        Some(self.current())
    }
}

impl std::fmt::Debug for SnapshotReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotReceiver").finish_non_exhaustive()
    }
}
