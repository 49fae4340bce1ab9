//! Modal state machine.
//!
//! ```text
//! Closed --StartCreate--> Creating --CancelModal | ConfirmCreate--> Closed
//! Closed --ViewDetail(id)--> Viewing(e) --CancelModal | booked | no session--> Closed
//! ```
//!
//! Runs before [`EntityReducer`](super::EntityReducer) so it can inspect a feedback
//! ticket before the entity reducer consumes it.

use crate::actions::ViewAction;
use crate::environment::ViewEnvironment;
use crate::state::{Selection, ViewState};
use eventdesk_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Reducer for the open modal
#[derive(Clone, Debug, Default)]
pub struct SelectionReducer;

impl SelectionReducer {
    /// Creates a new `SelectionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SelectionReducer {
    type State = ViewState;
    type Action = ViewAction;
    type Environment = ViewEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ViewAction::StartCreate => {
                state.selection = Selection::Creating;
            },

            ViewAction::CancelModal => {
                state.selection = Selection::Closed;
            },

            ViewAction::ConfirmCreate { .. } => {
                if state.selection == Selection::Creating {
                    state.selection = Selection::Closed;
                }
            },

            ViewAction::ViewDetail { event_id } => {
                if state.selection == Selection::Creating {
                    return SmallVec::new();
                }
                match state.entities.event(&event_id) {
                    Some(event) => state.selection = Selection::Viewing(event.clone()),
                    None => tracing::debug!(%event_id, "No such event to show"),
                }
            },

            ViewAction::BookEvent { .. } => {
                if !env.session().is_authenticated() {
                    state.selection = Selection::Closed;
                }
            },

            ViewAction::EventBooked { ticket, result, .. } => {
                if result.is_ok() && state.lifecycle.is_valid(&ticket) {
                    state.selection = Selection::Closed;
                }
            },

            _ => {},
        }

        SmallVec::new()
    }
}
