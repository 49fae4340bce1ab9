//! The view reducer.
//!
//! [`ViewReducer`] is the composition of three focused reducers sharing
//! [`ViewState`] and [`ViewAction`]:
//!
//! 1. [`SelectionReducer`]: open modal
//! 2. [`EntityReducer`]: collections, loading flag, gateway effects, lifecycle guard
//! 3. [`DisplayModeReducer`]: list/chart toggle
//!
//! Order matters: the selection reducer reads a feedback ticket before the entity
//! reducer consumes it.

mod display;
mod entities;
mod selection;

pub use display::DisplayModeReducer;
pub use entities::EntityReducer;
pub use selection::SelectionReducer;

use crate::actions::ViewAction;
use crate::environment::ViewEnvironment;
use crate::error::ControllerError;
use crate::state::ViewState;
use eventdesk_core::composition::{BoxedReducer, CombinedReducer, combine_reducers};
use eventdesk_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Log an operation that ended without touching state.
fn report(error: &ControllerError) {
    match error {
        ControllerError::TransportFailure { .. } => {
            tracing::warn!(%error, "Operation failed");
        },
        ControllerError::ValidationFailure(_) => {
            tracing::debug!(%error, "Input rejected");
        },
        ControllerError::AuthorizationGap(_) => {
            tracing::debug!(%error, "Operation skipped");
        },
    }
}

/// Reducer for one events/bookings view
pub struct ViewReducer {
    inner: CombinedReducer<ViewState, ViewAction, ViewEnvironment>,
}

impl ViewReducer {
    /// Creates a new `ViewReducer`
    #[must_use]
    pub fn new() -> Self {
        let reducers: Vec<BoxedReducer<ViewState, ViewAction, ViewEnvironment>> = vec![
            Box::new(SelectionReducer::new()),
            Box::new(EntityReducer::new()),
            Box::new(DisplayModeReducer::new()),
        ];
        Self {
            inner: combine_reducers(reducers),
        }
    }
}

impl Default for ViewReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewReducer")
            .field("inner", &self.inner)
            .finish()
    }
}

impl Reducer for ViewReducer {
    type State = ViewState;
    type Action = ViewAction;
    type Environment = ViewEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::state::Selection;
    use eventdesk_core::gateway::Operation;
    use eventdesk_core::model::{BookingId, BookingReceipt};
    use eventdesk_testing::{MockGateway, ReducerTest, assertions, fixtures};
    use std::sync::Arc;

    fn env() -> ViewEnvironment {
        ViewEnvironment::new(Arc::new(MockGateway::new()), Arc::new(fixtures::signed_in()))
    }

    #[test]
    fn anonymous_confirm_closes_create_modal_without_call() {
        let anonymous =
            ViewEnvironment::new(Arc::new(MockGateway::new()), Arc::new(fixtures::anonymous()));

        ReducerTest::new(ViewReducer::new())
            .with_env(anonymous)
            .given_state(ViewState::default())
            .when_action(ViewAction::StartCreate)
            .when_action(ViewAction::ConfirmCreate {
                input: crate::actions::EventInput::new("Talk", 10.0, "2024-01-01T10:00", "desc"),
            })
            .then_state(|state| {
                assert_eq!(state.selection, Selection::Closed);
                assert_eq!(state.lifecycle.in_flight(), 0);
                assert!(!state.is_loading());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn booking_success_closes_detail_and_settles() {
        let event = fixtures::event("e1", "Talk", 10.0);
        let mut state = ViewState::default();
        state.entities.replace_events(vec![event.clone()]);
        state.selection = Selection::Viewing(event.clone());
        state.entities.load = crate::state::LoadState::Loading;
        let ticket = state.lifecycle.issue(Operation::BookEvent).unwrap();

        ReducerTest::new(ViewReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ViewAction::EventBooked {
                ticket,
                event_id: event.id,
                result: Ok(BookingReceipt {
                    id: BookingId::from("b1"),
                    created_at: "now".into(),
                    updated_at: "now".into(),
                }),
            })
            .then_state(|state| {
                assert_eq!(state.selection, Selection::Closed);
                assert!(!state.is_loading());
                assert_eq!(state.lifecycle.in_flight(), 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn booking_after_teardown_keeps_selection() {
        let event = fixtures::event("e1", "Talk", 10.0);
        let mut state = ViewState::default();
        state.selection = Selection::Viewing(event.clone());
        let ticket = state.lifecycle.issue(Operation::BookEvent).unwrap();

        ReducerTest::new(ViewReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ViewAction::Teardown)
            .when_action(ViewAction::EventBooked {
                ticket,
                event_id: event.id.clone(),
                result: Ok(BookingReceipt {
                    id: BookingId::from("b1"),
                    created_at: "now".into(),
                    updated_at: "now".into(),
                }),
            })
            .then_state(move |state| {
                assert_eq!(state.selection, Selection::Viewing(event));
            })
            .run();
    }

    #[test]
    fn combined_reducer_runs_all_three() {
        let reducer = ViewReducer::new();
        assert!(format!("{reducer:?}").contains("reducers: 3"));
    }
}
