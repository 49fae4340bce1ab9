//! List/chart toggle.

use crate::actions::ViewAction;
use crate::environment::ViewEnvironment;
use crate::state::{DisplayMode, ViewState};
use eventdesk_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Reducer for the bookings presentation
#[derive(Clone, Debug, Default)]
pub struct DisplayModeReducer;

impl DisplayModeReducer {
    /// Creates a new `DisplayModeReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for DisplayModeReducer {
    type State = ViewState;
    type Action = ViewAction;
    type Environment = ViewEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let ViewAction::SetDisplayMode { mode } = action {
            state.display_mode = DisplayMode::from_token(&mode);
        }
        SmallVec::new()
    }
}
