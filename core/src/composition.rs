//! Reducer composition utilities
//!
//! A view is split into focused reducers (entities, selection, display mode) that all
//! see the same state and action. [`combine_reducers`] runs them in order and
//! concatenates their effects.
//!
//! # Example
//!
//! ```
//! use eventdesk_core::composition::{BoxedReducer, combine_reducers};
//! use eventdesk_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct PanelState {
//!     opened: u32,
//!     log: Vec<&'static str>,
//! }
//!
//! #[derive(Clone)]
//! enum PanelAction {
//!     Open,
//! }
//!
//! struct CountOpens;
//! struct RecordOpens;
//!
//! impl Reducer for CountOpens {
//!     type State = PanelState;
//!     type Action = PanelAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut PanelState, _action: PanelAction, _env: &()) -> SmallVec<[Effect<PanelAction>; 4]> {
//!         state.opened += 1;
//!         SmallVec::new()
//!     }
//! }
//!
//! impl Reducer for RecordOpens {
//!     type State = PanelState;
//!     type Action = PanelAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut PanelState, _action: PanelAction, _env: &()) -> SmallVec<[Effect<PanelAction>; 4]> {
//!         state.log.push("open");
//!         SmallVec::new()
//!     }
//! }
//!
//! let reducers: Vec<BoxedReducer<PanelState, PanelAction, ()>> =
//!     vec![Box::new(CountOpens), Box::new(RecordOpens)];
//! let combined = combine_reducers(reducers);
//! let mut state = PanelState::default();
//! combined.reduce(&mut state, PanelAction::Open, &());
//! assert_eq!(state.opened, 1);
//! assert_eq!(state.log, vec!["open"]);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// A reducer that can live inside a [`CombinedReducer`] shared across tasks.
pub type BoxedReducer<S, A, E> =
    Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence on a clone of the action; effects are
/// concatenated in the same order.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// True when no reducer has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Default)]
    struct Trace(Vec<&'static str>);

    struct Named(&'static str);

    impl Reducer for Named {
        type State = Trace;
        type Action = ();
        type Environment = ();

        fn reduce(&self, state: &mut Trace, _action: (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
            state.0.push(self.0);
            smallvec![Effect::None, Effect::future(async { None })]
        }
    }

    #[test]
    fn reducers_run_in_registration_order() {
        let reducers: Vec<BoxedReducer<Trace, (), ()>> =
            vec![Box::new(Named("first")), Box::new(Named("second"))];
        let combined = combine_reducers(reducers);
        let mut trace = Trace::default();

        let effects = combined.reduce(&mut trace, (), &());

        assert_eq!(trace.0, vec!["first", "second"]);
        // no-op effects are dropped, futures are kept
        assert_eq!(effects.len(), 2);
        assert_eq!(combined.len(), 2);
    }
}
