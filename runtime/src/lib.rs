//! # EventDesk Runtime
//!
//! Runtime for EventDesk reducers.
//!
//! ## Core Components
//!
//! - **Store**: owns the state, runs the reducer, executes effects
//! - **Feedback loop**: actions produced by effects re-enter the reducer
//! - **State publication**: every reduction publishes the new state on a `watch` channel
//!
//! The reducer always runs to completion with exclusive access to the state, so the
//! view logic observes one logical thread of control even though gateway effects run
//! as independent tasks.
//!
//! ## Example
//!
//! ```ignore
//! use eventdesk_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and wait for its effects (and their feedback) to settle
//! let mut handle = store.send(Action::DoSomething)?;
//! handle.wait().await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use eventdesk_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`]. The handle completes once every effect spawned by
/// that action has finished, including delivery of the feedback action it produced.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Load)?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // The load response has been reduced
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new handle together with the tracking half used by effect execution
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (handle, _tracking) = Self::new();
        handle
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// True once every tracked effect has finished
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pending() == 0
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // every tracking half is gone, nothing can still be running
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] carrying the number of effects still
    /// running if the timeout expires first.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        let pending = Arc::clone(&self.effects);
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::ShutdownTimeout(pending.load(Ordering::SeqCst)))
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: tracking half of an [`EffectHandle`]
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    /// Effect started
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Effect finished
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            self.notifier.send_replace(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Keeps the counter correct even if the effect future panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements the store-wide pending counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect, EffectHandle,
        EffectTracking, Ordering, Reducer, StoreError, watch,
    };
    use std::sync::atomic::AtomicBool;

    struct StoreInner<S, E, R> {
        state: watch::Sender<S>,
        reducer: R,
        environment: E,
        shutdown: AtomicBool,
        pending_effects: Arc<AtomicUsize>,
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (published on a `watch` channel after every reduction)
    /// 2. Reducer (view logic)
    /// 3. Environment (injected collaborators)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a store is cheap; clones share the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        inner: Arc<StoreInner<S, E, R>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (state, _) = watch::channel(initial_state);

            Self {
                inner: Arc::new(StoreInner {
                    state,
                    reducer,
                    environment,
                    shutdown: AtomicBool::new(false),
                    pending_effects: Arc::new(AtomicUsize::new(0)),
                }),
            }
        }

        /// Injected environment
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.inner.environment
        }

        /// Send an action to the store
        ///
        /// 1. Runs the reducer with exclusive access to the state
        /// 2. Publishes the new state to subscribers
        /// 3. Spawns the returned effects; their output actions are sent back here
        ///
        /// `send()` returns once the effects have been started, not finished.
        /// Must be called from within a tokio runtime when the reducer returns futures.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.inner.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            let (handle, tracking) = EffectHandle::new();

            let mut effects = eventdesk_core::SmallVec::new();
            self.inner.state.send_modify(|state| {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                effects = self
                    .inner
                    .reducer
                    .reduce(state, action, &self.inner.environment);
            });

            tracing::trace!("Reducer completed, executing {} effects", effects.len());
            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let loading = store.state(|s| s.is_loading());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.inner.state.borrow())
        }

        /// Subscribe to state changes
        ///
        /// The receiver is marked changed after every reduction, including reductions
        /// that left the state untouched.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.inner.state.subscribe()
        }

        /// Number of effects currently running across all handles
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.inner.pending_effects.load(Ordering::Acquire)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Rejects new actions, then waits for running effects to finish.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            self.inner.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects();

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timeout");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect with tracking
        ///
        /// - `None`: no-op
        /// - `Future`: spawned; a produced action is sent back to the store
        /// - `Parallel`: each child executed with the same tracking
        ///
        /// A rejected feedback action (store shut down) is logged and dropped.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    for effect in effects {
                        self.execute_effect(effect, tracking);
                    }
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    tracking.increment();

                    self.inner.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard =
                        AtomicCounterGuard(Arc::clone(&self.inner.pending_effects));

                    let guard = DecrementGuard(tracking.clone());
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            if let Err(error) = store.send(action) {
                                tracing::debug!(%error, "Feedback action dropped");
                            }
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_handle_has_nothing_pending() {
        let handle = EffectHandle::completed();
        assert!(handle.is_complete());
        assert_eq!(format!("{handle:?}"), "EffectHandle { pending_effects: 0, .. }");
    }

    #[tokio::test]
    async fn handle_completes_when_guard_drops() {
        let (mut handle, tracking) = EffectHandle::new();
        tracking.increment();
        let guard = DecrementGuard(tracking);

        assert_eq!(handle.pending(), 1);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            drop(guard);
        });

        handle.wait().await;
        assert!(handle.is_complete());
    }

    #[test]
    fn wait_stays_pending_until_last_effect_finishes() {
        use tokio_test::{assert_pending, assert_ready, task};

        let (mut handle, tracking) = EffectHandle::new();
        tracking.increment();
        tracking.increment();
        let first = DecrementGuard(tracking.clone());
        let second = DecrementGuard(tracking);

        let mut wait = task::spawn(handle.wait());
        assert_pending!(wait.poll());

        drop(first);
        assert_pending!(wait.poll());

        drop(second);
        assert!(wait.is_woken());
        assert_ready!(wait.poll());
    }
}
