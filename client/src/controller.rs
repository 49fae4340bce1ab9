//! Public entry point: one controller per mounted view.

use crate::actions::{CollectionKind, EventInput, ViewAction};
use crate::environment::ViewEnvironment;
use crate::reducer::ViewReducer;
use crate::snapshot::{SnapshotReceiver, ViewSnapshot};
use crate::state::{DisplayMode, ViewState};
use eventdesk_core::auth::AuthContext;
use eventdesk_core::gateway::RemoteGateway;
use eventdesk_core::model::{BookingId, Event, EventId};
use eventdesk_runtime::{EffectHandle, Store, StoreError};
use std::sync::Arc;
use std::time::Duration;

/// Store specialised for the view
pub type ViewStore = Store<ViewState, ViewAction, ViewEnvironment, ViewReducer>;

/// Keeps one view's events and bookings in sync with the remote API.
///
/// Every method sends one action and returns the [`EffectHandle`] of the gateway call
/// it started (already complete when nothing was started). Awaiting the handle waits
/// until the response has been reduced.
///
/// # Example
///
/// ```ignore
/// let controller = ViewController::new(gateway, session);
/// for mut handle in controller.mount(&[CollectionKind::Events])? {
///     handle.wait().await;
/// }
/// println!("{} events", controller.snapshot().events.len());
/// controller.close(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct ViewController {
    store: ViewStore,
}

impl ViewController {
    /// Controller talking to `gateway` on behalf of `auth`
    #[must_use]
    pub fn new<G, A>(gateway: G, auth: A) -> Self
    where
        G: RemoteGateway + 'static,
        A: AuthContext + 'static,
    {
        Self::with_environment(
            ViewEnvironment::new(Arc::new(gateway), Arc::new(auth)),
            DisplayMode::default(),
        )
    }

    /// Controller over an existing environment
    #[must_use]
    pub fn with_environment(env: ViewEnvironment, display_mode: DisplayMode) -> Self {
        Self {
            store: Store::new(
                ViewState::with_display_mode(display_mode),
                ViewReducer::new(),
                env,
            ),
        }
    }

    /// Load every collection in `kinds`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn mount(&self, kinds: &[CollectionKind]) -> Result<Vec<EffectHandle>, StoreError> {
        tracing::info!(?kinds, "Mounting view");
        kinds.iter().map(|&kind| self.load(kind)).collect()
    }

    /// Fetch `kind`, replacing the local copy on success
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn load(&self, kind: CollectionKind) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::Load { kind })
    }

    /// Open the creation form
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn start_create(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::StartCreate)
    }

    /// Submit the creation form
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn confirm_create(&self, input: EventInput) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::ConfirmCreate { input })
    }

    /// Close the open modal
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn cancel_modal(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::CancelModal)
    }

    /// Show the detail of a listed event
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn view_detail(&self, event_id: impl Into<EventId>) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::ViewDetail {
            event_id: event_id.into(),
        })
    }

    /// Book `event`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn book_event(&self, event: Event) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::BookEvent { event })
    }

    /// Book the event whose detail is open; nothing happens when none is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn book_selected(&self) -> Result<EffectHandle, StoreError> {
        match self.store.state(|s| s.selection.viewed_event().cloned()) {
            Some(event) => self.book_event(event),
            None => Ok(EffectHandle::completed()),
        }
    }

    /// Cancel one of the viewer's bookings
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn cancel_booking(
        &self,
        booking_id: impl Into<BookingId>,
    ) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::CancelBooking {
            booking_id: booking_id.into(),
        })
    }

    /// `"list"` or anything else for the chart
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn set_display_mode(&self, mode: &str) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::SetDisplayMode {
            mode: mode.to_string(),
        })
    }

    /// Unmount: responses still in flight will be discarded
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`ViewController::close`].
    pub fn teardown(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(ViewAction::Teardown)
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let session = self.store.environment().session();
        self.store.state(|state| ViewSnapshot::new(state, &session))
    }

    /// Read raw state
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&ViewState) -> T,
    {
        self.store.state(f)
    }

    /// Snapshot stream, one item per reduction
    #[must_use]
    pub fn subscribe(&self) -> SnapshotReceiver {
        SnapshotReceiver::new(
            self.store.subscribe(),
            Arc::clone(&self.store.environment().auth),
        )
    }

    /// Tear down, then wait up to `timeout` for in-flight requests to finish
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if requests are still running when the
    /// timeout expires.
    pub async fn close(&self, timeout: Duration) -> Result<(), StoreError> {
        if let Err(error) = self.teardown() {
            tracing::debug!(%error, "Controller already closed, skipping teardown");
        }
        self.store.shutdown(timeout).await
    }
}

impl std::fmt::Debug for ViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("pending_effects", &self.store.pending_effects())
            .finish_non_exhaustive()
    }
}
