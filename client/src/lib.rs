//! # EventDesk Client
//!
//! View controller keeping a local copy of two server-owned collections (events and
//! bookings) in sync with a GraphQL API, plus the transient UI state around them:
//! the loading flag, the create/detail modals and the list/chart toggle.
//!
//! The controller is independent of any renderer. It publishes a [`ViewSnapshot`]
//! after every change and talks to the server only through a
//! [`RemoteGateway`](eventdesk_core::gateway::RemoteGateway).
//!
//! - [`ViewController`]: the public API, one per mounted view
//! - [`reducer`]: the view logic, split into selection, entities and display mode
//! - [`lifecycle`]: tickets that keep late responses out of a torn-down view
//! - [`HttpGateway`]: reqwest transport
//!
//! # Quick Start
//!
//! ```no_run
//! use eventdesk_client::{CollectionKind, HttpGateway, ViewController};
//! use eventdesk_core::auth::SessionCell;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SessionCell::default();
//! let controller = ViewController::new(HttpGateway::new("http://localhost:8000/graphql"), session);
//!
//! for mut handle in controller.mount(&[CollectionKind::Events])? {
//!     handle.wait().await;
//! }
//! for event in controller.snapshot().events {
//!     println!("{} ({})", event.title, event.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod chart;
pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod operations;
pub mod reducer;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use actions::{CollectionKind, EventInput, ViewAction};
pub use chart::{BookingChart, PriceBucket};
pub use config::{ClientConfig, ViewKind};
pub use controller::ViewController;
pub use environment::ViewEnvironment;
pub use error::{ConfigError, ControllerError};
pub use http::HttpGateway;
pub use lifecycle::{LifecycleGuard, OperationTicket};
pub use snapshot::{Modal, ModalKind, SnapshotReceiver, ViewSnapshot, Viewer};
pub use state::{DisplayMode, EntityState, LoadState, Selection, ViewState};
