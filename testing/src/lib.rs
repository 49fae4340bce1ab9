//! # EventDesk Testing
//!
//! Testing utilities for EventDesk reducers and controllers.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`MockGateway`]: scripted [`RemoteGateway`](eventdesk_core::gateway::RemoteGateway)
//!   that records every request
//! - [`fixtures`]: builders for events, bookings and response payloads
//! - [`init_test_tracing`]: opt-in log output for failing tests
//!
//! ## Example
//!
//! ```ignore
//! use eventdesk_testing::{MockGateway, fixtures};
//!
//! #[tokio::test]
//! async fn loads_events() {
//!     let gateway = MockGateway::new();
//!     gateway.respond_with(Operation::ListEvents, fixtures::events_payload(&[]));
//!
//!     let controller = ViewController::new(gateway.clone(), fixtures::anonymous());
//!     controller.load(CollectionKind::Events)?.wait().await;
//!
//!     assert!(controller.snapshot().events.is_empty());
//! }
//! ```

pub mod fixtures;
pub mod gateway_mock;

pub use gateway_mock::{Deferred, MockGateway, RecordedCall};
pub use reducer_test::{ReducerTest, assertions};

/// Install a test-writer tracing subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Property-based testing utilities
pub mod properties {
    use proptest::prelude::*;

    /// Arbitrary display-mode token: the two known values plus noise
    pub fn display_token() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("list".to_string()),
            Just("chart".to_string()),
            "[a-zA-Z]{0,8}",
        ]
    }

    /// Prices that pass create validation
    pub fn valid_price() -> impl Strategy<Value = f64> {
        0.01f64..10_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_core::auth::AuthContext;

    #[test]
    fn signed_in_fixture_carries_token() {
        init_test_tracing();
        let session = fixtures::signed_in().session();
        assert_eq!(session.token.as_deref(), Some(fixtures::TEST_TOKEN));
        assert!(!fixtures::anonymous().session().is_authenticated());
    }
}
