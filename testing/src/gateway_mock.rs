//! Scripted in-memory [`RemoteGateway`] for controller tests.
//!
//! Replies are queued per [`Operation`] and consumed in order. A call with nothing
//! queued fails with [`GatewayError::Network`], so a test never hangs on a request it
//! forgot to script. [`MockGateway::defer`] queues a reply that the test resolves
//! later, which is how "response arrives after teardown" scenarios are written.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use eventdesk_core::gateway::{
    GatewayError, GatewayFuture, GatewayResponse, GraphQlRequest, Operation, RemoteGateway,
};
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, watch};

type Reply = Result<GatewayResponse, GatewayError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// A request observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation the request performed
    pub operation: Operation,
    /// Bound variables
    pub variables: Option<Map<String, Value>>,
    /// Bearer token passed alongside
    pub token: Option<String>,
}

impl RecordedCall {
    /// Look up a bound variable
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.as_ref().and_then(|vars| vars.get(name))
    }
}

/// Reply to a request the test resolves by hand.
#[derive(Debug)]
pub struct Deferred {
    sender: oneshot::Sender<Reply>,
}

impl Deferred {
    /// Resolve with a successful `data` object
    pub fn resolve(self, data: Value) {
        self.respond(Ok(GatewayResponse::with_data(data)));
    }

    /// Resolve with a transport failure
    pub fn fail(self, error: GatewayError) {
        self.respond(Err(error));
    }

    /// Resolve with an arbitrary outcome
    pub fn respond(self, reply: Reply) {
        // the request may never have been issued; nobody to tell
        let _ = self.sender.send(reply);
    }
}

#[derive(Default)]
struct Script {
    replies: HashMap<Operation, VecDeque<Scripted>>,
    calls: Vec<RecordedCall>,
}

/// Scripted gateway recording every request it receives.
///
/// # Example
///
/// ```
/// use eventdesk_core::gateway::{GraphQlRequest, Operation, RemoteGateway};
/// use eventdesk_testing::MockGateway;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let gateway = MockGateway::new();
/// gateway.respond_with(Operation::ListEvents, json!({ "events": [] }));
///
/// let response = gateway
///     .send(GraphQlRequest::new(Operation::ListEvents, "query { events { _id } }"), None)
///     .await
///     .unwrap();
/// assert_eq!(response.data, Some(json!({ "events": [] })));
/// assert_eq!(gateway.calls_for(Operation::ListEvents).len(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct MockGateway {
    script: Arc<Mutex<Script>>,
    call_count: Arc<watch::Sender<usize>>,
}

impl MockGateway {
    /// Mock with nothing scripted
    #[must_use]
    pub fn new() -> Self {
        let (call_count, _) = watch::channel(0);
        Self {
            script: Arc::new(Mutex::new(Script::default())),
            call_count: Arc::new(call_count),
        }
    }

    fn push(&self, operation: Operation, scripted: Scripted) {
        self.script
            .lock()
            .unwrap()
            .replies
            .entry(operation)
            .or_default()
            .push_back(scripted);
    }

    /// Queue a successful reply whose `data` member is `data`
    pub fn respond_with(&self, operation: Operation, data: Value) {
        self.push(
            operation,
            Scripted::Ready(Ok(GatewayResponse::with_data(data))),
        );
    }

    /// Queue a raw response body, e.g. one carrying GraphQL `errors`
    pub fn respond_raw(&self, operation: Operation, response: GatewayResponse) {
        self.push(operation, Scripted::Ready(Ok(response)));
    }

    /// Queue a failure
    pub fn fail_with(&self, operation: Operation, error: GatewayError) {
        self.push(operation, Scripted::Ready(Err(error)));
    }

    /// Queue a reply the test resolves later
    #[must_use]
    pub fn defer(&self, operation: Operation) -> Deferred {
        let (sender, receiver) = oneshot::channel();
        self.push(operation, Scripted::Deferred(receiver));
        Deferred { sender }
    }

    /// Every request received so far, in arrival order
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().unwrap().calls.clone()
    }

    /// Requests received for one operation
    #[must_use]
    pub fn calls_for(&self, operation: Operation) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation == operation)
            .collect()
    }

    /// Wait until at least `count` requests have arrived
    pub async fn wait_for_calls(&self, count: usize) {
        let mut rx = self.call_count.subscribe();
        // sender lives in self, the channel cannot close while we wait
        let _ = rx.wait_for(|seen| *seen >= count).await;
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGateway")
            .field("calls", &self.calls().len())
            .finish_non_exhaustive()
    }
}

impl RemoteGateway for MockGateway {
    fn send(&self, request: GraphQlRequest, token: Option<String>) -> GatewayFuture<'_> {
        let operation = request.operation;
        let scripted = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(RecordedCall {
                operation,
                variables: request.variables,
                token,
            });
            script
                .replies
                .get_mut(&operation)
                .and_then(VecDeque::pop_front)
        };
        self.call_count.send_modify(|count| *count += 1);

        Box::pin(async move {
            match scripted {
                Some(Scripted::Ready(reply)) => reply,
                Some(Scripted::Deferred(receiver)) => receiver.await.unwrap_or_else(|_| {
                    Err(GatewayError::Network(format!(
                        "deferred {operation} reply was dropped"
                    )))
                }),
                None => Err(GatewayError::Network(format!(
                    "no reply scripted for {operation}"
                ))),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(operation: Operation) -> GraphQlRequest {
        GraphQlRequest::new(operation, "query")
    }

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let gateway = MockGateway::new();
        gateway.respond_with(Operation::ListEvents, json!({ "events": [1] }));
        gateway.fail_with(Operation::ListEvents, GatewayError::Status(500));

        let first = gateway.send(request(Operation::ListEvents), None).await;
        let second = gateway.send(request(Operation::ListEvents), None).await;
        let third = gateway.send(request(Operation::ListEvents), None).await;

        assert!(first.is_ok());
        assert_eq!(second, Err(GatewayError::Status(500)));
        assert!(matches!(third, Err(GatewayError::Network(_))));
    }

    #[tokio::test]
    async fn records_variables_and_token() {
        let gateway = MockGateway::new();
        let call = request(Operation::CancelBooking).with_variable("id", "b1");

        let _ = gateway.send(call, Some("tok".into())).await;

        let calls = gateway.calls_for(Operation::CancelBooking);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].variable("id"), Some(&json!("b1")));
        assert_eq!(calls[0].token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn deferred_reply_resolves_later() {
        let gateway = MockGateway::new();
        let deferred = gateway.defer(Operation::BookEvent);

        let pending = gateway.send(request(Operation::BookEvent), Some("t".into()));
        deferred.resolve(json!({ "bookEvent": { "_id": "b1" } }));

        let response = pending.await.unwrap();
        assert!(response.data.is_some());
    }

    #[tokio::test]
    async fn dropped_deferred_reply_fails() {
        let gateway = MockGateway::new();
        drop(gateway.defer(Operation::ListBookings));

        let result = gateway.send(request(Operation::ListBookings), None).await;
        assert!(matches!(result, Err(GatewayError::Network(_))));
    }

    #[tokio::test]
    async fn wait_for_calls_returns_once_reached() {
        let gateway = MockGateway::new();
        let _ = gateway.send(request(Operation::ListEvents), None).await;

        gateway.wait_for_calls(1).await;
        assert_eq!(gateway.calls().len(), 1);
    }
}
