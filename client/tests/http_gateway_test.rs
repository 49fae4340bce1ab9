//! `HttpGateway` against a `wiremock` GraphQL endpoint.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use eventdesk_client::HttpGateway;
use eventdesk_core::gateway::{GatewayError, GraphQlRequest, Operation, RemoteGateway};
use serde_json::json;
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CANCEL: &str = "mutation X($id: ID!) { cancelBooking(bookingId: $id) { _id } }";

fn cancel_request() -> GraphQlRequest {
    GraphQlRequest::new(Operation::CancelBooking, CANCEL).with_variable("id", "b1")
}

fn endpoint(server: &MockServer) -> String {
    format!("{}/graphql", server.uri())
}

#[tokio::test]
async fn posts_query_and_variables_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({
            "query": CANCEL,
            "variables": { "id": "b1" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "cancelBooking": { "_id": "e1" } } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = HttpGateway::new(endpoint(&server))
        .send(cancel_request(), Some("secret".into()))
        .await
        .unwrap();

    assert_eq!(
        response.data,
        Some(json!({ "cancelBooking": { "_id": "e1" } }))
    );
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "events": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    HttpGateway::new(endpoint(&server))
        .send(
            GraphQlRequest::new(Operation::ListEvents, "query { events { _id } }"),
            None,
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let result = HttpGateway::new(endpoint(&server))
        .send(cancel_request(), Some("t".into()))
        .await;

    assert_eq!(result, Err(GatewayError::Status(500)));
}

#[tokio::test]
async fn graphql_errors_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Unauthenticated!" }]
        })))
        .mount(&server)
        .await;

    let result = HttpGateway::new(endpoint(&server))
        .send(cancel_request(), None)
        .await;

    assert!(matches!(result, Err(GatewayError::Rejected(msg)) if msg.contains("Unauthenticated")));
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = HttpGateway::new(endpoint(&server))
        .send(cancel_request(), None)
        .await;

    assert!(matches!(result, Err(GatewayError::Decode(_))));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/graphql", listener.local_addr().unwrap());
    drop(listener);

    let result = HttpGateway::new(endpoint).send(cancel_request(), None).await;

    assert!(matches!(result, Err(GatewayError::Network(_))));
}
