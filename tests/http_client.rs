//! End-to-end tests for the reqwest-backed HTTP client.
//!
//! These tests run whole invocations through the dispatcher and the real
//! HTTP client against a local wiremock server, verifying headers, query
//! strings, bodies, and status mapping on the wire.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use attio_mcp::catalog::attio::builtin_catalog;
use attio_mcp::dispatch::auth::{Credentials, StaticCredentialProvider};
use attio_mcp::dispatch::client::ReqwestClient;
use attio_mcp::dispatch::dispatcher::{Dispatcher, InvocationRequest};

fn dispatcher_for(server: &MockServer) -> Dispatcher {
    let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
    Dispatcher::new(
        Arc::new(builtin_catalog().unwrap()),
        Url::parse(&server.uri()).unwrap(),
        Arc::new(client),
        Arc::new(StaticCredentialProvider::new().with("oauth2", Credentials::bearer("test-token"))),
    )
}

fn invocation(tool: &str, arguments: Value) -> InvocationRequest {
    InvocationRequest {
        tool_name: tool.to_string(),
        arguments,
    }
}

#[tokio::test]
async fn test_get_carries_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let outcome = dispatcher
        .dispatch(&invocation("getv2objects", json!({})))
        .await;

    assert!(outcome.is_success());
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["result"]["data"], json!([]));
}

#[tokio::test]
async fn test_post_sends_json_body_without_path_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/objects/people/records"))
        .and(body_json(json!({ "data": { "values": {} } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "r1" } })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let outcome = dispatcher
        .dispatch(&invocation(
            "postv2objectsobjectrecords",
            json!({ "object": "people", "data": { "values": {} } }),
        ))
        .await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_explicit_query_pin_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/objects/people/records"))
        .and(query_param("matching_attribute", "email_addresses"))
        .and(body_json(json!({ "data": {} })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let outcome = dispatcher
        .dispatch(&invocation(
            "putv2objectsobjectrecords",
            json!({
                "object": "people",
                "matching_attribute": "email_addresses",
                "data": {}
            }),
        ))
        .await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_error_status_preserves_body_in_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "code": "not_found", "message": "Object not found" })),
        )
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let outcome = dispatcher
        .dispatch(&invocation("getv2objectsobject", json!({ "object": "missing" })))
        .await;

    assert_eq!(outcome.error_kind(), Some("TransportError"));
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["details"]["status"], 404);
    assert_eq!(value["details"]["body"]["code"], "not_found");
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Bind and drop a server so the port refuses connections
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ReqwestClient::new(Duration::from_secs(1)).unwrap();
    let dispatcher = Dispatcher::new(
        Arc::new(builtin_catalog().unwrap()),
        Url::parse(&uri).unwrap(),
        Arc::new(client),
        Arc::new(StaticCredentialProvider::new().with("oauth2", Credentials::bearer("tok"))),
    );

    let outcome = dispatcher
        .dispatch(&invocation("getv2objects", json!({})))
        .await;

    assert_eq!(outcome.error_kind(), Some("TransportError"));
    let value = serde_json::to_value(&outcome).unwrap();
    assert!(value["details"]["status"].is_null());
}

#[tokio::test]
async fn test_non_json_response_body_is_preserved_as_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/self"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let outcome = dispatcher.dispatch(&invocation("getv2self", json!({}))).await;

    assert!(outcome.is_success());
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["result"], "plain text");
}
