//! Integration tests for MCP protocol handling.
//!
//! These tests verify the MCP server's JSON-RPC 2.0 protocol implementation,
//! including request/response handling, error responses, and message parsing.

use attio_mcp::mcp::protocol::{
    parse_message, IncomingMessage, JsonRpcError, JsonRpcResponse, RequestId,
    MCP_PROTOCOL_VERSION, SERVER_NAME,
};

// =============================================================================
// Protocol Parsing Tests
// =============================================================================

#[test]
fn test_parse_initialize_request() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "test-client",
                "version": "1.0.0"
            }
        }
    }"#;

    let result = parse_message(json);
    assert!(result.is_ok());

    if let IncomingMessage::Request(req) = result.unwrap() {
        assert_eq!(req.method, "initialize");
        assert_eq!(req.id, RequestId::Number(1));
    } else {
        panic!("Expected Request");
    }
}

#[test]
fn test_parse_tools_call_request() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {
            "name": "getv2objects",
            "arguments": {}
        }
    }"#;

    let result = parse_message(json);
    assert!(result.is_ok());

    if let IncomingMessage::Request(req) = result.unwrap() {
        assert_eq!(req.method, "tools/call");
        assert_eq!(req.id, RequestId::Number(2));
        assert_eq!(req.params.unwrap()["name"], "getv2objects");
    } else {
        panic!("Expected Request");
    }
}

#[test]
fn test_parse_initialized_notification() {
    let json = r#"{
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    }"#;

    let result = parse_message(json);
    assert!(result.is_ok());

    if let IncomingMessage::Notification(notif) = result.unwrap() {
        assert_eq!(notif.method, "notifications/initialized");
    } else {
        panic!("Expected Notification");
    }
}

#[test]
fn test_parse_invalid_json() {
    let json = "not valid json";

    let result = parse_message(json);
    assert!(result.is_err());
}

#[test]
fn test_parse_missing_jsonrpc_version() {
    let json = r#"{
        "id": 1,
        "method": "test"
    }"#;

    let result = parse_message(json);
    assert!(result.is_err());
}

#[test]
fn test_parse_wrong_jsonrpc_version() {
    let json = r#"{
        "jsonrpc": "1.0",
        "id": 1,
        "method": "test"
    }"#;

    let result = parse_message(json);
    assert!(result.is_err());
}

#[test]
fn test_parse_string_request_id() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": "req-42",
        "method": "ping"
    }"#;

    let result = parse_message(json);
    assert!(result.is_ok());

    if let IncomingMessage::Request(req) = result.unwrap() {
        assert_eq!(req.id, RequestId::String("req-42".to_string()));
    } else {
        panic!("Expected Request");
    }
}

// =============================================================================
// Response Serialisation Tests
// =============================================================================

#[test]
fn test_success_response_shape() {
    let response = JsonRpcResponse::success(
        RequestId::Number(1),
        serde_json::json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "serverInfo": { "name": SERVER_NAME }
        }),
    );

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains(r#""jsonrpc":"2.0""#));
    assert!(json.contains(r#""id":1"#));
    assert!(json.contains(SERVER_NAME));
    assert!(!json.contains('\n'));
}

#[test]
fn test_method_not_found_error_shape() {
    let error = JsonRpcError::method_not_found(RequestId::Number(7), "resources/list");

    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["jsonrpc"], "2.0");
    assert_eq!(value["id"], 7);
    assert_eq!(value["error"]["code"], -32601);
    assert!(value["error"]["message"]
        .as_str()
        .unwrap()
        .contains("resources/list"));
}

#[test]
fn test_parse_error_has_no_id() {
    let error = JsonRpcError::parse_error();

    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["error"]["code"], -32700);
    assert!(value.get("id").is_none());
}
