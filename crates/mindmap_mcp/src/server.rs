//! JSON-RPC 2.0 framing and the stdio serve loop.
//!
//! # Responsibility
//! - Decode one request per line, route it, and encode one reply per line.
//! - Handle the MCP handshake (`initialize`) and tool methods.
//!
//! # Invariants
//! - Notifications (requests without an id) never produce a reply.
//! - Tool failures are `isError` results; only transport-level problems
//!   (parse errors, unknown methods) become JSON-RPC error objects.

use crate::tools::{call_tool, tool_definitions};
use log::{debug, warn};
use mindmap_core::DocumentStore;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{BufRead, Write};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "mindmap-mcp";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// One decoded JSON-RPC request frame.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// One reply frame; carries either `result` or `error`.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl JsonRpcResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(json!({ "code": code, "message": message.into() })),
        }
    }
}

/// MCP server over line-delimited JSON-RPC.
///
/// Owns the process-wide [`DocumentStore`]; the serve loop borrows it for
/// every tool call, so there is no ambient singleton anywhere.
pub struct McpServer {
    store: DocumentStore,
}

impl McpServer {
    /// Wraps `store` for serving.
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Serves requests from `reader` until EOF, writing replies to `writer`.
    ///
    /// # Errors
    /// - Returns the underlying I/O error when reading or writing a frame
    ///   fails; malformed JSON only produces a parse-error reply.
    pub fn run(&self, reader: impl BufRead, mut writer: impl Write) -> std::io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let frame = line.trim();
            if frame.is_empty() {
                continue;
            }

            let reply = match serde_json::from_str::<JsonRpcRequest>(frame) {
                Ok(request) => self.handle(request),
                Err(err) => {
                    warn!("event=request_rejected module=server status=error reason=parse err={err}");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("Parse error: {err}"),
                    ))
                }
            };

            if let Some(reply) = reply {
                let encoded = serde_json::to_string(&reply)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
                writer.write_all(encoded.as_bytes())?;
                writer.write_all(b"\n")?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    /// Routes one request. Returns `None` for notifications.
    pub fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(
            "event=request_received module=server method={} notification={}",
            request.method,
            request.id.is_none()
        );

        let Some(id) = request.id else {
            // Client notifications such as `notifications/initialized`.
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::result(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": mindmap_core::core_version(),
                    },
                }),
            ),
            "tools/list" => JsonRpcResponse::result(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tool_call(id, &request.params),
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };
        Some(response)
    }

    fn handle_tool_call(&self, id: Value, params: &Value) -> JsonRpcResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "tools/call requires a tool name");
        };
        let default_args = json!({});
        let args = params.get("arguments").unwrap_or(&default_args);

        match call_tool(&self.store, name, args) {
            Ok(payload) => JsonRpcResponse::result(id, text_result(&payload, false)),
            Err(err) => {
                warn!("event=tool_failed module=server status=error tool={name} err={err}");
                JsonRpcResponse::result(id, text_result(&json!({ "error": err.to_string() }), true))
            }
        }
    }
}

/// Wraps a payload as an MCP text content block, pretty-printed to match
/// the original server's replies.
fn text_result(payload: &Value, is_error: bool) -> Value {
    let text = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string());
    let mut result = json!({
        "content": [{ "type": "text", "text": text }],
    });
    if is_error {
        result["isError"] = Value::Bool(true);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{JsonRpcRequest, McpServer};
    use mindmap_core::DocumentStore;
    use serde_json::json;

    fn request(id: i64, method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            id: Some(json!(id)),
            method: method.to_string(),
            params,
        }
    }

    #[test]
    fn notifications_get_no_reply() {
        let server = McpServer::new(DocumentStore::new());
        let notification = JsonRpcRequest {
            id: None,
            method: "notifications/initialized".to_string(),
            params: json!({}),
        };
        assert!(server.handle(notification).is_none());
    }

    #[test]
    fn initialize_reports_server_identity() {
        let server = McpServer::new(DocumentStore::new());
        let reply = server
            .handle(request(1, "initialize", json!({})))
            .expect("initialize must reply");
        let result = reply.result.expect("initialize must succeed");
        assert_eq!(result["serverInfo"]["name"], "mindmap-mcp");
        assert_eq!(result["protocolVersion"], "2024-11-05");
    }

    #[test]
    fn unknown_method_is_a_jsonrpc_error() {
        let server = McpServer::new(DocumentStore::new());
        let reply = server
            .handle(request(2, "resources/list", json!({})))
            .expect("must reply");
        let error = reply.error.expect("unknown method must error");
        assert_eq!(error["code"], -32601);
    }
}
