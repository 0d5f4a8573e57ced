use mindmap_core::DocumentStore;
use mindmap_mcp::McpServer;
use serde_json::{json, Value};

fn run_session(lines: &[String]) -> Vec<Value> {
    let server = McpServer::new(DocumentStore::new());
    let input = lines.join("\n");
    let mut output = Vec::new();
    server.run(input.as_bytes(), &mut output).unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: i64, tool: &str, arguments: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments },
    })
    .to_string()
}

fn tool_text(reply: &Value) -> Value {
    let text = reply["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[test]
fn handshake_then_tool_listing() {
    let replies = run_session(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}).to_string(),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}).to_string(),
    ]);

    // The notification produces no reply line.
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["result"]["serverInfo"]["name"], "mindmap-mcp");
    assert_eq!(replies[1]["result"]["tools"].as_array().unwrap().len(), 5);
}

#[test]
fn build_inspect_and_save_flow() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out").join("plan.xmind");

    let replies = run_session(&[
        call(1, "create_mindmap", json!({"title": "Project Plan", "rootTitle": "Project"})),
        call(
            2,
            "add_topic",
            json!({"mindMapId": "mindmap_1", "parentTopicId": "topic_1", "title": "Phase 1"}),
        ),
        call(
            3,
            "add_topic",
            json!({"mindMapId": "mindmap_1", "parentTopicId": "topic_2", "title": "Task A"}),
        ),
        call(4, "get_mindmap", json!({"mindMapId": "mindmap_1"})),
        call(5, "list_mindmaps", json!({})),
        call(
            6,
            "save_mindmap",
            json!({"mindMapId": "mindmap_1", "filePath": destination.to_str().unwrap()}),
        ),
    ]);
    assert_eq!(replies.len(), 6);

    let created = tool_text(&replies[0]);
    assert_eq!(created["mindMapId"], "mindmap_1");
    assert_eq!(created["rootTopicId"], "topic_1");
    assert_eq!(created["message"], "Mind map \"Project Plan\" created successfully");

    assert_eq!(tool_text(&replies[1])["topicId"], "topic_2");
    assert_eq!(tool_text(&replies[2])["topicId"], "topic_3");

    let tree = tool_text(&replies[3]);
    assert_eq!(tree["rootTopic"]["id"], "topic_1");
    assert_eq!(tree["rootTopic"]["children"][0]["title"], "Phase 1");
    assert_eq!(
        tree["rootTopic"]["children"][0]["children"][0]["title"],
        "Task A"
    );

    let listing = tool_text(&replies[4]);
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["rootTopicId"], "topic_1");

    let saved = tool_text(&replies[5]);
    assert_eq!(
        saved["message"],
        format!("Mind map saved successfully to {}", destination.display())
    );
    assert!(destination.is_file());
}

#[test]
fn failures_become_is_error_replies() {
    let replies = run_session(&[
        call(
            1,
            "add_topic",
            json!({"mindMapId": "mindmap_99", "parentTopicId": "topic_1", "title": "Lost"}),
        ),
        call(2, "create_mindmap", json!({"title": "No root title"})),
        call(3, "drop_mindmap", json!({})),
    ]);
    assert_eq!(replies.len(), 3);

    assert_eq!(replies[0]["result"]["isError"], true);
    assert_eq!(
        tool_text(&replies[0])["error"],
        "Mind map with ID mindmap_99 not found"
    );

    assert_eq!(replies[1]["result"]["isError"], true);
    assert_eq!(
        tool_text(&replies[1])["error"],
        "Invalid arguments: `rootTitle` must be a string"
    );

    assert_eq!(replies[2]["result"]["isError"], true);
    assert_eq!(tool_text(&replies[2])["error"], "Unknown tool: drop_mindmap");
}

#[test]
fn malformed_and_unknown_frames_get_jsonrpc_errors() {
    let replies = run_session(&[
        "this is not json".to_string(),
        json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"}).to_string(),
        "".to_string(),
    ]);
    assert_eq!(replies.len(), 2);

    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[0]["id"], Value::Null);

    assert_eq!(replies[1]["error"]["code"], -32601);
    assert_eq!(replies[1]["id"], 7);
}
