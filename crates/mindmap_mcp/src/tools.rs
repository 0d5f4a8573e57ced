//! Tool definitions and dispatch into the document core.
//!
//! # Responsibility
//! - Declare the five tool schemas served by `tools/list`.
//! - Extract flat named arguments, call the store/serializer, and shape the
//!   success payload for each tool.
//!
//! # Invariants
//! - Argument validation happens here, before the core is called; the core
//!   only ever sees well-typed text arguments.
//! - Core error messages pass through verbatim.

use mindmap_core::{package, ArchiveError, DocumentStore, StoreError};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Errors from tool dispatch.
#[derive(Debug)]
pub enum ToolError {
    /// A required argument is absent or not a string.
    MissingArgument(&'static str),
    /// The requested tool name is not served.
    UnknownTool(String),
    /// The store rejected the operation.
    Store(StoreError),
    /// XMind packaging failed.
    Archive(ArchiveError),
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument(name) => {
                write!(f, "Invalid arguments: `{name}` must be a string")
            }
            Self::UnknownTool(name) => write!(f, "Unknown tool: {name}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Archive(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Archive(err) => Some(err),
            Self::MissingArgument(_) | Self::UnknownTool(_) => None,
        }
    }
}

impl From<StoreError> for ToolError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ArchiveError> for ToolError {
    fn from(value: ArchiveError) -> Self {
        Self::Archive(value)
    }
}

/// Returns the tool list served by `tools/list`.
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": "create_mindmap",
            "description": "Create a new mind map with a root topic",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Title of the mind map"
                    },
                    "rootTitle": {
                        "type": "string",
                        "description": "Title of the root topic"
                    }
                },
                "required": ["title", "rootTitle"]
            }
        },
        {
            "name": "add_topic",
            "description": "Add a new topic to an existing topic in the mind map",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "mindMapId": {
                        "type": "string",
                        "description": "ID of the mind map"
                    },
                    "parentTopicId": {
                        "type": "string",
                        "description": "ID of the parent topic to add the new topic to"
                    },
                    "title": {
                        "type": "string",
                        "description": "Title of the new topic"
                    }
                },
                "required": ["mindMapId", "parentTopicId", "title"]
            }
        },
        {
            "name": "get_mindmap",
            "description": "Get the structure of a mind map",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "mindMapId": {
                        "type": "string",
                        "description": "ID of the mind map"
                    }
                },
                "required": ["mindMapId"]
            }
        },
        {
            "name": "list_mindmaps",
            "description": "List all created mind maps",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        },
        {
            "name": "save_mindmap",
            "description": "Save a mind map to an XMind file",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "mindMapId": {
                        "type": "string",
                        "description": "ID of the mind map"
                    },
                    "filePath": {
                        "type": "string",
                        "description": "File path to save the mind map (should end with .xmind)"
                    }
                },
                "required": ["mindMapId", "filePath"]
            }
        }
    ])
}

/// Dispatches one tool call and returns its success payload.
///
/// # Errors
/// - `MissingArgument` before the core is touched.
/// - `UnknownTool` for names outside the served set.
/// - `Store` / `Archive` passed through from the core.
pub fn call_tool(store: &DocumentStore, name: &str, args: &Value) -> Result<Value, ToolError> {
    match name {
        "create_mindmap" => {
            let title = required_str(args, "title")?;
            let root_title = required_str(args, "rootTitle")?;
            let created = store.create(title, root_title);
            Ok(json!({
                "mindMapId": created.mind_map_id,
                "rootTopicId": created.root_topic_id,
                "message": format!("Mind map \"{title}\" created successfully"),
            }))
        }
        "add_topic" => {
            let mind_map_id = required_str(args, "mindMapId")?;
            let parent_topic_id = required_str(args, "parentTopicId")?;
            let title = required_str(args, "title")?;
            let topic_id = store.add_topic(mind_map_id, parent_topic_id, title)?;
            Ok(json!({
                "topicId": topic_id,
                "message": format!("Topic \"{title}\" added successfully"),
            }))
        }
        "get_mindmap" => {
            let mind_map_id = required_str(args, "mindMapId")?;
            let mind_map = store.get(mind_map_id)?;
            // Model types carry the external camelCase schema.
            Ok(serde_json::to_value(mind_map)
                .unwrap_or_else(|_| json!({ "error": "serialization failed" })))
        }
        "list_mindmaps" => Ok(serde_json::to_value(store.list())
            .unwrap_or_else(|_| json!({ "error": "serialization failed" }))),
        "save_mindmap" => {
            let mind_map_id = required_str(args, "mindMapId")?;
            let file_path = required_str(args, "filePath")?;
            let mind_map = store.get(mind_map_id)?;
            // Snapshot is out of the store; packaging holds no lock.
            package(&mind_map, Path::new(file_path))?;
            Ok(json!({
                "message": format!("Mind map saved successfully to {file_path}"),
            }))
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

fn required_str<'a>(args: &'a Value, key: &'static str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or(ToolError::MissingArgument(key))
}

#[cfg(test)]
mod tests {
    use super::{call_tool, required_str, tool_definitions, ToolError};
    use mindmap_core::DocumentStore;
    use serde_json::json;

    #[test]
    fn tool_definitions_lists_five_tools() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools
            .as_array()
            .expect("tool list should be an array")
            .iter()
            .filter_map(|tool| tool["name"].as_str())
            .collect();
        assert_eq!(
            names,
            [
                "create_mindmap",
                "add_topic",
                "get_mindmap",
                "list_mindmaps",
                "save_mindmap"
            ]
        );
    }

    #[test]
    fn required_str_rejects_missing_and_non_string() {
        let args = json!({ "title": 7 });
        assert!(matches!(
            required_str(&args, "title"),
            Err(ToolError::MissingArgument("title"))
        ));
        assert!(matches!(
            required_str(&args, "rootTitle"),
            Err(ToolError::MissingArgument("rootTitle"))
        ));
    }

    #[test]
    fn unknown_tool_is_reported_by_name() {
        let store = DocumentStore::new();
        let err = call_tool(&store, "drop_mindmap", &json!({})).expect_err("must fail");
        assert_eq!(err.to_string(), "Unknown tool: drop_mindmap");
    }
}
