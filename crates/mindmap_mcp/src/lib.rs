//! MCP stdio server for mind map building and XMind export.
//!
//! # Responsibility
//! - Speak JSON-RPC 2.0 over stdin/stdout per the Model Context Protocol.
//! - Expose the five mind map tools and route calls into `mindmap_core`.
//!
//! # Invariants
//! - stdout carries protocol frames only; diagnostics go to stderr logs.
//! - Tool failures become `isError` replies, never transport errors.

pub mod server;
pub mod tools;

pub use server::{JsonRpcRequest, JsonRpcResponse, McpServer};
pub use tools::{call_tool, tool_definitions, ToolError};
