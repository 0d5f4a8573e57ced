//! Mindmap MCP server binary.
//!
//! # Responsibility
//! - Wire logging, the document store, and the stdio serve loop together.
//! - Keep stdout clean for JSON-RPC; all diagnostics go to stderr.

use mindmap_core::{default_log_level, init_logging, DocumentStore};
use mindmap_mcp::McpServer;
use std::io;

fn main() -> io::Result<()> {
    if let Err(err) = init_logging(default_log_level()) {
        // Serve anyway; a broken logger must not take the server down.
        eprintln!("logging init failed: {err}");
    }

    let server = McpServer::new(DocumentStore::new());

    eprintln!("Mindmap MCP Server running on stdio");
    let stdin = io::stdin();
    let stdout = io::stdout();
    server.run(stdin.lock(), stdout.lock())
}
