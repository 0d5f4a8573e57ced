//! Core domain logic for the mindmap workspace.
//! This crate is the single source of truth for document and export invariants.

pub mod logging;
pub mod model;
pub mod store;
pub mod xmind;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::topic::{MindMap, MindMapId, MindMapSummary, Topic, TopicId};
pub use store::{CreatedMindMap, DocumentStore, StoreError, StoreResult};
pub use xmind::{
    escape_xml, package, render_content, render_manifest, render_meta, ArchiveError, ArchiveResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
