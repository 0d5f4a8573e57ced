//! Mind map domain model.
//!
//! # Responsibility
//! - Define the canonical topic-tree structures used by core business logic.
//! - Keep one owned shape that both the store and the serializer consume.
//!
//! # Invariants
//! - Every topic belongs to exactly one parent; the tree is never DAG-shaped.
//! - A mind map always owns exactly one root topic.

pub mod topic;
