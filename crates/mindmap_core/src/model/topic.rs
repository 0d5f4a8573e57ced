//! Topic and mind map domain model.
//!
//! # Responsibility
//! - Define the owned topic-tree record plus the mind map envelope around it.
//! - Provide the pre-order lookup used by every parent-resolving mutation.
//!
//! # Invariants
//! - `id` values are store-assigned and never reused for another node.
//! - `children` preserves insertion order at every level.
//! - `parent_id` is a relation only; ownership flows root-down through
//!   `children`, so no cycle or shared child can be expressed.

use serde::{Deserialize, Serialize};

/// Stable identifier for a topic node.
///
/// Opaque to callers; the store formats it as `topic_<n>` but that shape is
/// not part of the contract.
pub type TopicId = String;

/// Stable identifier for a mind map document.
pub type MindMapId = String;

/// One node in a mind map's hierarchy.
///
/// Field names serialize to the external camelCase schema so `get`/`list`
/// replies need no separate wire mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Store-assigned stable ID.
    pub id: TopicId,
    /// User text, stored verbatim; escaping is the serializer's job.
    pub title: String,
    /// Owned subtopics in insertion order.
    pub children: Vec<Topic>,
    /// Back-reference to the enclosing topic. `None` only for a root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TopicId>,
}

impl Topic {
    /// Creates a leaf topic with no children.
    pub fn new(id: TopicId, title: impl Into<String>, parent_id: Option<TopicId>) -> Self {
        Self {
            id,
            title: title.into(),
            children: Vec::new(),
            parent_id,
        }
    }

    /// Finds the topic with `id` in this subtree, visiting pre-order.
    ///
    /// If the same id somehow appeared twice the first pre-order match wins;
    /// that state is unreachable while ids stay generator-assigned, so the
    /// tie-break exists defensively, not as a feature.
    pub fn find_topic(&self, id: &str) -> Option<&Topic> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_topic(id))
    }

    /// Mutable variant of [`Topic::find_topic`], same visit order.
    pub fn find_topic_mut(&mut self, id: &str) -> Option<&mut Topic> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_topic_mut(id))
    }

    /// Counts the nodes in this subtree, self included.
    pub fn topic_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Topic::topic_count)
            .sum::<usize>()
    }
}

/// A named mind map document: exactly one root topic and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    /// Store-assigned stable ID, formatted `mindmap_<n>` by the generator.
    pub id: MindMapId,
    /// Document title, stored verbatim.
    pub title: String,
    /// The root of the topic tree; present for the whole document lifetime.
    pub root_topic: Topic,
}

/// Listing row for one mind map; carries identity, not the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapSummary {
    pub id: MindMapId,
    pub title: String,
    pub root_topic_id: TopicId,
}

impl MindMap {
    /// Builds the listing row for this document.
    pub fn summary(&self) -> MindMapSummary {
        MindMapSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            root_topic_id: self.root_topic.id.clone(),
        }
    }
}
