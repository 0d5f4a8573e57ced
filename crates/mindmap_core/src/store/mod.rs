//! In-memory mind map document store.
//!
//! # Responsibility
//! - Own every `MindMap` for the life of the process and hand out snapshots.
//! - Allocate `mindmap_<n>` / `topic_<n>` ids from monotonic counters.
//!
//! # Invariants
//! - Counters only ever increase; an id is never reassigned or reused.
//! - Mutations are serialized behind one exclusive lock, so id allocation
//!   plus child-append is atomic and readers never observe a half-applied
//!   change.
//! - A failed operation leaves the store exactly as it was, including the
//!   topic counter: lookup failures happen before any id is allocated.
//! - Reads return deep copies, never views into locked state.

use crate::model::topic::{MindMap, MindMapId, MindMapSummary, Topic, TopicId};
use log::info;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced mind map id does not exist in the store.
    MindMapNotFound(MindMapId),
    /// Referenced parent topic id does not exist within the mind map's tree.
    TopicNotFound(TopicId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MindMapNotFound(id) => write!(f, "Mind map with ID {id} not found"),
            Self::TopicNotFound(id) => write!(f, "Topic with ID {id} not found"),
        }
    }
}

impl Error for StoreError {}

/// Ids returned by a successful [`DocumentStore::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedMindMap {
    pub mind_map_id: MindMapId,
    pub root_topic_id: TopicId,
}

#[derive(Debug, Default)]
struct StoreState {
    /// Documents keyed by id; `order` preserves creation order for `list`.
    maps: HashMap<MindMapId, MindMap>,
    order: Vec<MindMapId>,
    mind_map_counter: u64,
    topic_counter: u64,
}

impl StoreState {
    fn next_mind_map_id(&mut self) -> MindMapId {
        self.mind_map_counter += 1;
        format!("mindmap_{}", self.mind_map_counter)
    }

    fn next_topic_id(&mut self) -> TopicId {
        self.topic_counter += 1;
        format!("topic_{}", self.topic_counter)
    }
}

/// Process-wide owner of all mind map documents.
///
/// Constructed once at startup and passed by reference to whatever layer
/// dispatches operations; there is no ambient singleton.
#[derive(Debug, Default)]
pub struct DocumentStore {
    state: Mutex<StoreState>,
}

impl DocumentStore {
    /// Creates an empty store with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mind map with a childless root topic and returns both ids.
    ///
    /// Accepts any text for both titles, including empty; never fails.
    pub fn create(&self, title: &str, root_title: &str) -> CreatedMindMap {
        let mut state = self.lock_state();
        let mind_map_id = state.next_mind_map_id();
        let root_topic_id = state.next_topic_id();

        let mind_map = MindMap {
            id: mind_map_id.clone(),
            title: title.to_string(),
            root_topic: Topic::new(root_topic_id.clone(), root_title, None),
        };
        state.maps.insert(mind_map_id.clone(), mind_map);
        state.order.push(mind_map_id.clone());

        info!("event=mindmap_created module=store status=ok id={mind_map_id} root={root_topic_id}");
        CreatedMindMap {
            mind_map_id,
            root_topic_id,
        }
    }

    /// Appends a topic under `parent_topic_id` and returns the new id.
    ///
    /// The parent is resolved by pre-order search over the map's tree; the
    /// new topic lands at the end of the parent's children.
    ///
    /// # Errors
    /// - `MindMapNotFound` when `mind_map_id` is absent.
    /// - `TopicNotFound` when the parent id is not in that map's tree.
    ///
    /// Both failures happen before a topic id is allocated.
    pub fn add_topic(
        &self,
        mind_map_id: &str,
        parent_topic_id: &str,
        title: &str,
    ) -> StoreResult<TopicId> {
        let mut state = self.lock_state();
        let map = state
            .maps
            .get(mind_map_id)
            .ok_or_else(|| StoreError::MindMapNotFound(mind_map_id.to_string()))?;
        if map.root_topic.find_topic(parent_topic_id).is_none() {
            return Err(StoreError::TopicNotFound(parent_topic_id.to_string()));
        }

        let topic_id = state.next_topic_id();
        let topic = Topic::new(topic_id.clone(), title, Some(parent_topic_id.to_string()));

        // The parent was found above under the same lock, so this lookup
        // cannot fail; guard anyway instead of unwrapping.
        let parent = state
            .maps
            .get_mut(mind_map_id)
            .and_then(|map| map.root_topic.find_topic_mut(parent_topic_id))
            .ok_or_else(|| StoreError::TopicNotFound(parent_topic_id.to_string()))?;
        parent.children.push(topic);

        info!(
            "event=topic_added module=store status=ok map={mind_map_id} \
             parent={parent_topic_id} id={topic_id}"
        );
        Ok(topic_id)
    }

    /// Returns a deep copy of the full document.
    ///
    /// # Errors
    /// - `MindMapNotFound` when `mind_map_id` is absent.
    pub fn get(&self, mind_map_id: &str) -> StoreResult<MindMap> {
        let state = self.lock_state();
        state
            .maps
            .get(mind_map_id)
            .cloned()
            .ok_or_else(|| StoreError::MindMapNotFound(mind_map_id.to_string()))
    }

    /// Lists every document as a summary row, in creation order.
    pub fn list(&self) -> Vec<MindMapSummary> {
        let state = self.lock_state();
        state
            .order
            .iter()
            .filter_map(|id| state.maps.get(id))
            .map(MindMap::summary)
            .collect()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        // A poisoned lock means some caller panicked; the tree itself is
        // never left half-mutated (appends are the last step), so keep
        // serving instead of propagating the poison.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
