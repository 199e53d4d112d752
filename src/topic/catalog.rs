//! Step data source: topics by id
//!
//! The built-in topics are compiled into the binary; more can be added from
//! JSON files at startup. Lookups hand out shared, immutable sequences.

use super::{Scene, StepSequence, Topic, TopicError};
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const BUILTIN_TOPICS: [&str; 4] = [
    include_str!("../../topics/event_loop.json"),
    include_str!("../../topics/call_stack.json"),
    include_str!("../../topics/reconciliation.json"),
    include_str!("../../topics/client_routing.json"),
];

/// Registry of topics, in registration order
#[derive(Debug, Default)]
pub struct Catalog {
    topics: FxHashMap<String, Arc<Topic>>,
    order: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in topic
    pub fn builtin() -> Result<Self, TopicError> {
        let mut catalog = Catalog::new();
        for json in BUILTIN_TOPICS {
            catalog.insert(Topic::from_json(json)?)?;
        }
        Ok(catalog)
    }

    /// Register a topic; ids must be unique
    pub fn insert(&mut self, topic: Topic) -> Result<(), TopicError> {
        if self.topics.contains_key(&topic.id) {
            return Err(TopicError::DuplicateTopic(topic.id));
        }
        info!(id = %topic.id, steps = topic.step_count(), "topic registered");
        self.order.push(topic.id.clone());
        self.topics.insert(topic.id.clone(), Arc::new(topic));
        Ok(())
    }

    /// Load and register a topic document from disk
    pub fn load_file(&mut self, path: &Path) -> Result<Arc<Topic>, TopicError> {
        let topic = Topic::load(path)?;
        let id = topic.id.clone();
        self.insert(topic)?;
        self.topic(&id)
    }

    pub fn topic(&self, id: &str) -> Result<Arc<Topic>, TopicError> {
        self.topics
            .get(id)
            .cloned()
            .ok_or_else(|| TopicError::UnknownTopic(id.to_string()))
    }

    /// The step sequence for `id`
    pub fn get_sequence(&self, id: &str) -> Result<Arc<StepSequence<Scene>>, TopicError> {
        self.topic(id).map(|topic| Arc::clone(&topic.sequence))
    }

    /// Topic ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Topics in registration order
    pub fn topics(&self) -> impl Iterator<Item = &Arc<Topic>> {
        self.order.iter().filter_map(|id| self.topics.get(id))
    }

    /// Position of `id` in registration order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|known| known == id)
    }

    /// Id `offset` places after `id`, wrapping around
    pub fn neighbour(&self, id: &str, offset: isize) -> Option<&str> {
        let len = self.order.len() as isize;
        if len == 0 {
            return None;
        }
        let pos = self.position(id)? as isize;
        let idx = (pos + offset).rem_euclid(len) as usize;
        self.order.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
