//! Topics: authored step data and the catalog that serves it.
//!
//! A topic document is JSON:
//!
//! ```text
//! { "id": "event-loop", "title": "...", "category": "execution_model",
//!   "language": "javascript", "source": ["line 1", "line 2"],
//!   "steps": [ { "title": "...", "explanation": "...", "duration_ms": 2000,
//!                "highlighted_lines": [1], "payload": { "kind": "event_loop" } } ] }
//! ```
//!
//! Documents are validated once at load time (non-empty, positive durations,
//! highlights inside the source) and are immutable afterwards.

pub mod catalog;
pub mod errors;
pub mod scene;
pub mod step;

pub use catalog::Catalog;
pub use errors::TopicError;
pub use scene::Scene;
pub use step::{Step, StepSequence};

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Broad grouping used by the topic list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ExecutionModel,
    UiInternals,
    Routing,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::ExecutionModel => write!(f, "execution model"),
            Category::UiInternals => write!(f, "UI internals"),
            Category::Routing => write!(f, "routing"),
        }
    }
}

/// A validated topic ready for playback
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub language: String,
    pub source: Vec<String>,
    pub sequence: Arc<StepSequence<Scene>>,
}

#[derive(Debug, Deserialize)]
struct TopicDocument {
    id: String,
    title: String,
    category: Category,
    #[serde(default)]
    language: String,
    #[serde(default)]
    source: Vec<String>,
    steps: Vec<Step<Scene>>,
}

impl Topic {
    /// Parse and validate a topic document
    pub fn from_json(json: &str) -> Result<Self, TopicError> {
        let doc: TopicDocument = serde_json::from_str(json)?;
        let sequence = StepSequence::new(doc.steps)?;
        sequence.validate_highlights(doc.source.len())?;

        Ok(Topic {
            id: doc.id,
            title: doc.title,
            category: doc.category,
            language: doc.language,
            source: doc.source,
            sequence: Arc::new(sequence),
        })
    }

    /// Read a topic document from disk
    pub fn load(path: &Path) -> Result<Self, TopicError> {
        let json = fs::read_to_string(path).map_err(|source| TopicError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn step_count(&self) -> usize {
        self.sequence.len()
    }

    /// One line for the `--list` output: id, steps, running time at 1x
    pub fn list_entry(&self) -> String {
        let secs = self.sequence.total_duration().as_millis() as f64 / 1000.0;
        format!(
            "{:<18} {:>2} steps {:>6.1}s  [{}]  {}",
            self.id,
            self.step_count(),
            secs,
            self.category,
            self.title
        )
    }
}
