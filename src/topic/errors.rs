//! Errors raised while loading and validating topic data

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between a topic document and a playable
/// step sequence.
#[derive(Debug, Error)]
pub enum TopicError {
    /// No topic is registered under this id
    #[error("unknown topic `{0}`")]
    UnknownTopic(String),

    /// Two topics share an id
    #[error("topic `{0}` is registered more than once")]
    DuplicateTopic(String),

    /// A sequence must hold at least one step
    #[error("step sequence must contain at least one step")]
    EmptySequence,

    /// A step would never be visible during autoplay
    #[error("step {step} has a zero duration")]
    ZeroDuration { step: usize },

    /// A step highlights a line the source does not have
    #[error("step {step} highlights line {line}, but the source has {lines} line(s)")]
    HighlightOutOfRange {
        step: usize,
        line: usize,
        lines: usize,
    },

    /// The topic file could not be read
    #[error("failed to read topic file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The topic document is not valid JSON for the topic schema
    #[error("malformed topic document: {0}")]
    Parse(#[from] serde_json::Error),
}
