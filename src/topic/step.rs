//! Steps and step sequences

use super::errors::TopicError;
use serde::Deserialize;
use std::time::Duration;

/// One authored frame of a topic animation.
///
/// `payload` is whatever the visualization needs for this frame; nothing in
/// the playback layer looks inside it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step<P> {
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub highlighted_lines: Vec<usize>,
    pub payload: P,
}

impl<P> Step<P> {
    pub fn new(title: impl Into<String>, duration_ms: u64, payload: P) -> Self {
        Step {
            title: title.into(),
            explanation: String::new(),
            duration_ms,
            highlighted_lines: Vec::new(),
            payload,
        }
    }

    pub fn with_highlight(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        self.highlighted_lines = lines.into_iter().collect();
        self
    }

    /// Nominal on-screen time at 1x
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Ordered, non-empty, immutable list of steps.
///
/// Positions are 1-based: valid indices are `1..=len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSequence<P> {
    steps: Vec<Step<P>>,
}

impl<P> StepSequence<P> {
    /// Build a sequence, normalising highlighted lines (sorted, no repeats)
    pub fn new(mut steps: Vec<Step<P>>) -> Result<Self, TopicError> {
        if steps.is_empty() {
            return Err(TopicError::EmptySequence);
        }

        for (idx, step) in steps.iter_mut().enumerate() {
            if step.duration_ms == 0 {
                return Err(TopicError::ZeroDuration { step: idx + 1 });
            }
            step.highlighted_lines.sort_unstable();
            step.highlighted_lines.dedup();
        }

        Ok(StepSequence { steps })
    }

    /// Check every highlighted line against a source of `line_count` lines
    pub fn validate_highlights(&self, line_count: usize) -> Result<(), TopicError> {
        for (idx, step) in self.steps.iter().enumerate() {
            if let Some(&line) = step
                .highlighted_lines
                .iter()
                .find(|&&line| line == 0 || line > line_count)
            {
                return Err(TopicError::HighlightOutOfRange {
                    step: idx + 1,
                    line,
                    lines: line_count,
                });
            }
        }
        Ok(())
    }

    /// Step at 1-based position `index`
    pub fn get(&self, index: usize) -> Option<&Step<P>> {
        index.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> &Step<P> {
        &self.steps[0]
    }

    /// Sum of nominal durations at 1x
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(Step::duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_rejected() {
        let result = StepSequence::<()>::new(Vec::new());
        assert!(matches!(result, Err(TopicError::EmptySequence)));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let steps = vec![Step::new("a", 100, ()), Step::new("b", 0, ())];
        let result = StepSequence::new(steps);
        assert!(matches!(result, Err(TopicError::ZeroDuration { step: 2 })));
    }

    #[test]
    fn test_positions_are_one_based() {
        let seq = StepSequence::new(vec![Step::new("a", 1, 'a'), Step::new("b", 1, 'b')]).unwrap();
        assert!(seq.get(0).is_none());
        assert_eq!(seq.get(1).map(|s| s.payload), Some('a'));
        assert_eq!(seq.get(2).map(|s| s.payload), Some('b'));
        assert!(seq.get(3).is_none());
    }

    #[test]
    fn test_highlights_normalised_and_validated() {
        let seq = StepSequence::new(vec![Step::new("a", 1, ()).with_highlight([3, 1, 3])]).unwrap();
        assert_eq!(seq.first().highlighted_lines, vec![1, 3]);
        assert!(seq.validate_highlights(3).is_ok());
        assert!(matches!(
            seq.validate_highlights(2),
            Err(TopicError::HighlightOutOfRange { step: 1, line: 3, lines: 2 })
        ));
    }

    #[test]
    fn test_total_duration_sums_steps() {
        let seq = StepSequence::new(vec![Step::new("a", 1500, ()), Step::new("b", 2500, ())]).unwrap();
        assert_eq!(seq.total_duration(), Duration::from_millis(4000));
    }
}
