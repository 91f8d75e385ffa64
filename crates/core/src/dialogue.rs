//! Dialogue batch domain types.
//!
//! These are the value objects that flow through a preparation step:
//! the host hands over a [`DialogueBatch`], a component returns a
//! [`ComposedBatch`] for the ranking model.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::BatchError;

/// One turn of dialogue text from a user.
pub type Utterance = String;

/// Prior turns of one dialogue, oldest first.
pub type History = Vec<Utterance>;

/// A batch of dialogue examples, one entry per example in each column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueBatch {
    /// Current utterance of each example.
    pub utterances: Vec<Utterance>,

    /// Dialogue history of each example.
    #[serde(default)]
    pub histories: Vec<History>,

    /// Opaque per-example dialogue state. Carried for interface
    /// compatibility; no built-in component reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<serde_json::Value>>,
}

impl DialogueBatch {
    /// Build a batch without dialogue states.
    pub fn new(utterances: Vec<Utterance>, histories: Vec<History>) -> Self {
        Self {
            utterances,
            histories,
            states: None,
        }
    }

    /// Attach per-example dialogue states.
    pub fn with_states(mut self, states: Vec<serde_json::Value>) -> Self {
        self.states = Some(states);
        self
    }

    /// Number of examples in the batch.
    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    /// Whether the batch has no examples.
    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }
}

/// Check that the utterance and history columns of a batch line up.
///
/// A `states` column of the wrong length is only reported in the log,
/// since nothing reads it.
pub fn check_columns(
    utterances: &[Utterance],
    histories: &[History],
    states: Option<&[serde_json::Value]>,
) -> Result<(), BatchError> {
    if utterances.len() != histories.len() {
        return Err(BatchError::LengthMismatch {
            utterances: utterances.len(),
            histories: histories.len(),
        });
    }

    if let Some(states) = states {
        if states.len() != utterances.len() {
            warn!(
                utterances = utterances.len(),
                states = states.len(),
                "Dialogue states length differs from batch size; ignoring states"
            );
        }
    }

    Ok(())
}

/// Output of a composition step: one query and one context window per example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedBatch {
    /// Retrieval query of each example, in input order.
    pub queries: Vec<String>,

    /// Fixed-length context window of each example, in input order.
    pub contexts: Vec<Vec<String>>,
}

impl ComposedBatch {
    /// Create an empty batch with room for `capacity` examples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queries: Vec::with_capacity(capacity),
            contexts: Vec::with_capacity(capacity),
        }
    }

    /// Append one example.
    pub fn push(&mut self, query: String, context: Vec<String>) {
        self.queries.push(query);
        self.contexts.push(context);
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_deserializes_without_histories_or_states() {
        let batch: DialogueBatch = serde_json::from_str(r#"{"utterances": []}"#).unwrap();
        assert!(batch.is_empty());
        assert!(batch.histories.is_empty());
        assert!(batch.states.is_none());
        assert!(check_columns(&batch.utterances, &batch.histories, None).is_ok());
    }

    #[test]
    fn batch_with_states_parses() {
        let json = r#"{
            "utterances": ["hi"],
            "histories": [["hello"]],
            "states": [{"slot": "city"}]
        }"#;
        let batch: DialogueBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.states.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn mismatched_histories_rejected() {
        let utterances = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            check_columns(&utterances, &[vec![]], None),
            Err(BatchError::LengthMismatch {
                utterances: 2,
                histories: 1,
            })
        );
    }

    #[test]
    fn mismatched_states_are_tolerated() {
        let batch = DialogueBatch::new(vec!["a".into()], vec![vec![]])
            .with_states(vec![serde_json::Value::Null, serde_json::Value::Null]);
        let checked = check_columns(&batch.utterances, &batch.histories, batch.states.as_deref());
        assert!(checked.is_ok());
    }

    #[test]
    fn composed_batch_serializes_both_columns() {
        let mut out = ComposedBatch::with_capacity(1);
        out.push("hi".into(), vec!["".into(), "hi".into()]);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["queries"][0], "hi");
        assert_eq!(json["contexts"][0][1], "hi");
    }
}
