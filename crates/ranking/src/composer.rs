//! Input composition for the hybrid ranker.
//!
//! For every example the current utterance is appended to the tail of its
//! history and the result is aligned to a window of [`NUM_TURNS`] sentences
//! with pre-padding. Only the last `context_depth` turns stay visible. The
//! retrieval query is the last turn of the window, i.e. the current
//! utterance.
//!
//! # Example
//!
//! With `context_depth = 2`, utterance `"hi"` and history
//! `["hello", "how are you"]` compose to
//! `["", "", "", "", "", "", "", "", "how are you", "hi"]` with query `"hi"`.

use rankprep_core::component::{BatchComponent, ComponentOptions};
use rankprep_core::dialogue::{ComposedBatch, DialogueBatch, History, Utterance, check_columns};
use rankprep_core::error::{BatchError, ComponentError, Result};
use serde_json::Value;
use tracing::debug;

use crate::padding::{Padding, expand_context};

/// Registry name of the composer.
pub const COMPONENT_NAME: &str = "compose_inputs_hybrid_ranker";

/// Length of every composed context window.
pub const NUM_TURNS: usize = 10;

/// Number of trailing turns kept visible when no option is given.
pub const DEFAULT_CONTEXT_DEPTH: usize = 1;

const CONTEXT_DEPTH_KEY: &str = "context_depth";

/// Builds queries and fixed-length context windows for the hybrid ranker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeInputsHybridRanker {
    context_depth: usize,
    num_turns: usize,
}

impl ComposeInputsHybridRanker {
    /// Create a composer keeping the last `context_depth` turns visible.
    pub fn new(context_depth: usize) -> std::result::Result<Self, ComponentError> {
        if context_depth == 0 {
            return Err(invalid_options("context_depth must be >= 1"));
        }

        Ok(Self {
            context_depth,
            num_turns: NUM_TURNS,
        })
    }

    /// Create a composer from pipeline options.
    ///
    /// Reads `context_depth` and ignores every other key.
    pub fn from_options(options: &ComponentOptions) -> std::result::Result<Self, ComponentError> {
        let context_depth = match options.get(CONTEXT_DEPTH_KEY) {
            None | Some(Value::Null) => DEFAULT_CONTEXT_DEPTH,
            Some(value) => value
                .as_u64()
                .and_then(|depth| usize::try_from(depth).ok())
                .ok_or_else(|| {
                    invalid_options(&format!(
                        "context_depth must be a positive integer, got {value}"
                    ))
                })?,
        };

        for key in options.keys().filter(|key| key.as_str() != CONTEXT_DEPTH_KEY) {
            debug!(component = COMPONENT_NAME, option = %key, "Ignoring unrecognized option");
        }

        Self::new(context_depth)
    }

    pub fn context_depth(&self) -> usize {
        self.context_depth
    }

    pub fn num_turns(&self) -> usize {
        self.num_turns
    }

    /// Compose one batch.
    ///
    /// `utterances` and `histories` must have the same length. `states` is
    /// accepted alongside them but never read.
    pub fn compose(
        &self,
        utterances: &[Utterance],
        histories: &[History],
        states: Option<&[Value]>,
    ) -> std::result::Result<ComposedBatch, BatchError> {
        check_columns(utterances, histories, states)?;

        let mut out = ComposedBatch::with_capacity(utterances.len());
        for (utterance, history) in utterances.iter().zip(histories) {
            let context = self.compose_one(utterance, history);
            // Retrieval searches by the last utterance only.
            let query = context.last().cloned().unwrap_or_default();
            out.push(query, context);
        }

        debug!(examples = out.len(), depth = self.context_depth, "Composed ranker inputs");
        Ok(out)
    }

    /// Compose the context window of a single example.
    pub fn compose_one(&self, utterance: &str, history: &[Utterance]) -> Vec<String> {
        let keep = self.num_turns - 1;
        let recent = &history[history.len().saturating_sub(keep)..];

        let mut full_context = Vec::with_capacity(recent.len() + 1);
        full_context.extend_from_slice(recent);
        full_context.push(utterance.to_string());

        expand_context(&full_context, self.num_turns, self.context_depth, Padding::Pre)
    }
}

impl Default for ComposeInputsHybridRanker {
    fn default() -> Self {
        Self {
            context_depth: DEFAULT_CONTEXT_DEPTH,
            num_turns: NUM_TURNS,
        }
    }
}

impl BatchComponent for ComposeInputsHybridRanker {
    fn name(&self) -> &str {
        COMPONENT_NAME
    }

    fn process(&self, batch: &DialogueBatch) -> Result<ComposedBatch> {
        Ok(self.compose(&batch.utterances, &batch.histories, batch.states.as_deref())?)
    }
}

/// Registry factory for [`ComposeInputsHybridRanker`].
pub(crate) fn build(options: &ComponentOptions) -> Result<Box<dyn BatchComponent>> {
    Ok(Box::new(ComposeInputsHybridRanker::from_options(options)?))
}

fn invalid_options(reason: &str) -> ComponentError {
    ComponentError::InvalidOptions {
        component: COMPONENT_NAME.to_string(),
        reason: reason.to_string(),
    }
}
