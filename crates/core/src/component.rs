//! Component trait — the abstraction over batch preparation steps.
//!
//! A pipeline configuration names components by a stable string. The
//! [`ComponentRegistry`] maps those names to factories so a component can
//! be instantiated from its configured options.

use std::collections::HashMap;

use tracing::debug;

use crate::dialogue::{ComposedBatch, DialogueBatch};
use crate::error::{ComponentError, Result};

/// Construction options handed to a component factory.
///
/// Keys a component does not recognize are ignored, so a pipeline can
/// share option blocks across components.
pub type ComponentOptions = serde_json::Map<String, serde_json::Value>;

/// Builds a component from its configured options.
pub type ComponentFactory = fn(&ComponentOptions) -> Result<Box<dyn BatchComponent>>;

/// The core BatchComponent trait.
///
/// Each preparation step takes a dialogue batch and produces the query and
/// context columns consumed by the ranking model. Implementations hold only
/// construction-time configuration, so `process` is pure with respect to
/// its input.
pub trait BatchComponent: Send + Sync {
    /// The registered name of this component.
    fn name(&self) -> &str;

    /// Transform one batch.
    fn process(&self, batch: &DialogueBatch) -> Result<ComposedBatch>;
}

/// A registry of component factories keyed by name.
///
/// Populated explicitly at startup (see `rankprep_ranking::default_registry`).
pub struct ComponentRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory. Replaces any existing factory with the same name.
    pub fn register(&mut self, name: impl Into<String>, factory: ComponentFactory) {
        let name = name.into();
        debug!(component = %name, "Registered component");
        self.factories.insert(name, factory);
    }

    /// Whether a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate the component registered under `name`.
    pub fn build(&self, name: &str, options: &ComponentOptions) -> Result<Box<dyn BatchComponent>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ComponentError::NotFound(name.to_string()))?;
        factory(options)
    }

    /// List all registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
