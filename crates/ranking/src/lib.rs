//! Ranking-side preparation components.
//!
//! Turns a batch of dialogue turns into the inputs of the hybrid ranker:
//! a retrieval query per example and a fixed-length context window.

pub mod composer;
pub mod padding;

use rankprep_core::component::ComponentRegistry;

pub use composer::{COMPONENT_NAME, ComposeInputsHybridRanker, DEFAULT_CONTEXT_DEPTH, NUM_TURNS};
pub use padding::{Padding, expand_context};

/// Register every built-in component with `registry`.
pub fn register_builtin(registry: &mut ComponentRegistry) {
    registry.register(COMPONENT_NAME, composer::build);
}

/// Create a registry holding all built-in components.
pub fn default_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    register_builtin(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankprep_core::component::ComponentOptions;

    #[test]
    fn default_registry_contains_composer() {
        let registry = default_registry();
        assert_eq!(registry.names(), vec!["compose_inputs_hybrid_ranker"]);

        let component = registry
            .build(COMPONENT_NAME, &ComponentOptions::new())
            .unwrap();
        assert_eq!(component.name(), COMPONENT_NAME);
    }
}
